//! JSON output for CLI commands

use std::io::{self, Write};

use serde::Serialize;

use super::errors::CliResult;

/// Write a value to stdout as pretty JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    write_json_to(value, &mut io::stdout().lock())
}

pub(crate) fn write_json_to<T: Serialize + ?Sized, W: Write>(value: &T, out: &mut W) -> CliResult<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
