//! PDF conversion through an external HTML-to-PDF renderer.
//!
//! The command line is `<binary> --title <operation name> <input.html> <output.pdf>`,
//! passed as an argument vector. The operation name is one argument no matter
//! what characters it contains.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use chrono::Utc;
use tokio::process::Command;
use tracing::{debug, warn};

use super::errors::{ReportError, ReportResult};
use super::html::render_html;
use crate::records::Record;

pub const DEFAULT_BINARY: &str = "wkhtmltopdf";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the PDF renderer for one record at a time
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    binary: PathBuf,
    timeout: Duration,
}

impl PdfRenderer {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Renderer arguments, one entry per argv slot
    pub fn arguments(title: &str, html_path: &Path, pdf_path: &Path) -> Vec<OsString> {
        vec![
            OsString::from("--title"),
            OsString::from(title),
            html_path.as_os_str().to_owned(),
            pdf_path.as_os_str().to_owned(),
        ]
    }

    fn command(&self, record: &Record, html_path: &Path, pdf_path: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(Self::arguments(&record.operation_name, html_path, pdf_path))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    /// Render the record and return the PDF bytes.
    ///
    /// Scratch files live in a private temporary directory removed on return.
    pub async fn render(&self, record: &Record) -> ReportResult<Vec<u8>> {
        let scratch = tempfile::Builder::new().prefix("aar_report_").tempdir()?;
        let html_path = scratch.path().join("report.html");
        let pdf_path = scratch.path().join("report.pdf");

        tokio::fs::write(&html_path, render_html(record, Utc::now())).await?;

        let output = self
            .command(record, &html_path, &pdf_path)
            .output();
        let output = match tokio::time::timeout(self.timeout, output).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(ReportError::Spawn {
                    binary: self.binary.display().to_string(),
                    source,
                })
            }
            Err(_) => {
                warn!(id = %record.id, timeout = ?self.timeout, "PDF renderer timed out");
                return Err(ReportError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            return Err(ReportError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let pdf = tokio::fs::read(&pdf_path).await?;
        debug!(id = %record.id, bytes = pdf.len(), "report rendered");
        Ok(pdf)
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY, DEFAULT_TIMEOUT)
    }
}
