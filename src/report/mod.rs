//! # AAR Report Rendering
//!
//! Printable HTML for a record and its conversion to PDF by an external
//! renderer. The renderer receives every value as a separate argument and is
//! never run through a shell.

pub mod errors;
pub mod html;
pub mod pdf;

pub use errors::{ReportError, ReportResult};
pub use html::{escape_html, render_html};
pub use pdf::PdfRenderer;
