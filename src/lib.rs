//! aarstore - After Action Report records service
//!
//! In-memory AAR records, attachment object storage, printable PDF reports
//! and the HTTP surface that ties them together.

pub mod cli;
pub mod config;
pub mod file_storage;
pub mod http_server;
pub mod logging;
pub mod records;
pub mod report;
