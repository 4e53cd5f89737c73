//! # AAR Record Store
//!
//! In-memory After Action Report storage.
//!
//! The whole collection sits behind one reader/writer lock. Reads return
//! owned snapshots, so a record handed to a caller never changes underneath it.

pub mod errors;
pub mod id;
pub mod model;
pub mod sample;
pub mod stats;
pub mod store;

pub use errors::{RecordError, RecordResult};
pub use id::RecordIdGenerator;
pub use model::{Attachment, Classification, MissionType, Record, ReportStatus};
pub use stats::RecordStats;
pub use store::{RecordStore, SearchFilter};
