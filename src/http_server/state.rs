//! Shared handler state.

use std::sync::Arc;

use crate::file_storage::AttachmentStorage;
use crate::records::{RecordIdGenerator, RecordStore};
use crate::report::PdfRenderer;

/// Everything a handler can reach. Cloned per request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub storage: AttachmentStorage,
    pub renderer: PdfRenderer,
    pub ids: Arc<RecordIdGenerator>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>, storage: AttachmentStorage, renderer: PdfRenderer) -> Self {
        Self {
            store,
            storage,
            renderer,
            ids: Arc::new(RecordIdGenerator::new()),
        }
    }

    /// Replace the identifier generator
    pub fn with_ids(mut self, ids: RecordIdGenerator) -> Self {
        self.ids = Arc::new(ids);
        self
    }
}
