//! In-memory snapshot source (for local runs and testing)

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Document, DocumentType};

use super::SnapshotSource;

/// Snapshot source serving fixed document sets, with per-type failure
/// injection to exercise pipeline error paths.
#[derive(Default)]
pub struct InMemorySource {
    documents: Mutex<HashMap<DocumentType, Vec<Document>>>,
    failing: Mutex<HashSet<DocumentType>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot served for `doc_type`
    pub fn set_documents(&self, doc_type: DocumentType, documents: Vec<Document>) {
        self.documents.lock().unwrap().insert(doc_type, documents);
    }

    /// Make fetches for `doc_type` fail until cleared
    pub fn fail_fetches(&self, doc_type: DocumentType) {
        self.failing.lock().unwrap().insert(doc_type);
    }

    pub fn clear_failure(&self, doc_type: DocumentType) {
        self.failing.lock().unwrap().remove(&doc_type);
    }
}

#[async_trait]
impl SnapshotSource for InMemorySource {
    async fn fetch_all(&self, doc_type: DocumentType) -> Result<Vec<Document>> {
        if self.failing.lock().unwrap().contains(&doc_type) {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(self
            .documents
            .lock()
            .unwrap()
            .get(&doc_type)
            .cloned()
            .unwrap_or_default())
    }
}
