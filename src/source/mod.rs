//! Snapshot source boundary
//!
//! A snapshot is the complete current set of records of one document
//! type, fetched in one logical call (no pagination contract). The
//! relational store is the system of record; every reindex run starts
//! from a fresh snapshot.

pub mod memory;
pub mod mysql;

pub use memory::InMemorySource;
pub use mysql::MySqlSnapshotSource;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Document, DocumentType};

/// Read boundary to the system of record
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// The full current set of documents for `doc_type`
    async fn fetch_all(&self, doc_type: DocumentType) -> Result<Vec<Document>>;
}
