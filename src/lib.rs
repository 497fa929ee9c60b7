//! podcast-indexer: keeps the catalog's full-text search index
//! synchronized with the relational system of record by rebuilding, per
//! document type, a complete replacement index generation and promoting
//! it through alias rotation, with one prior generation retained for
//! rollback.

pub mod api;
pub mod config;
pub mod error;
pub mod indexer;
pub mod models;
pub mod search;
pub mod source;

pub use error::{AppError, Result};
