//! Search engine integration: generations, aliases, and bulk loading
//!
//! Every index rebuild creates a fresh physical index (a *generation*,
//! named `{type}-{timestamp}`), populates it with one bulk request, and
//! promotes it by moving symbolic aliases (*roles*). This module owns the
//! wire boundary to the search engine:
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │             AliasDirectory (trait)               │
//! │  generations_with_role / attach / detach /       │
//! │  delete_generations                              │
//! ├─────────────────────────────────────────────────┤
//! │                  BulkLoader                      │
//! │  single NDJSON request, bounded retry,           │
//! │  per-item failure accounting                     │
//! ├─────────────────────────────────────────────────┤
//! │                 SearchClient                     │
//! │  raw HTTP: index create/delete, alias get/put/   │
//! │  delete, _bulk                                   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The directory is role-global: it has no native notion of "per type"
//! aliases. Callers get per-type answers because generation identifiers
//! are parsed with an exact `{type}-{timestamp}` match, never substring
//! matching.

pub mod bulk;
pub mod client;
pub mod directory;
pub mod error;
pub mod generation;
pub mod mappings;

pub use bulk::{BulkLoader, RetryPolicy};
pub use client::SearchClient;
pub use directory::{AliasDirectory, EsAliasDirectory};
pub use error::{SearchError, SearchResult};
pub use generation::{IndexGeneration, Role};
