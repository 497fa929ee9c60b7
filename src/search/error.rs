//! Error types for search engine operations

/// Result type for search engine operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while talking to the search engine
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The call itself failed (connection refused, DNS, timeout at the
    /// HTTP layer). Retryable within the bulk retry budget.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The call completed but the engine answered with a non-success
    /// top-level status. Retryable for bulk writes, fatal elsewhere.
    #[error("{operation} failed with status {status}: {reason}")]
    Status {
        operation: &'static str,
        status: u16,
        reason: String,
    },

    /// A bulk write succeeded at the top level but individual items were
    /// rejected. Never retried: the accepted items are already committed.
    #[error("Bulk load rejected {failed} of {total} documents")]
    BulkItems { failed: usize, total: usize },

    /// The engine answered with a body this client cannot parse
    #[error("Unexpected response: {0}")]
    Response(String),

    /// The retry budget's overall deadline elapsed
    #[error("Deadline exceeded after {attempts} attempts")]
    DeadlineExceeded { attempts: u32 },
}

impl SearchError {
    /// Whether a bulk write may be re-attempted after this error.
    ///
    /// Partial item failures are excluded: the successfully written items
    /// are committed, so a blind retry would duplicate them.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SearchError::Transport(_) | SearchError::Status { .. }
        )
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}
