//! Resilient bulk loading of a new index generation
//!
//! The whole snapshot goes out as one NDJSON `_bulk` request. Transport
//! and top-level status failures are retried on a fixed backoff up to a
//! bound; per-item rejections are terminal because the accepted items are
//! already committed in the target generation (at-least-once, not atomic).

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::config::IndexingConfig;
use crate::models::Document;
use crate::search::client::SearchClient;
use crate::search::error::{SearchError, SearchResult};
use crate::search::generation::IndexGeneration;

/// Bounded-retry budget for one bulk load
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum attempts
    pub attempts: u32,
    /// Fixed pause between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &IndexingConfig) -> Self {
        Self {
            attempts: config.bulk_retry_attempts,
            backoff: config.bulk_backoff(),
        }
    }

    /// Overall deadline for the load: `(attempts + 1) * backoff`
    pub fn deadline(&self) -> Duration {
        self.backoff * (self.attempts + 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            backoff: Duration::from_secs(5),
        }
    }
}

/// Writes a full snapshot into one target generation
#[derive(Clone)]
pub struct BulkLoader {
    client: Arc<SearchClient>,
    policy: RetryPolicy,
}

impl BulkLoader {
    pub fn new(client: Arc<SearchClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Load `documents` into `generation`.
    ///
    /// On partial item failure the generation may be partially populated;
    /// the caller must treat the generation as unpromotable and rebuild.
    pub async fn load(
        &self,
        generation: &IndexGeneration,
        documents: &[Document],
    ) -> SearchResult<()> {
        if documents.is_empty() {
            info!(generation = %generation, "Snapshot is empty, nothing to load");
            return Ok(());
        }

        let body = ndjson_body(generation, documents)?;

        let response = match tokio::time::timeout(
            self.policy.deadline(),
            self.send_with_retry(generation, &body),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(SearchError::DeadlineExceeded {
                    attempts: self.policy.attempts,
                })
            }
        };

        self.check_items(generation, documents.len(), &response)
    }

    /// Retry the transport call up to the bound on a fixed backoff
    async fn send_with_retry(
        &self,
        generation: &IndexGeneration,
        body: &str,
    ) -> SearchResult<BulkResponse> {
        let index = generation.name();
        let mut attempt = 1;

        loop {
            match self.client.bulk(&index, body.to_string()).await {
                Ok(response) => return Ok(response),
                Err(err) if err.is_retryable() && attempt < self.policy.attempts => {
                    warn!(
                        generation = %generation,
                        attempt,
                        max_attempts = self.policy.attempts,
                        error = %err,
                        "Bulk write failed, retrying"
                    );
                    tokio::time::sleep(self.policy.backoff).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(
                        generation = %generation,
                        attempts = attempt,
                        error = %err,
                        "Bulk write failed, giving up"
                    );
                    return Err(err);
                }
            }
        }
    }

    /// Scan per-item results; any item status above 201 fails the load.
    /// Accepted items stay committed, nothing is rolled back.
    fn check_items(
        &self,
        generation: &IndexGeneration,
        total: usize,
        response: &BulkResponse,
    ) -> SearchResult<()> {
        let mut failed = 0;
        for item in &response.items {
            if item.index.status > 201 {
                failed += 1;
                error!(
                    generation = %generation,
                    status = item.index.status,
                    error_type = %item.index.error.kind,
                    reason = %item.index.error.reason,
                    cause_type = %item.index.error.cause.kind,
                    cause_reason = %item.index.error.cause.reason,
                    "Bulk item rejected"
                );
            }
        }

        if failed > 0 {
            return Err(SearchError::BulkItems { failed, total });
        }

        info!(generation = %generation, documents = total, "Bulk load complete");
        Ok(())
    }
}

/// One action line plus one document line per document
fn ndjson_body(generation: &IndexGeneration, documents: &[Document]) -> SearchResult<String> {
    let index = generation.name();
    let mut body = String::new();

    for document in documents {
        let data = serde_json::to_string(document)
            .map_err(|e| SearchError::Response(format!("document encoding failed: {e}")))?;
        body.push_str(&format!("{{ \"index\" : {{ \"_index\" : \"{index}\" }} }}\n"));
        body.push_str(&data);
        body.push('\n');
    }

    Ok(body)
}

/// Per-item accounting of a `_bulk` response
#[derive(Debug, Default, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<BulkItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkItem {
    #[serde(default)]
    pub index: BulkItemIndex,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkItemIndex {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub error: BulkItemError,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkItemError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub reason: String,
    #[serde(rename = "caused_by", default)]
    pub cause: BulkItemCause,
}

#[derive(Debug, Default, Deserialize)]
pub struct BulkItemCause {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub reason: String,
}
