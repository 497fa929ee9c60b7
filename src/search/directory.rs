//! Alias directory: which generation carries which role

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::models::DocumentType;
use crate::search::client::SearchClient;
use crate::search::error::SearchResult;
use crate::search::generation::{IndexGeneration, Role};

/// Queries and (per-call atomically) rewrites role attachments.
///
/// No multi-role operation is atomic across calls: the rotator sequences
/// individual attach/detach/delete steps and owns the discipline invariant
/// that each role points at no more than one generation per type.
#[async_trait]
pub trait AliasDirectory: Send + Sync {
    /// Generations of `doc_type` currently holding `role` (expected 0 or 1)
    async fn generations_with_role(
        &self,
        doc_type: DocumentType,
        role: Role,
    ) -> SearchResult<Vec<IndexGeneration>>;

    /// Attach `role` to `generation`
    async fn attach(&self, generation: IndexGeneration, role: Role) -> SearchResult<()>;

    /// Detach `role` from `generation`
    async fn detach(&self, generation: IndexGeneration, role: Role) -> SearchResult<()>;

    /// Permanently delete the given generations
    async fn delete_generations(&self, generations: &[IndexGeneration]) -> SearchResult<()>;
}

/// Search-engine-backed directory.
///
/// The engine's aliases are role-global; the per-type view comes from
/// parsing each index name as a `{type}-{timestamp}` generation and
/// keeping exact type matches only. Foreign indices under the same alias
/// are skipped.
#[derive(Clone)]
pub struct EsAliasDirectory {
    client: Arc<SearchClient>,
}

impl EsAliasDirectory {
    pub fn new(client: Arc<SearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AliasDirectory for EsAliasDirectory {
    async fn generations_with_role(
        &self,
        doc_type: DocumentType,
        role: Role,
    ) -> SearchResult<Vec<IndexGeneration>> {
        let names = self.client.indices_with_alias(role.as_str()).await?;

        let generations: Vec<IndexGeneration> = names
            .iter()
            .filter_map(|name| IndexGeneration::parse(name))
            .filter(|generation| generation.doc_type == doc_type)
            .collect();

        debug!(
            doc_type = %doc_type,
            role = %role,
            count = generations.len(),
            "Resolved role membership"
        );
        Ok(generations)
    }

    async fn attach(&self, generation: IndexGeneration, role: Role) -> SearchResult<()> {
        self.client.put_alias(&generation.name(), role.as_str()).await
    }

    async fn detach(&self, generation: IndexGeneration, role: Role) -> SearchResult<()> {
        self.client
            .delete_alias(&generation.name(), role.as_str())
            .await
    }

    async fn delete_generations(&self, generations: &[IndexGeneration]) -> SearchResult<()> {
        let names: Vec<String> = generations.iter().map(IndexGeneration::name).collect();
        self.client.delete_indices(&names).await
    }
}
