//! One document type, rebuilt end to end

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::config::IndexingConfig;
use crate::error::Result;
use crate::models::DocumentType;
use crate::search::{
    mappings, AliasDirectory, BulkLoader, IndexGeneration, RetryPolicy, Role, SearchClient,
};
use crate::source::SnapshotSource;

use super::rotator::GenerationRotator;

/// Drives one document type through
/// {create generation → tag in-progress → fetch snapshot → load → rotate}.
///
/// Steps short-circuit on the first error; a generation that never
/// finished loading is never handed to the rotator. Re-running after a
/// failure is safe: it builds a fresh generation and leaves the promoted
/// `latest`/`previous` pair untouched until its own rotation succeeds.
pub struct ReindexPipeline {
    source: Arc<dyn SnapshotSource>,
    client: Arc<SearchClient>,
    directory: Arc<dyn AliasDirectory>,
    loader: BulkLoader,
    rotator: GenerationRotator,
    settings: IndexingConfig,
}

impl ReindexPipeline {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        client: Arc<SearchClient>,
        directory: Arc<dyn AliasDirectory>,
        settings: IndexingConfig,
    ) -> Self {
        let loader = BulkLoader::new(client.clone(), RetryPolicy::from_config(&settings));
        let rotator = GenerationRotator::new(directory.clone());
        Self {
            source,
            client,
            directory,
            loader,
            rotator,
            settings,
        }
    }

    /// Rebuild and promote a full replacement index for `doc_type`
    pub async fn reindex(&self, doc_type: DocumentType) -> Result<()> {
        let started = Instant::now();
        let generation = IndexGeneration::create(doc_type);
        info!(doc_type = %doc_type, generation = %generation, "Starting reindex");

        self.client
            .create_index(
                &generation.name(),
                &mappings::index_body(doc_type, &self.settings),
            )
            .await?;
        self.directory.attach(generation, Role::InProgress).await?;

        let documents = self.source.fetch_all(doc_type).await?;
        self.loader.load(&generation, &documents).await?;

        self.rotator.promote(generation).await?;

        info!(
            doc_type = %doc_type,
            generation = %generation,
            documents = documents.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Reindex complete"
        );
        Ok(())
    }
}
