//! The rotation state machine
//!
//! Observed per-type states: `Empty` (no generation serves readers),
//! `HasLatestOnly`, `HasLatestAndPrevious`. Promoting a freshly loaded
//! generation moves the machine to a terminal state with the new
//! generation as `latest`, the displaced one (if any) as `previous`, and
//! the generation beyond that deleted.

use std::sync::Arc;

use tracing::{debug, info};

use crate::search::{AliasDirectory, IndexGeneration, Role, SearchResult};

/// Promotes loaded generations by sequencing alias directory calls.
///
/// The sequence is not transactional: the first failing call aborts the
/// remaining steps and can leave alias state inconsistent. Recovery is a
/// fresh pipeline run (generations are cheap to rebuild), plus
/// out-of-band repair of stray aliases where needed. No automatic repair
/// is attempted here.
pub struct GenerationRotator {
    directory: Arc<dyn AliasDirectory>,
}

impl GenerationRotator {
    pub fn new(directory: Arc<dyn AliasDirectory>) -> Self {
        Self { directory }
    }

    /// Promote `generation` (freshly loaded, tagged `in-progress`) to
    /// `latest` for its document type, retiring the displaced generation.
    pub async fn promote(&self, generation: IndexGeneration) -> SearchResult<()> {
        let doc_type = generation.doc_type;

        let latest = self
            .directory
            .generations_with_role(doc_type, Role::Latest)
            .await?;

        match latest.first().copied() {
            // First-ever rotation for this type
            None => {
                debug!(doc_type = %doc_type, generation = %generation, "No latest generation, promoting directly");
            }
            Some(displaced) => {
                let previous = self
                    .directory
                    .generations_with_role(doc_type, Role::Previous)
                    .await?;

                if let Some(retired) = previous.first().copied() {
                    debug!(doc_type = %doc_type, generation = %retired, "Deleting retired generation");
                    self.directory.delete_generations(&[retired]).await?;
                }

                debug!(doc_type = %doc_type, generation = %displaced, "Demoting latest to previous");
                self.directory.detach(displaced, Role::Latest).await?;
                self.directory.attach(displaced, Role::Previous).await?;
            }
        }

        self.directory.detach(generation, Role::InProgress).await?;
        self.directory.attach(generation, Role::Latest).await?;

        info!(doc_type = %doc_type, generation = %generation, "Generation promoted to latest");
        Ok(())
    }
}
