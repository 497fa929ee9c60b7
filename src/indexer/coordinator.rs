//! Dispatching reindex runs as independent background tasks

use std::sync::Arc;

use strum::IntoEnumIterator;
use tracing::{error, info};

use crate::models::DocumentType;

use super::pipeline::ReindexPipeline;
use super::tasks::{TaskId, TaskRegistry};

/// Spawns pipeline runs and records their outcomes.
///
/// Each type runs in its own task with no shared mutable state beyond the
/// external alias directory, so one type's failure never blocks another.
/// Failures are recorded in the registry and logged, never propagated to
/// the caller: triggers acknowledge dispatch, not completion. The caller
/// is responsible for not dispatching the same type twice concurrently.
pub struct ReindexCoordinator {
    pipeline: Arc<ReindexPipeline>,
    registry: Arc<TaskRegistry>,
}

impl ReindexCoordinator {
    pub fn new(pipeline: Arc<ReindexPipeline>, registry: Arc<TaskRegistry>) -> Self {
        Self { pipeline, registry }
    }

    /// Dispatch one reindex run for `doc_type`, returning its task handle
    pub fn dispatch(&self, doc_type: DocumentType) -> TaskId {
        let task_id = self.registry.start(doc_type);
        let pipeline = self.pipeline.clone();
        let registry = self.registry.clone();

        tokio::spawn(async move {
            match pipeline.reindex(doc_type).await {
                Ok(()) => {
                    registry.succeed(task_id);
                }
                Err(err) => {
                    error!(
                        doc_type = %doc_type,
                        task_id = %task_id,
                        error = %err,
                        "Reindex run failed"
                    );
                    registry.fail(task_id, err.to_string());
                }
            }
        });

        info!(doc_type = %doc_type, task_id = %task_id, "Reindex dispatched");
        task_id
    }

    /// Dispatch one independent run per known document type
    pub fn dispatch_all(&self) -> Vec<(DocumentType, TaskId)> {
        DocumentType::iter()
            .map(|doc_type| (doc_type, self.dispatch(doc_type)))
            .collect()
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }
}
