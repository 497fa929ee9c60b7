//! Index rebuild orchestration
//!
//! One [`ReindexPipeline`] run drives a single document type through
//! {create generation → tag in-progress → fetch snapshot → bulk load →
//! rotate}. The [`ReindexCoordinator`] dispatches pipeline runs as
//! observable background tasks, one per type, and fans out over the whole
//! closed set for "reindex everything" requests.

pub mod coordinator;
pub mod pipeline;
pub mod rotator;
pub mod tasks;

pub use coordinator::ReindexCoordinator;
pub use pipeline::ReindexPipeline;
pub use rotator::GenerationRotator;
pub use tasks::{TaskId, TaskRecord, TaskRegistry, TaskState};
