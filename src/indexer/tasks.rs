//! Observable handles for dispatched reindex runs
//!
//! Triggers return immediately; the registry is how callers find out what
//! happened to a run afterwards. Records are in-memory only and do not
//! survive a restart (the search engine's aliases are the durable state).

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::models::DocumentType;

pub type TaskId = Uuid;

/// Lifecycle of one dispatched reindex run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskState {
    Running,
    Succeeded,
    Failed { error: String },
}

/// One dispatched reindex run
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub doc_type: DocumentType,
    #[serde(flatten)]
    pub state: TaskState,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// Registry of dispatched reindex runs
#[derive(Default)]
pub struct TaskRegistry {
    tasks: DashMap<TaskId, TaskRecord>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly dispatched run
    pub fn start(&self, doc_type: DocumentType) -> TaskId {
        let id = Uuid::new_v4();
        self.tasks.insert(
            id,
            TaskRecord {
                id,
                doc_type,
                state: TaskState::Running,
                started_at: Utc::now(),
                finished_at: None,
            },
        );
        id
    }

    pub fn succeed(&self, id: TaskId) {
        self.finish(id, TaskState::Succeeded);
    }

    pub fn fail(&self, id: TaskId, error: String) {
        self.finish(id, TaskState::Failed { error });
    }

    fn finish(&self, id: TaskId, state: TaskState) {
        if let Some(mut record) = self.tasks.get_mut(&id) {
            record.state = state;
            record.finished_at = Some(Utc::now());
        }
    }

    pub fn get(&self, id: TaskId) -> Option<TaskRecord> {
        self.tasks.get(&id).map(|record| record.clone())
    }

    /// All known runs, newest first
    pub fn list(&self) -> Vec<TaskRecord> {
        let mut records: Vec<TaskRecord> =
            self.tasks.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        records
    }
}
