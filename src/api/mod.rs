pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::indexer::ReindexCoordinator;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<ReindexCoordinator>,
}

impl AppState {
    pub fn new(coordinator: Arc<ReindexCoordinator>) -> Self {
        Self { coordinator }
    }
}
