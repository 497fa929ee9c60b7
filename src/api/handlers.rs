use std::str::FromStr;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::indexer::{TaskId, TaskRecord};
use crate::models::DocumentType;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Dispatch a reindex run for one document type.
///
/// Acknowledges dispatch only: the 202 means the run was started, not
/// that it succeeded. Outcome is observable via the task endpoints.
pub async fn trigger_reindex(
    State(state): State<AppState>,
    Path(type_name): Path<String>,
) -> Result<(StatusCode, Json<DispatchResponse>)> {
    let doc_type = DocumentType::from_str(&type_name)
        .map_err(|_| AppError::UnknownType(type_name.clone()))?;

    let task_id = state.coordinator.dispatch(doc_type);

    Ok((
        StatusCode::ACCEPTED,
        Json(DispatchResponse { doc_type, task_id }),
    ))
}

#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    pub doc_type: DocumentType,
    pub task_id: TaskId,
}

/// Dispatch one independent reindex run per known document type
pub async fn trigger_reindex_all(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<DispatchAllResponse>)> {
    let tasks: Vec<DispatchResponse> = state
        .coordinator
        .dispatch_all()
        .into_iter()
        .map(|(doc_type, task_id)| DispatchResponse { doc_type, task_id })
        .collect();

    Ok((StatusCode::ACCEPTED, Json(DispatchAllResponse { tasks })))
}

#[derive(Debug, Serialize)]
pub struct DispatchAllResponse {
    pub tasks: Vec<DispatchResponse>,
}

/// Look up one dispatched run
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TaskRecord>> {
    let record = state
        .coordinator
        .registry()
        .get(id)
        .ok_or(AppError::TaskNotFound(id))?;
    Ok(Json(record))
}

/// List dispatched runs, newest first
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<TaskListResponse>> {
    let tasks = state.coordinator.registry().list();
    let total = tasks.len();
    Ok(Json(TaskListResponse { tasks, total }))
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskRecord>,
    pub total: usize,
}
