//! HTTP surface: dispatch endpoints, task lookup, error bodies

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use common::{build_pipeline, sample_programs, FakeEngine};
use podcast_indexer::api::{build_router, AppState};
use podcast_indexer::indexer::{ReindexCoordinator, TaskRegistry};
use podcast_indexer::models::DocumentType;
use podcast_indexer::source::InMemorySource;

async fn test_app(engine: &FakeEngine) -> (Router, Arc<ReindexCoordinator>) {
    let source = Arc::new(InMemorySource::new());
    source.set_documents(DocumentType::Program, sample_programs(2));
    let pipeline = build_pipeline(engine, source);
    let coordinator = Arc::new(ReindexCoordinator::new(
        pipeline,
        Arc::new(TaskRegistry::new()),
    ));
    (build_router(AppState::new(coordinator.clone())), coordinator)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_healthy() {
    let engine = FakeEngine::spawn().await;
    let (app, _) = test_app(&engine).await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn unknown_document_type_is_a_400() {
    let engine = FakeEngine::spawn().await;
    let (app, _) = test_app(&engine).await;

    let response = app
        .oneshot(
            Request::post("/v1/indexation/podcasts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UNKNOWN_TYPE");
}

#[tokio::test]
async fn dispatch_returns_202_with_a_trackable_task() {
    let engine = FakeEngine::spawn().await;
    let (app, coordinator) = test_app(&engine).await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/v1/indexation/programs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["doc_type"], "programs");
    let task_id = body["task_id"].as_str().unwrap().to_string();

    // the run settles and the record is queryable
    for _ in 0..200 {
        let record = coordinator
            .registry()
            .get(task_id.parse().unwrap())
            .unwrap();
        if record.finished_at.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let response = app
        .oneshot(
            Request::get(format!("/v1/indexation/tasks/{task_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], task_id.as_str());
    assert_eq!(body["state"], "succeeded");
}

#[tokio::test]
async fn dispatch_all_returns_a_task_per_type() {
    let engine = FakeEngine::spawn().await;
    let (app, _) = test_app(&engine).await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/v1/indexation/all")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 7);

    let response = app
        .oneshot(Request::get("/v1/indexation/tasks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["total"], 7);
}

#[tokio::test]
async fn missing_task_is_a_404() {
    let engine = FakeEngine::spawn().await;
    let (app, _) = test_app(&engine).await;

    let response = app
        .oneshot(
            Request::get("/v1/indexation/tasks/00000000-0000-0000-0000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "TASK_NOT_FOUND");
}
