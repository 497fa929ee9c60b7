//! Common test utilities: an in-process fake search engine
//!
//! Implements the slice of the engine's REST API the indexer talks to
//! (index create/delete, alias get/put/delete, `_bulk`) over real HTTP,
//! with scriptable failure injection for transport and per-item errors.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use podcast_indexer::config::{IndexingConfig, SearchConfig};
use podcast_indexer::indexer::ReindexPipeline;
use podcast_indexer::models::{Document, DocumentType, Program};
use podcast_indexer::search::{EsAliasDirectory, SearchClient};
use podcast_indexer::source::{InMemorySource, SnapshotSource};

#[derive(Default)]
struct EngineState {
    inner: Mutex<EngineInner>,
    bulk_calls: AtomicUsize,
    fail_bulk: AtomicUsize,
    bulk_delay_ms: AtomicU64,
}

#[derive(Default)]
struct EngineInner {
    /// index name -> stored documents
    indices: HashMap<String, Vec<Value>>,
    /// alias name -> member index names
    aliases: HashMap<String, HashSet<String>>,
    /// document IDs rejected at the item level during bulk
    reject_ids: HashSet<String>,
}

/// Handle to a running fake engine
pub struct FakeEngine {
    state: Arc<EngineState>,
    url: String,
}

impl FakeEngine {
    /// Start a fake engine on an ephemeral port
    pub async fn spawn() -> Self {
        let state = Arc::new(EngineState::default());

        let app = Router::new()
            .route("/_alias/:alias", get(get_alias))
            .route("/:index/_alias/:alias", put(put_alias))
            .route("/:index/_alias/:alias", delete(delete_alias))
            .route("/:index/_bulk", post(bulk))
            .route("/:index", put(create_index))
            .route("/:index", delete(delete_index))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake engine");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake engine serve");
        });

        Self {
            state,
            url: format!("http://{addr}"),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Names of all live indices
    pub fn indices(&self) -> Vec<String> {
        let inner = self.state.inner.lock().unwrap();
        inner.indices.keys().cloned().collect()
    }

    /// Documents stored in one index
    pub fn documents(&self, index: &str) -> Vec<Value> {
        let inner = self.state.inner.lock().unwrap();
        inner.indices.get(index).cloned().unwrap_or_default()
    }

    /// Member indices of one alias
    pub fn alias_members(&self, alias: &str) -> Vec<String> {
        let inner = self.state.inner.lock().unwrap();
        inner
            .aliases
            .get(alias)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Member indices of one alias, restricted to one document type
    pub fn alias_members_of_type(&self, alias: &str, doc_type: DocumentType) -> Vec<String> {
        let prefix = format!("{}-", doc_type.as_str());
        self.alias_members(alias)
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .collect()
    }

    /// Fail the next `n` bulk calls with a 503
    pub fn fail_next_bulk(&self, n: usize) {
        self.state.fail_bulk.store(n, Ordering::SeqCst);
    }

    /// Stall every bulk response by `delay`
    pub fn delay_bulk(&self, delay: Duration) {
        self.state
            .bulk_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// Reject documents with this `ID` at the item level
    pub fn reject_document(&self, id: &str) {
        let mut inner = self.state.inner.lock().unwrap();
        inner.reject_ids.insert(id.to_string());
    }

    pub fn clear_rejections(&self) {
        let mut inner = self.state.inner.lock().unwrap();
        inner.reject_ids.clear();
    }

    /// Number of bulk calls received (including failed ones)
    pub fn bulk_calls(&self) -> usize {
        self.state.bulk_calls.load(Ordering::SeqCst)
    }
}

async fn create_index(
    State(state): State<Arc<EngineState>>,
    Path(index): Path<String>,
    _body: String,
) -> StatusCode {
    let mut inner = state.inner.lock().unwrap();
    inner.indices.entry(index).or_default();
    StatusCode::OK
}

async fn delete_index(
    State(state): State<Arc<EngineState>>,
    Path(index): Path<String>,
) -> StatusCode {
    let mut inner = state.inner.lock().unwrap();
    for name in index.split(',') {
        inner.indices.remove(name);
        for members in inner.aliases.values_mut() {
            members.remove(name);
        }
    }
    StatusCode::OK
}

async fn put_alias(
    State(state): State<Arc<EngineState>>,
    Path((index, alias)): Path<(String, String)>,
) -> StatusCode {
    let mut inner = state.inner.lock().unwrap();
    inner.aliases.entry(alias).or_default().insert(index);
    StatusCode::OK
}

async fn delete_alias(
    State(state): State<Arc<EngineState>>,
    Path((index, alias)): Path<(String, String)>,
) -> StatusCode {
    let mut inner = state.inner.lock().unwrap();
    match inner.aliases.get_mut(&alias) {
        Some(members) => {
            if members.remove(&index) {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            }
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn get_alias(
    State(state): State<Arc<EngineState>>,
    Path(alias): Path<String>,
) -> (StatusCode, Json<Value>) {
    let inner = state.inner.lock().unwrap();
    let members = inner.aliases.get(&alias).filter(|m| !m.is_empty());

    match members {
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "reason": format!("alias [{alias}] missing") } })),
        ),
        Some(members) => {
            let mut body = serde_json::Map::new();
            for index in members {
                body.insert(
                    index.clone(),
                    json!({ "aliases": { alias.clone(): {} } }),
                );
            }
            (StatusCode::OK, Json(Value::Object(body)))
        }
    }
}

async fn bulk(
    State(state): State<Arc<EngineState>>,
    Path(index): Path<String>,
    body: String,
) -> (StatusCode, Json<Value>) {
    state.bulk_calls.fetch_add(1, Ordering::SeqCst);

    let delay_ms = state.bulk_delay_ms.load(Ordering::SeqCst);
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    if state
        .fail_bulk
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
    {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": { "reason": "injected transport failure" } })),
        );
    }

    let mut inner = state.inner.lock().unwrap();
    let reject_ids = inner.reject_ids.clone();
    let mut items = Vec::new();
    let mut errors = false;

    // NDJSON: action line, then document line
    let mut lines = body.lines();
    while let Some(action_line) = lines.next() {
        if action_line.trim().is_empty() {
            continue;
        }
        let document_line = lines.next().expect("bulk action without document");
        let document: Value =
            serde_json::from_str(document_line).expect("bulk document is not JSON");

        let id = document["ID"].as_str().unwrap_or_default().to_string();
        if reject_ids.contains(&id) {
            errors = true;
            items.push(json!({ "index": {
                "_id": id,
                "status": 400,
                "error": {
                    "type": "mapper_parsing_exception",
                    "reason": "injected item rejection",
                    "caused_by": { "type": "illegal_argument_exception", "reason": "bad field" }
                }
            } }));
        } else {
            inner.indices.entry(index.clone()).or_default().push(document);
            items.push(json!({ "index": { "_id": id, "result": "created", "status": 201 } }));
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "errors": errors, "items": items })),
    )
}

/// Indexing settings with a small retry budget suited to tests
pub fn test_indexing_config() -> IndexingConfig {
    IndexingConfig {
        bulk_retry_attempts: 3,
        bulk_retry_backoff_secs: 1,
        refresh_interval_secs: 10,
        number_of_shards: 1,
        number_of_replicas: 5,
        nested_fields_limit: 200,
    }
}

/// Build a search client pointed at the fake engine
pub fn test_client(engine: &FakeEngine) -> Arc<SearchClient> {
    let config = SearchConfig {
        url: engine.url().to_string(),
        username: None,
        password: None,
        request_timeout_secs: 5,
    };
    Arc::new(SearchClient::new(&config).expect("build search client"))
}

/// Wire a pipeline against the fake engine and an in-memory source
pub fn build_pipeline(
    engine: &FakeEngine,
    source: Arc<InMemorySource>,
) -> Arc<ReindexPipeline> {
    let client = test_client(engine);
    let directory = Arc::new(EsAliasDirectory::new(client.clone()));
    Arc::new(ReindexPipeline::new(
        source as Arc<dyn SnapshotSource>,
        client,
        directory,
        test_indexing_config(),
    ))
}

/// `n` program documents with sequential ids
pub fn sample_programs(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            Document::from(Program {
                id: format!("program-{i}"),
                name: format!("Program {i}"),
                description: "A show".to_string(),
            })
        })
        .collect()
}
