//! Raw HTTP client for the search engine wire boundary

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::search::bulk::BulkResponse;
use crate::search::error::{SearchError, SearchResult};

/// Thin wrapper around the engine's REST API.
///
/// Carries no rotation logic: it exposes index create/delete, alias
/// get/put/delete, and the `_bulk` endpoint, and normalizes failures into
/// [`SearchError`].
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl SearchClient {
    /// Create a new client from configuration
    pub fn new(config: &SearchConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SearchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.username {
            Some(user) => request.basic_auth(user, self.password.as_deref()),
            None => request,
        }
    }

    /// Create a physical index with the given settings and mappings
    pub async fn create_index(&self, name: &str, body: &Value) -> SearchResult<()> {
        let url = format!("{}/{}", self.base_url, name);
        let response = self
            .authorize(self.client.put(&url).json(body))
            .send()
            .await?;

        debug!(index = name, status = response.status().as_u16(), "Index created");
        Self::expect_success("create index", response).await
    }

    /// Permanently delete the named indices
    pub async fn delete_indices(&self, names: &[String]) -> SearchResult<()> {
        if names.is_empty() {
            return Ok(());
        }
        let url = format!("{}/{}", self.base_url, names.join(","));
        let response = self.authorize(self.client.delete(&url)).send().await?;

        debug!(indices = ?names, status = response.status().as_u16(), "Indices deleted");
        Self::expect_success("delete indices", response).await
    }

    /// Attach an alias to an index
    pub async fn put_alias(&self, index: &str, alias: &str) -> SearchResult<()> {
        let url = format!("{}/{}/_alias/{}", self.base_url, index, alias);
        let response = self.authorize(self.client.put(&url)).send().await?;

        debug!(index, alias, status = response.status().as_u16(), "Alias attached");
        Self::expect_success("put alias", response).await
    }

    /// Detach an alias from an index
    pub async fn delete_alias(&self, index: &str, alias: &str) -> SearchResult<()> {
        let url = format!("{}/{}/_alias/{}", self.base_url, index, alias);
        let response = self.authorize(self.client.delete(&url)).send().await?;

        debug!(index, alias, status = response.status().as_u16(), "Alias detached");
        Self::expect_success("delete alias", response).await
    }

    /// Names of all indices currently carrying an alias.
    ///
    /// A missing alias is an empty set, not an error.
    pub async fn indices_with_alias(&self, alias: &str) -> SearchResult<Vec<String>> {
        let url = format!("{}/_alias/{}", self.base_url, alias);
        let response = self.authorize(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!(alias, "No index carries alias");
            return Ok(Vec::new());
        }

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error("get alias", status, response).await);
        }

        // Response shape: { "<index>": { "aliases": { "<alias>": {} } }, ... }
        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Response(format!("alias listing: {e}")))?;
        let object = body
            .as_object()
            .ok_or_else(|| SearchError::Response("alias listing is not an object".to_string()))?;

        Ok(object.keys().cloned().collect())
    }

    /// Submit one NDJSON bulk request against the target index
    pub async fn bulk(&self, index: &str, body: String) -> SearchResult<BulkResponse> {
        let url = format!("{}/{}/_bulk", self.base_url, index);
        let response = self
            .authorize(
                self.client
                    .post(&url)
                    .header("Content-Type", "application/x-ndjson")
                    .body(body),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error("bulk", status, response).await);
        }

        response
            .json::<BulkResponse>()
            .await
            .map_err(|e| SearchError::Response(format!("bulk response: {e}")))
    }

    async fn expect_success(operation: &'static str, response: Response) -> SearchResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::status_error(operation, status, response).await)
    }

    /// Build a `Status` error, pulling the engine's `error.reason` out of
    /// the body when there is one.
    async fn status_error(
        operation: &'static str,
        status: StatusCode,
        response: Response,
    ) -> SearchError {
        let reason = match response.json::<Value>().await {
            Ok(body) => body["error"]["reason"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string()),
            Err(_) => "no response body".to_string(),
        };

        SearchError::Status {
            operation,
            status: status.as_u16(),
            reason,
        }
    }
}
