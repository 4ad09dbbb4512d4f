use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{validate_table, Filter, Query, Row, StoreError, TableStore};

/// PostgREST client for a hosted Supabase project.
///
/// One instance per credential tier: the anon key is subject to row-level security, the
/// service-role key bypasses it. The key travels both as `apikey` and as a bearer token.
#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl RestStore {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let mut url = Url::parse(base_url).map_err(|e| StoreError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(base_url.to_string()));
        }
        // Url::join replaces the last segment unless the base path ends in '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fcbl-api/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url: url, api_key: api_key.into() })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        validate_table(table)?;
        self.base_url
            .join(&format!("rest/v1/{}", table))
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))
    }

    fn request(&self, method: Method, table: &str) -> Result<RequestBuilder, StoreError> {
        let url = self.table_url(table)?;
        Ok(self
            .client
            .request(method, url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key))
    }

    async fn send(&self, method: Method, table: &str, builder: RequestBuilder) -> Result<Vec<Row>, StoreError> {
        let response = builder.send().await?;
        debug!("{} {} -> {}", method, table, response.status());
        rows_from_response(response).await
    }
}

async fn rows_from_response(response: Response) -> Result<Vec<Row>, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(StoreError::upstream(status.as_u16(), upstream_message(&body, status)));
    }
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Vec<Row>>(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

/// PostgREST errors carry `{code, message, details, hint}`; anything else is surfaced raw
fn upstream_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) {
        if let Some(message) = obj.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("upstream error").to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl TableStore for RestStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError> {
        let builder = self.request(Method::GET, table)?.query(&query.to_params());
        self.send(Method::GET, table, builder).await
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        let builder = self
            .request(Method::POST, table)?
            .header("Prefer", "return=representation")
            .json(&rows);
        self.send(Method::POST, table, builder).await
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Row) -> Result<Vec<Row>, StoreError> {
        let builder = self
            .request(Method::PATCH, table)?
            .query(&filter.to_params())
            .header("Prefer", "return=representation")
            .json(&patch);
        self.send(Method::PATCH, table, builder).await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Row>, StoreError> {
        let builder = self
            .request(Method::DELETE, table)?
            .query(&filter.to_params())
            .header("Prefer", "return=representation");
        self.send(Method::DELETE, table, builder).await
    }
}
