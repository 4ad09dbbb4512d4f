#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{Map, Value};
use tower::ServiceExt;

use fcbl_api::app::app;
use fcbl_api::config::AppConfig;
use fcbl_api::state::AppState;
use fcbl_api::store::{Filter, MemoryStore, Query, Row, SharedStore, StoreError, TableStore};

/// Config with dummy credentials; nothing in these tests talks to a real store
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "SUPABASE_URL" => Some("https://example.supabase.co".to_string()),
        "SUPABASE_ANON_KEY" => Some("test-anon-key".to_string()),
        "SUPABASE_SERVICE_ROLE_KEY" => Some("test-service-key".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub struct TestApp {
    pub router: Router,
    /// Backs /styles (anon tier)
    pub anon: Arc<MemoryStore>,
    /// Backs /users (service-role tier)
    pub service: Arc<MemoryStore>,
}

/// Full router over two in-memory stores
pub fn build_test_app() -> TestApp {
    let anon = Arc::new(MemoryStore::new());
    let service = Arc::new(MemoryStore::new());
    let state = AppState::new(test_config(), anon.clone(), service.clone());
    TestApp {
        router: app(state),
        anon,
        service,
    }
}

/// Full router over arbitrary store handles
pub fn build_test_app_with(anon: SharedStore, service: SharedStore) -> Router {
    app(AppState::new(test_config(), anon, service))
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn send_raw(router: &Router, method: Method, uri: &str, raw: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn get(router: &Router, uri: &str) -> Response<Body> {
    send(router, Method::GET, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn row(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object")
}

/// Store whose every primitive fails the way an unreachable or misconfigured upstream does
pub struct FailingStore;

#[async_trait]
impl TableStore for FailingStore {
    async fn select(&self, _: &str, _: &Query) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::upstream(401, "Invalid API key"))
    }

    async fn insert(&self, _: &str, _: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::upstream(401, "Invalid API key"))
    }

    async fn update(&self, _: &str, _: &Filter, _: Row) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::upstream(401, "Invalid API key"))
    }

    async fn delete(&self, _: &str, _: &Filter) -> Result<Vec<Row>, StoreError> {
        Err(StoreError::upstream(401, "Invalid API key"))
    }
}
