//! `RestStore` against a mock PostgREST server on a local port.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Json};
use axum::Router;
use fcbl_api::services::StyleService;
use fcbl_api::store::{Filter, Order, RestStore, StoreError, TableStore};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    params: Vec<(String, String)>,
    headers: HeaderMap,
    body: Value,
}

type Log = Arc<Mutex<Vec<Captured>>>;

/// Canned PostgREST behaviour: GET returns two rows, writes echo what they were sent,
/// `id=eq.missing` matches nothing and the `broken` table fails like a bad column.
async fn postgrest(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    log.lock().unwrap().push(Captured {
        method: method.clone(),
        path: uri.path().to_string(),
        params: params.clone(),
        headers,
        body: body.clone(),
    });

    if uri.path().ends_with("/broken") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"code": "42703", "message": "column broken.nope does not exist", "details": null, "hint": null})),
        );
    }
    let missing = params.iter().any(|(k, v)| k == "id" && v == "eq.missing");
    if missing {
        return (StatusCode::OK, Json(json!([])));
    }

    match method {
        Method::GET => (
            StatusCode::OK,
            Json(json!([
                {"id": "proj-2", "title": "Newer", "updated_at": "2024-06-01T00:00:00Z", "po_numbers": null},
                {"id": "proj-1", "title": "Older", "updated_at": "2024-01-01T00:00:00Z"}
            ])),
        ),
        Method::POST => (StatusCode::CREATED, Json(body)),
        Method::PATCH => {
            let mut row = body.as_object().cloned().unwrap_or_default();
            if let Some((_, v)) = params.iter().find(|(k, _)| k == "id") {
                row.insert("id".into(), Value::String(v.trim_start_matches("eq.").to_string()));
            }
            (StatusCode::OK, Json(json!([row])))
        }
        Method::DELETE => (StatusCode::OK, Json(json!([{"id": "proj-1"}]))),
        _ => (StatusCode::METHOD_NOT_ALLOWED, Json(Value::Null)),
    }
}

async fn spawn_mock() -> Result<(String, Log)> {
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new().fallback(postgrest).with_state(log.clone());

    let port = portpicker::pick_unused_port().ok_or_else(|| anyhow::anyhow!("no free port"))?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Ok((format!("http://127.0.0.1:{}", port), log))
}

fn store(base: &str) -> RestStore {
    RestStore::new(base, "secret-key", Duration::from_secs(5)).unwrap()
}

fn param<'a>(captured: &'a Captured, key: &str) -> Option<&'a str> {
    captured.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn select_sends_filters_order_and_credentials() -> Result<()> {
    let (base, log) = spawn_mock().await?;

    let rows = store(&base)
        .select(
            "projects",
            &fcbl_api::store::Query::all()
                .filter(Filter::eq("id", "proj-1"))
                .order(Order::desc("updated_at")),
        )
        .await?;
    assert_eq!(rows.len(), 2);

    let captured = log.lock().unwrap()[0].clone();
    assert_eq!(captured.method, Method::GET);
    assert_eq!(captured.path, "/rest/v1/projects");
    assert_eq!(param(&captured, "select"), Some("*"));
    assert_eq!(param(&captured, "id"), Some("eq.proj-1"));
    assert_eq!(param(&captured, "order"), Some("updated_at.desc"));
    assert_eq!(captured.headers.get("apikey").unwrap(), "secret-key");
    assert_eq!(captured.headers.get("authorization").unwrap(), "Bearer secret-key");
    Ok(())
}

#[tokio::test]
async fn writes_ask_for_representation() -> Result<()> {
    let (base, log) = spawn_mock().await?;
    let store = store(&base);

    let row = json!({"id": "proj-5", "title": "Tee"}).as_object().cloned().unwrap();
    let inserted = store.insert("projects", vec![row]).await?;
    assert_eq!(inserted[0]["title"], "Tee");

    let patch = json!({"title": "Polo"}).as_object().cloned().unwrap();
    let updated = store.update("projects", &Filter::eq("id", "proj-5"), patch).await?;
    assert_eq!(updated[0]["id"], "proj-5");

    let deleted = store.delete("projects", &Filter::eq("id", "missing")).await?;
    assert!(deleted.is_empty());

    let log = log.lock().unwrap();
    let methods: Vec<_> = log.iter().map(|c| c.method.clone()).collect();
    assert_eq!(methods, vec![Method::POST, Method::PATCH, Method::DELETE]);
    for captured in log.iter() {
        assert_eq!(captured.headers.get("prefer").unwrap(), "return=representation");
    }
    assert!(log[0].body.is_array());
    assert_eq!(param(&log[1], "id"), Some("eq.proj-5"));
    assert_eq!(param(&log[2], "id"), Some("eq.missing"));
    Ok(())
}

#[tokio::test]
async fn upstream_errors_carry_postgrest_message() -> Result<()> {
    let (base, _) = spawn_mock().await?;

    let err = store(&base)
        .select("broken", &fcbl_api::store::Query::all())
        .await
        .unwrap_err();
    match err {
        StoreError::Upstream { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "column broken.nope does not exist");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn style_service_over_rest_store() -> Result<()> {
    let (base, log) = spawn_mock().await?;
    let service = StyleService::new(Arc::new(store(&base)));

    let styles = service.list().await?;
    assert_eq!(styles[0]["id"], "proj-2");
    assert_eq!(styles[0]["poNumbers"], json!([]));

    let created = service
        .create(json!({"title": "Sample Jacket", "poNumbers": null}).as_object().unwrap())
        .await?;
    assert_eq!(created["status"], "DRAFT");
    assert_eq!(created["poNumbers"], json!([]));

    let sent = log.lock().unwrap()[1].body.clone();
    let sent_row = &sent[0];
    assert_eq!(sent_row["title"], "Sample Jacket");
    assert_eq!(sent_row["material_remarks"], "");
    assert!(sent_row["id"].as_str().unwrap().starts_with("proj-"));
    assert!(sent_row.get("poNumbers").is_none());
    Ok(())
}
