use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

const SERVICE_NAME: &str = "FCBL Production API";

/// GET / - service information
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health",
        "api": state.config.api.prefix,
    }))
}

/// GET /health - liveness plus non-secret configuration flags. Never fails.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let store = &state.config.store;
    let configured = !store.url.is_empty() && !store.anon_key.is_empty();
    let url: String = store.url.chars().take(50).collect();

    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "supabase_configured": configured,
        "supabase_url": if url.is_empty() { "not set".to_string() } else { url },
    }))
}
