use axum::extract::State;
use serde_json::{Map, Value};

use crate::middleware::{ApiResponse, ApiResult, JsonObject};
use crate::state::AppState;

/// GET /styles - all styles, most recently updated first
pub async fn get(State(state): State<AppState>) -> ApiResult<Vec<Map<String, Value>>> {
    let styles = state.styles.list().await?;
    Ok(ApiResponse::success(styles))
}

/// POST /styles - create a style from a partial record
pub async fn post(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> ApiResult<Map<String, Value>> {
    let style = state.styles.create(&body).await?;
    Ok(ApiResponse::created(style))
}
