use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonObject};
use crate::state::AppState;

/// GET /styles/:id - single style
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Map<String, Value>> {
    let style = state.styles.get(&id).await?;
    Ok(ApiResponse::success(style))
}

/// PUT /styles/:id - update a style
///
/// Same partial semantics as PATCH: omitted or null fields keep their stored value.
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> ApiResult<Map<String, Value>> {
    let style = state.styles.update(&id, &body).await?;
    Ok(ApiResponse::success(style))
}

/// PATCH /styles/:id - partially update a style
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> ApiResult<Map<String, Value>> {
    let style = state.styles.update(&id, &body).await?;
    Ok(ApiResponse::success(style))
}

/// DELETE /styles/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.styles.delete(&id).await?;
    Ok(Json(json!({
        "message": "Style deleted successfully",
        "error": null
    })))
}
