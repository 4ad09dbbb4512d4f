use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::JsonObject;
use crate::state::AppState;

/// PATCH /users/:id - admin profile update (bypasses RLS)
///
/// Only the editable profile columns are applied; anything else in the body is dropped.
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> Result<Json<Value>, ApiError> {
    state.profiles.update_profile(&id, &body).await?;
    Ok(Json(json!({ "success": true, "error": null })))
}
