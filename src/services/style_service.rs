use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::api::format::{apply_create_defaults, from_storage, new_style_id, timestamp, to_storage};
use crate::store::{Filter, Order, Query, SharedStore};

use super::error::ServiceError;

/// Table holding style/project rows
pub const STYLES_TABLE: &str = "projects";

/// CRUD over styles. Each call is exactly one store primitive plus field mapping.
#[derive(Clone)]
pub struct StyleService {
    store: SharedStore,
}

impl StyleService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All styles, most recently updated first
    pub async fn list(&self) -> Result<Vec<Map<String, Value>>, ServiceError> {
        let query = Query::all().order(Order::desc("updated_at"));
        let rows = self.store.select(STYLES_TABLE, &query).await?;
        debug!("Listed {} styles", rows.len());
        Ok(rows.iter().map(from_storage).collect())
    }

    pub async fn get(&self, id: &str) -> Result<Map<String, Value>, ServiceError> {
        let query = Query::all().filter(Filter::eq("id", id));
        let rows = self.store.select(STYLES_TABLE, &query).await?;
        rows.first()
            .map(from_storage)
            .ok_or_else(|| not_found(id))
    }

    /// Insert a new style with generated id, fresh timestamp and collection defaults
    pub async fn create(&self, data: &Map<String, Value>) -> Result<Map<String, Value>, ServiceError> {
        let now = Utc::now();
        let mut row = to_storage(data);
        let id = new_style_id(now);
        row.insert("id".into(), Value::String(id.clone()));
        row.insert("updated_at".into(), Value::String(timestamp(now)));
        apply_create_defaults(&mut row);

        let rows = self.store.insert(STYLES_TABLE, vec![row]).await?;
        let created = rows.first().ok_or(ServiceError::CreationFailed("style"))?;
        info!("Created style {}", id);
        Ok(from_storage(created))
    }

    /// Partial update; only supplied, non-null fields change. `updated_at` is always refreshed
    /// and `id` is never rewritten.
    pub async fn update(&self, id: &str, data: &Map<String, Value>) -> Result<Map<String, Value>, ServiceError> {
        let mut patch = to_storage(data);
        patch.remove("id");
        patch.insert("updated_at".into(), Value::String(timestamp(Utc::now())));

        let rows = self
            .store
            .update(STYLES_TABLE, &Filter::eq("id", id), patch)
            .await?;
        let updated = rows.first().ok_or_else(|| not_found(id))?;
        info!("Updated style {}", id);
        Ok(from_storage(updated))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let rows = self.store.delete(STYLES_TABLE, &Filter::eq("id", id)).await?;
        if rows.is_empty() {
            return Err(not_found(id));
        }
        info!("Deleted style {}", id);
        Ok(())
    }
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("Style {} not found", id))
}
