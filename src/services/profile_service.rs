use chrono::Utc;
use serde_json::{Map, Value};
use tracing::info;

use crate::api::format::timestamp;
use crate::store::{Filter, Row, SharedStore};

use super::error::ServiceError;

pub const PROFILES_TABLE: &str = "profiles";

/// Profile columns an administrator may change
pub const EDITABLE_PROFILE_FIELDS: &[&str] = &[
    "name",
    "role",
    "section_access",
    "is_active",
    "phone",
    "factory_id",
    "profile_photo_url",
];

/// Admin-side profile updates. Holds the service-role store handle, which bypasses RLS.
#[derive(Clone)]
pub struct ProfileService {
    store: SharedStore,
}

impl ProfileService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Apply the editable subset of `data` to profile `id`; other keys are discarded
    pub async fn update_profile(&self, id: &str, data: &Map<String, Value>) -> Result<(), ServiceError> {
        let mut patch = editable_fields(data);
        if patch.is_empty() {
            return Err(ServiceError::Validation("No valid fields to update".to_string()));
        }
        patch.insert("updated_at".into(), Value::String(timestamp(Utc::now())));

        let rows = self
            .store
            .update(PROFILES_TABLE, &Filter::eq("id", id), patch)
            .await?;
        info!("Updated profile {} ({} row(s))", id, rows.len());
        Ok(())
    }
}

fn editable_fields(data: &Map<String, Value>) -> Row {
    data.iter()
        .filter(|(key, _)| EDITABLE_PROFILE_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
