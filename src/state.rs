use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ProfileService, StyleService};
use crate::store::{MemoryStore, RestStore, SharedStore, StoreError};

/// Everything a handler needs, built once in `main` and cloned per request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub styles: StyleService,
    pub profiles: ProfileService,
}

impl AppState {
    /// Wire services to explicit store handles: `anon` for styles, `service` for profile admin
    pub fn new(config: AppConfig, anon: SharedStore, service: SharedStore) -> Self {
        Self {
            config: Arc::new(config),
            styles: StyleService::new(anon),
            profiles: ProfileService::new(service),
        }
    }

    /// Production wiring: one PostgREST client per credential tier
    pub fn connect(config: AppConfig) -> Result<Self, StoreError> {
        let timeout = config.store.timeout();
        let anon = RestStore::new(&config.store.url, config.store.anon_key.clone(), timeout)?;
        let service = RestStore::new(&config.store.url, config.store.service_role_key.clone(), timeout)?;
        Ok(Self::new(config, Arc::new(anon), Arc::new(service)))
    }

    /// Development wiring: both tiers share one in-process store, nothing leaves the process
    pub fn in_memory(config: AppConfig) -> Self {
        let store: SharedStore = Arc::new(MemoryStore::new());
        Self::new(config, store.clone(), store)
    }
}
