use std::env;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Versioned route prefix, e.g. `/api/v1`
    pub prefix: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub frontend_url: String,
    pub cors_origins: Vec<String>,
    /// `https://<project>-*.vercel.app`, derived from a Vercel frontend URL
    pub preview_origin_prefix: Option<String>,
}

#[derive(Clone)]
pub struct StoreConfig {
    pub url: String,
    pub anon_key: String,
    pub service_role_key: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("service_role_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

const LOCAL_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
];

impl AppConfig {
    /// Load from the process environment (after `.env`, if the caller loaded one)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Environment config for a server backed by the in-memory store; Supabase keys are optional
    pub fn from_env_without_store() -> Result<Self, ConfigError> {
        Self::load(|key| env::var(key).ok(), false)
    }

    /// Build from an arbitrary key lookup.
    ///
    /// The store URL and both credentials are mandatory; there are no built-in fallbacks.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load(lookup, true)
    }

    /// Same as `from_lookup`, but missing store settings are left empty
    pub fn from_lookup_without_store<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::load(lookup, false)
    }

    fn load<F>(lookup: F, store_required: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let environment = match var("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let mut config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        let store_var = |key: &'static str| match var(key) {
            Some(v) => Ok(v),
            None if store_required => Err(ConfigError::Missing(key)),
            None => Ok(String::new()),
        };
        config.store.url = store_var("SUPABASE_URL")?;
        config.store.anon_key = store_var("SUPABASE_ANON_KEY")?;
        config.store.service_role_key = store_var("SUPABASE_SERVICE_ROLE_KEY")?;
        if let Some(v) = var("SUPABASE_TIMEOUT_SECS") {
            config.store.timeout_secs = parse("SUPABASE_TIMEOUT_SECS", &v)?;
        }

        if let Some(v) = var("HOST") {
            config.api.host = v;
        }
        if let Some(v) = var("PORT") {
            config.api.port = parse("PORT", &v)?;
        }
        if let Some(v) = var("API_V1_PREFIX") {
            config.api.prefix = normalize_prefix(&v);
        }

        if let Some(v) = var("FRONTEND_URL") {
            config.security.frontend_url = v;
        }
        let extra = var("CORS_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
            .unwrap_or_else(Vec::new);
        config.security.resolve_origins(extra);

        Ok(config)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                prefix: "/api/v1".to_string(),
            },
            security: SecurityConfig::new("http://localhost:5173"),
            store: StoreConfig::empty(30),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                prefix: "/api/v1".to_string(),
            },
            security: SecurityConfig::new("http://localhost:5173"),
            store: StoreConfig::empty(15),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                prefix: "/api/v1".to_string(),
            },
            security: SecurityConfig::new("http://localhost:5173"),
            store: StoreConfig::empty(10),
        }
    }
}

impl StoreConfig {
    fn empty(timeout_secs: u64) -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            service_role_key: String::new(),
            timeout_secs,
        }
    }
}

impl SecurityConfig {
    fn new(frontend_url: &str) -> Self {
        let mut security = Self {
            frontend_url: frontend_url.to_string(),
            cors_origins: Vec::new(),
            preview_origin_prefix: None,
        };
        security.resolve_origins(Vec::new());
        security
    }

    /// Frontend URL first, then local dev servers, then any extra origins
    fn resolve_origins(&mut self, extra: Vec<String>) {
        let mut origins = vec![self.frontend_url.trim_end_matches('/').to_string()];
        origins.extend(LOCAL_ORIGINS.iter().map(|s| s.to_string()));
        origins.extend(extra);
        let mut seen = std::collections::HashSet::new();
        origins.retain(|o| seen.insert(o.clone()));
        self.cors_origins = origins;

        self.preview_origin_prefix = if self.frontend_url.contains(".vercel.app") {
            let project = self
                .frontend_url
                .trim_start_matches("https://")
                .split('.')
                .next()
                .unwrap_or_default();
            Some(format!("https://{}-", project))
        } else {
            None
        };
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }

    /// Exact match against the configured list, or a Vercel preview deployment of the frontend
    pub fn origin_allowed(&self, origin: &str) -> bool {
        if self.allows_any_origin() || self.cors_origins.iter().any(|o| o == origin) {
            return true;
        }
        match &self.preview_origin_prefix {
            Some(prefix) => origin.starts_with(prefix.as_str()) && origin.ends_with(".vercel.app"),
            None => false,
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { key, value: value.to_string() })
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
