use anyhow::{anyhow, Context};
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Thin HTTP client for a running FCBL API server
pub struct ApiClient {
    client: reqwest::Client,
    server: Url,
    prefix: String,
}

impl ApiClient {
    pub fn new(server: &str, prefix: &str) -> anyhow::Result<Self> {
        let server = Url::parse(server).with_context(|| format!("invalid server URL '{}'", server))?;
        let prefix = prefix.trim_matches('/');
        Ok(Self {
            client: reqwest::Client::new(),
            server,
            prefix: if prefix.is_empty() { String::new() } else { format!("/{}", prefix) },
        })
    }

    /// URL for a path under the versioned API prefix
    pub fn api_url(&self, path: &str) -> anyhow::Result<Url> {
        self.url(&format!("{}{}", self.prefix, path))
    }

    /// URL for a single record: `id` becomes one percent-encoded path segment
    pub fn record_url(&self, collection: &str, id: &str) -> anyhow::Result<Url> {
        let mut url = self.api_url(collection)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("server URL cannot take path segments"))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// URL for a path at the server root
    pub fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.server
            .join(path)
            .with_context(|| format!("invalid request path '{}'", path))
    }

    pub async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> anyhow::Result<Value> {
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, url))?;
        let status = response.status();
        let payload: Value = response.json().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = payload
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"));
            return Err(anyhow!("{} (HTTP {})", message, status.as_u16()));
        }
        Ok(payload)
    }

    pub async fn api(&self, method: Method, path: &str, body: Option<&Value>) -> anyhow::Result<Value> {
        let url = self.api_url(path)?;
        self.send(method, url, body).await
    }

    pub async fn record(
        &self,
        method: Method,
        collection: &str,
        id: &str,
        body: Option<&Value>,
    ) -> anyhow::Result<Value> {
        let url = self.record_url(collection, id)?;
        self.send(method, url, body).await
    }
}
