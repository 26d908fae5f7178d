//! API definition types
//!
//! Defines the structure of the YAML file describing an API and its models.

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::model::{Model, ModelMeta};
use crate::query::{Manager, Transport};
use crate::types::{BackoffType, StringMap};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// API Definition
// ============================================================================

/// A REST API and the model kinds it exposes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ApiDefinition {
    /// API name
    pub name: String,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpDefinition,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
    /// Model kinds
    pub models: Vec<ModelMeta>,
}

impl ApiDefinition {
    /// Names of the defined models, in file order
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Look up a model by name
    pub fn model(&self, name: &str) -> Result<Arc<ModelMeta>> {
        self.models
            .iter()
            .find(|m| m.name == name)
            .map(|m| Arc::new(m.clone()))
            .ok_or_else(|| {
                Error::config(format!(
                    "Model '{}' not found. Available models: {}",
                    name,
                    self.model_names().join(", ")
                ))
            })
    }

    /// HTTP client carrying the API headers and the model's credentials
    pub fn client_for(&self, meta: &ModelMeta) -> Result<HttpClient> {
        HttpClient::with_auth(self.http.client_config(&self.headers), meta.auth())
    }

    /// Manager for a model, talking HTTP
    pub fn manager(&self, name: &str) -> Result<Manager<Model>> {
        let meta = self.model(name)?;
        let transport: Arc<dyn Transport> = Arc::new(self.client_for(&meta)?);
        Manager::for_model(meta, transport)
    }
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpDefinition {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum retries
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Rate limit (requests per second)
    #[serde(default)]
    pub requests_per_second: Option<u32>,
    /// Backoff between retries
    #[serde(default)]
    pub backoff: BackoffType,
    /// User agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            requests_per_second: None,
            backoff: BackoffType::default(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

impl HttpDefinition {
    /// Build the client config, adding `headers` as default headers
    pub fn client_config(&self, headers: &StringMap) -> HttpClientConfig {
        let defaults = HttpClientConfig::default();
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(self.backoff, defaults.initial_backoff, defaults.max_backoff);

        builder = match self.requests_per_second {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        };
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}
