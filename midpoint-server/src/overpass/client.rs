//! Overpass HTTP client.
//!
//! Posts query text to an Overpass interpreter. Uses a semaphore to cap
//! concurrent requests, since public instances allow only a couple of
//! parallel slots per client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tokio::sync::Semaphore;
use tracing::{debug, instrument};

use crate::domain::Feature;
use crate::query::QuerySpec;

use super::convert::convert_response;
use super::error::OverpassError;
use super::types::{FeatureSource, OverpassResponseDto};

/// Default interpreter endpoint.
const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Default identifying user agent.
const DEFAULT_USER_AGENT: &str = "midpoint-server/0.1";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 2;

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoint URL
    pub endpoint: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Optional contact address sent in a `Contact` header
    pub contact: Option<String>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OverpassConfig {
    /// Create a config pointing at the main public instance.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            contact: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint (for testing or a private instance).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the contact header.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Overpass interpreter client.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    endpoint: String,
    semaphore: Arc<Semaphore>,
}

impl OverpassClient {
    /// Create a new Overpass client with the given configuration.
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let mut headers = HeaderMap::new();

        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|_| {
            OverpassError::Api {
                status: 0,
                message: "Invalid User-Agent format".to_string(),
            }
        })?;
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(contact) = &config.contact {
            let contact = HeaderValue::from_str(contact).map_err(|_| OverpassError::Api {
                status: 0,
                message: "Invalid contact format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("contact"), contact);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }
}

#[async_trait]
impl FeatureSource for OverpassClient {
    #[instrument(skip_all)]
    async fn fetch_features(&self, query: &QuerySpec) -> Result<Vec<Feature>, OverpassError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| OverpassError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self
            .http
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        let decoded: OverpassResponseDto =
            serde_json::from_str(&body).map_err(|e| OverpassError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        let features = convert_response(decoded)?;
        debug!(count = features.len(), "overpass query returned features");
        Ok(features)
    }
}
