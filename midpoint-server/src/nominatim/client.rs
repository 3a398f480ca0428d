//! Nominatim HTTP client.
//!
//! Provides async forward and reverse geocoding against a Nominatim
//! instance, with request spacing to respect the public usage policy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::domain::Coordinate;

use super::error::GeocodeError;
use super::types::{GeocodeMatch, Geocoder, ReverseResultDto, SearchResultDto};

/// Default base URL for the public Nominatim instance.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default identifying user agent.
const DEFAULT_USER_AGENT: &str = "midpoint-server/0.1";

/// Minimum spacing between requests to the public instance.
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1100);

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// User-Agent header value (required by the usage policy)
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Minimum time between two outgoing requests
    pub min_interval: Duration,
    /// Optional `accept-language` preference, e.g. "ja,en"
    pub accept_language: Option<String>,
}

impl NominatimConfig {
    /// Create a config pointing at the public instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            min_interval: DEFAULT_MIN_INTERVAL,
            accept_language: None,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the minimum spacing between requests.
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Set the preferred response language.
    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = Some(language.into());
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Nominatim API client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    accept_language: Option<String>,
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl NominatimClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();

        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| GeocodeError::Api {
                status: 0,
                message: "Invalid User-Agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept_language: config.accept_language,
            min_interval: config.min_interval,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Wait until at least `min_interval` has passed since the last request.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(?wait, "spacing Nominatim request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Issue a GET and return the body of a successful response.
    async fn get_text(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<String, GeocodeError> {
        self.pace().await;

        if let Some(language) = &self.accept_language {
            params.push(("accept-language", language.clone()));
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
        let params = vec![
            ("q", address.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
        ];
        let body = self.get_text("search", params).await?;

        let results: Vec<SearchResultDto> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        match results.into_iter().next() {
            Some(first) => {
                let found = first.into_match()?;
                debug!(coordinate = %found.coordinate, "geocoded address");
                Ok(Some(found))
            }
            None => {
                debug!("no geocoding candidates");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self), fields(coordinate = %coordinate))]
    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, GeocodeError> {
        let params = vec![
            ("lat", coordinate.latitude().to_string()),
            ("lon", coordinate.longitude().to_string()),
            ("format", "jsonv2".to_string()),
        ];
        let body = self.get_text("reverse", params).await?;

        let result: ReverseResultDto =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
            })?;

        Ok(result.display_name.filter(|n| !n.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = NominatimConfig::new()
            .with_base_url("http://localhost:8080")
            .with_user_agent("test-agent/1.0")
            .with_timeout(3)
            .with_min_interval(Duration::ZERO)
            .with_accept_language("ja,en");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.min_interval, Duration::ZERO);
        assert_eq!(config.accept_language.as_deref(), Some("ja,en"));
    }

    #[test]
    fn config_defaults() {
        let config = NominatimConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.min_interval, DEFAULT_MIN_INTERVAL);
        assert!(config.accept_language.is_none());
    }

    #[test]
    fn client_creation() {
        let client = NominatimClient::new(NominatimConfig::new());
        assert!(client.is_ok());
    }

    #[test]
    fn invalid_user_agent_rejected() {
        let config = NominatimConfig::new().with_user_agent("bad\nagent");
        assert!(NominatimClient::new(config).is_err());
    }

    #[test]
    fn trailing_slash_trimmed() {
        let config = NominatimConfig::new().with_base_url("http://localhost:8080/");
        let client = NominatimClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test(start_paused = true)]
    async fn pace_spaces_requests() {
        let config = NominatimConfig::new().with_min_interval(Duration::from_millis(500));
        let client = NominatimClient::new(config).unwrap();

        let start = Instant::now();
        client.pace().await;
        client.pace().await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
