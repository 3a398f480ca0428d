//! Geocoding error types.

/// Errors from the Nominatim HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by Nominatim")]
    RateLimited,

    /// Failed to parse response JSON, or it held an unusable coordinate
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
