//! Overpass client error types.

/// Errors from the Overpass HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited or the instance is overloaded
    #[error("rate limited by Overpass")]
    RateLimited,

    /// Interpreter answered but reported a runtime error in `remark`
    #[error("query failed: {message}")]
    QueryFailed { message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}
