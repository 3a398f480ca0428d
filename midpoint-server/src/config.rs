//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::nominatim::NominatimConfig;
use crate::orchestrator::SearchConfig;
use crate::overpass::OverpassConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Error building the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    pub nominatim: NominatimConfig,
    pub overpass: OverpassConfig,
    pub cache: CacheConfig,
    pub search: SearchConfig,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    ///
    /// - `MIDPOINT_BIND_ADDR` (default `127.0.0.1:3000`)
    /// - `MIDPOINT_STATIC_DIR` (default `static`)
    /// - `NOMINATIM_BASE_URL`, `OVERPASS_URL`: backend endpoints
    /// - `MIDPOINT_USER_AGENT`, `MIDPOINT_CONTACT`: identification sent to
    ///   both backends, as their usage policies require
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get("MIDPOINT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "MIDPOINT_BIND_ADDR",
            value: bind.clone(),
            reason: e.to_string(),
        })?;

        let static_dir = PathBuf::from(
            get("MIDPOINT_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        );

        let mut nominatim = NominatimConfig::new();
        let mut overpass = OverpassConfig::new();

        if let Some(url) = get("NOMINATIM_BASE_URL") {
            check_url("NOMINATIM_BASE_URL", &url)?;
            nominatim = nominatim.with_base_url(url);
        }
        if let Some(url) = get("OVERPASS_URL") {
            check_url("OVERPASS_URL", &url)?;
            overpass = overpass.with_endpoint(url);
        }
        if let Some(agent) = get("MIDPOINT_USER_AGENT") {
            nominatim = nominatim.with_user_agent(agent.clone());
            overpass = overpass.with_user_agent(agent);
        }
        if let Some(contact) = get("MIDPOINT_CONTACT") {
            overpass = overpass.with_contact(contact);
        }

        Ok(Self {
            bind_addr,
            static_dir,
            nominatim,
            overpass,
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
        })
    }
}

fn check_url(var: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected an http(s) URL".to_string(),
        })
    }
}
