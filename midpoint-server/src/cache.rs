//! Caching layer for geocoding and feature queries.
//!
//! Geocodes change rarely, so they are kept for a day. Feature queries are
//! only cached briefly: the same query text is typically re-issued when a
//! user toggles between anchors or categories, and the public Overpass
//! instances are the scarcest resource.
//!
//! Only successful responses are cached; "no match" counts as a success.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Coordinate, Feature};
use crate::nominatim::{GeocodeError, GeocodeMatch, Geocoder};
use crate::overpass::{FeatureSource, OverpassError};
use crate::query::QuerySpec;

/// Reverse-geocode key: coordinate scaled by 1e5 and rounded (≈1 m).
type ReverseKey = (i64, i64);

/// Configuration for the caches.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for forward and reverse geocodes.
    pub geocode_ttl: Duration,

    /// TTL for feature query results.
    pub feature_ttl: Duration,

    /// Maximum number of entries per cache.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            geocode_ttl: Duration::from_secs(24 * 60 * 60),
            feature_ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Lowercase, trim and collapse internal whitespace.
fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn reverse_key(coordinate: Coordinate) -> ReverseKey {
    let scale = |v: f64| (v * 1e5).round() as i64;
    (scale(coordinate.latitude()), scale(coordinate.longitude()))
}

/// Geocoder with caching.
///
/// Wraps any [`Geocoder`] and caches forward and reverse lookups.
pub struct CachedGeocoder<G> {
    inner: G,
    forward: MokaCache<String, Option<GeocodeMatch>>,
    reverse: MokaCache<ReverseKey, Option<String>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let forward = MokaCache::builder()
            .time_to_live(config.geocode_ttl)
            .max_capacity(config.max_capacity)
            .build();
        let reverse = MokaCache::builder()
            .time_to_live(config.geocode_ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self {
            inner,
            forward,
            reverse,
        }
    }

    /// Access the wrapped geocoder for calls that bypass the cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of cached forward and reverse entries.
    pub fn entry_count(&self) -> u64 {
        self.forward.entry_count() + self.reverse.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.forward.invalidate_all();
        self.reverse.invalidate_all();
    }
}

#[async_trait]
impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, GeocodeError> {
        let key = normalize_address(address);

        if let Some(cached) = self.forward.get(&key).await {
            trace!(%key, "forward geocode cache hit");
            return Ok(cached);
        }

        let found = self.inner.geocode(address).await?;
        self.forward.insert(key, found.clone()).await;
        Ok(found)
    }

    async fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> Result<Option<String>, GeocodeError> {
        let key = reverse_key(coordinate);

        if let Some(cached) = self.reverse.get(&key).await {
            trace!(?key, "reverse geocode cache hit");
            return Ok(cached);
        }

        let label = self.inner.reverse_geocode(coordinate).await?;
        self.reverse.insert(key, label.clone()).await;
        Ok(label)
    }
}

/// Feature source with caching, keyed by query text.
pub struct CachedFeatureSource<F> {
    inner: F,
    queries: MokaCache<QuerySpec, Arc<Vec<Feature>>>,
}

impl<F: FeatureSource> CachedFeatureSource<F> {
    pub fn new(inner: F, config: &CacheConfig) -> Self {
        let queries = MokaCache::builder()
            .time_to_live(config.feature_ttl)
            .max_capacity(config.max_capacity)
            .build();
        Self { inner, queries }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn entry_count(&self) -> u64 {
        self.queries.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.queries.invalidate_all();
    }
}

#[async_trait]
impl<F: FeatureSource> FeatureSource for CachedFeatureSource<F> {
    async fn fetch_features(&self, query: &QuerySpec) -> Result<Vec<Feature>, OverpassError> {
        if let Some(cached) = self.queries.get(query).await {
            trace!("feature query cache hit");
            return Ok(cached.as_ref().clone());
        }

        let features = Arc::new(self.inner.fetch_features(query).await?);
        self.queries.insert(query.clone(), features.clone()).await;
        Ok(features.as_ref().clone())
    }
}
