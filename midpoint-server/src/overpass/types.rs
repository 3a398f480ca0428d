//! Feature source trait and Overpass JSON DTOs.
//!
//! The DTOs map directly to the Overpass `[out:json]` format. Every field
//! other than `type` is optional because the interpreter omits fields
//! rather than sending nulls.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::Feature;
use crate::query::QuerySpec;

use super::error::OverpassError;

/// Anything that can answer a spatial feature query.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Run the query and return every element it matched, in backend order.
    async fn fetch_features(&self, query: &QuerySpec) -> Result<Vec<Feature>, OverpassError>;
}

/// Top-level interpreter response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponseDto {
    pub elements: Vec<ElementDto>,

    /// Set when the interpreter hit a runtime error (e.g. timeout) but
    /// still answered 200.
    pub remark: Option<String>,
}

/// A node, way or relation.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementDto {
    /// "node", "way" or "relation".
    #[serde(rename = "type")]
    pub kind: String,

    pub id: Option<i64>,

    /// Present on nodes.
    pub lat: Option<f64>,

    /// Present on nodes.
    pub lon: Option<f64>,

    /// Present on ways/relations when queried with `out center`.
    pub center: Option<LatLonDto>,

    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// A bare latitude/longitude pair.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLonDto {
    pub lat: f64,
    pub lon: f64,
}
