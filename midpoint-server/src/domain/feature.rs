//! Raw features returned by the spatial backend.

use std::collections::HashMap;

use super::Coordinate;

/// A station or place candidate as delivered by the backend.
///
/// Either half may be missing: elements without geometry have no
/// coordinate, and many elements carry no `name` tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    /// Node position, or the centroid of a way/relation.
    pub coordinate: Option<Coordinate>,
    pub tags: HashMap<String, String>,
}

impl Feature {
    /// Create a feature with no tags.
    pub fn new(coordinate: Option<Coordinate>) -> Self {
        Self {
            coordinate,
            tags: HashMap::new(),
        }
    }

    /// Add a tag (builder style).
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// A tag value, treating blank values as absent.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// The `name` tag, if present and non-blank.
    pub fn name(&self) -> Option<&str> {
        self.tag("name")
    }

    /// Coordinate and name together, when both are present.
    pub fn located_name(&self) -> Option<(Coordinate, &str)> {
        Some((self.coordinate?, self.name()?))
    }
}
