//! Points of interest and the amenity categories they can be filtered by.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Error returned when a category is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported category: {0:?}")]
pub struct InvalidCategory(String);

/// Amenity categories that may be interpolated into a place query.
///
/// Only these values ever reach the backend; anything else is rejected
/// while parsing.
///
/// # Examples
///
/// ```
/// use midpoint_server::domain::Category;
///
/// let bar: Category = "bar".parse().unwrap();
/// assert_eq!(bar.as_str(), "bar");
/// assert_eq!(bar.label(), "Bar");
///
/// assert!("nightclub".parse::<Category>().is_err());
/// assert!("bar\"]".parse::<Category>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Restaurant,
    Cafe,
    FastFood,
    Bar,
    Pub,
}

impl Category {
    /// Every allowed category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Restaurant,
        Category::Cafe,
        Category::FastFood,
        Category::Bar,
        Category::Pub,
    ];

    /// Categories searched when the user has not chosen one.
    pub const DEFAULT_SET: [Category; 3] =
        [Category::Restaurant, Category::Cafe, Category::FastFood];

    /// The OSM `amenity` tag value.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Cafe => "cafe",
            Category::FastFood => "fast_food",
            Category::Bar => "bar",
            Category::Pub => "pub",
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Category::Restaurant => "Restaurant",
            Category::Cafe => "Café",
            Category::FastFood => "Fast food",
            Category::Bar => "Bar",
            Category::Pub => "Pub",
        }
    }
}

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| InvalidCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a raw amenity value, falling back to the value itself.
pub fn category_label(amenity: &str) -> &str {
    match amenity.parse::<Category>() {
        Ok(category) => category.label(),
        Err(_) => amenity,
    }
}

/// A named point of interest near the active search anchor.
///
/// `distance_meters` is measured from the anchor that was active when the
/// search was issued.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub coordinate: Coordinate,
    pub name: String,
    /// Raw `amenity` tag value; may be outside the allow-list when the
    /// backend returns something unexpected.
    pub category: String,
    pub cuisine: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub distance_meters: u32,
}
