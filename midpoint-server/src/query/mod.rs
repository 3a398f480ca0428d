//! Spatial query construction.
//!
//! Builds Overpass QL requests for "stations near a point" and "places near
//! a point". The resulting [`QuerySpec`] is opaque to the rest of the crate:
//! only the Overpass adapter looks at its text.
//!
//! Category values come from the [`Category`] allow-list, and every string
//! interpolated into a tag filter is escaped regardless.

use serde::Serialize;

use crate::domain::{
    Category, Coordinate, PLACE_SEARCH_RADIUS_METERS, STATION_SEARCH_RADIUS_METERS,
};

/// Server-side timeout embedded in every query, in seconds.
const QUERY_TIMEOUT_SECS: u32 = 25;

/// A backend request ready to be sent to a feature source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuerySpec {
    body: String,
}

impl QuerySpec {
    /// The raw query text.
    pub fn as_str(&self) -> &str {
        &self.body
    }
}

/// Query for railway/public-transport stations within the default 3 km radius.
pub fn build_station_query(center: Coordinate) -> QuerySpec {
    build_station_query_with_radius(center, STATION_SEARCH_RADIUS_METERS)
}

/// Query for railway/public-transport stations within `radius_meters`.
pub fn build_station_query_with_radius(center: Coordinate, radius_meters: u32) -> QuerySpec {
    let around = around_filter(center, radius_meters);
    let lines = [
        format!("  node{}{around};", tag_equals("railway", "station")),
        format!(
            "  node{}{}{around};",
            tag_equals("public_transport", "station"),
            tag_present("railway")
        ),
    ];

    QuerySpec {
        body: wrap_union(&lines),
    }
}

/// Query for places within the default 1 km radius.
///
/// With no category, searches the default set (restaurant, café, fast food).
///
/// # Examples
///
/// ```
/// use midpoint_server::domain::{Category, Coordinate};
/// use midpoint_server::query::build_place_query;
///
/// let center = Coordinate::new(35.6695, 139.734).unwrap();
/// let query = build_place_query(center, Some(Category::Bar));
/// assert!(query.as_str().contains("^(bar)$"));
/// assert!(!query.as_str().contains("restaurant"));
/// ```
pub fn build_place_query(center: Coordinate, category: Option<Category>) -> QuerySpec {
    build_place_query_with_radius(center, category, PLACE_SEARCH_RADIUS_METERS)
}

/// Query for places of `category` (or the default set) within `radius_meters`.
pub fn build_place_query_with_radius(
    center: Coordinate,
    category: Option<Category>,
    radius_meters: u32,
) -> QuerySpec {
    let categories: Vec<Category> = match category {
        Some(c) => vec![c],
        None => Category::DEFAULT_SET.to_vec(),
    };

    let alternation = categories
        .iter()
        .map(|c| escape_regex(c.as_str()))
        .collect::<Vec<_>>()
        .join("|");
    let selector = tag_matches("amenity", &format!("^({alternation})$"));
    let around = around_filter(center, radius_meters);

    let lines: Vec<String> = ["node", "way", "relation"]
        .into_iter()
        .map(|element| format!("  {element}{selector}{around};"))
        .collect();

    QuerySpec {
        body: wrap_union(&lines),
    }
}

fn wrap_union(lines: &[String]) -> String {
    format!(
        "[out:json][timeout:{QUERY_TIMEOUT_SECS}];\n(\n{}\n);\nout center tags;",
        lines.join("\n")
    )
}

fn around_filter(center: Coordinate, radius_meters: u32) -> String {
    format!(
        "(around:{radius_meters},{},{})",
        center.latitude(),
        center.longitude()
    )
}

fn tag_equals(key: &str, value: &str) -> String {
    format!("[\"{}\"=\"{}\"]", escape_quoted(key), escape_quoted(value))
}

fn tag_matches(key: &str, pattern: &str) -> String {
    format!("[\"{}\"~\"{}\"]", escape_quoted(key), escape_quoted(pattern))
}

fn tag_present(key: &str) -> String {
    format!("[\"{}\"]", escape_quoted(key))
}

fn escape_quoted(raw: &str) -> String {
    raw.replace('\\', r"\\").replace('"', "\\\"")
}

/// Escape regex metacharacters so a value matches literally.
fn escape_regex(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(
            ch,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
