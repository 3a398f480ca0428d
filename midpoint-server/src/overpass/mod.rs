//! Overpass API adapter.
//!
//! Sends [`QuerySpec`](crate::query::QuerySpec) payloads to an Overpass
//! interpreter and converts the returned elements into
//! [`Feature`](crate::domain::Feature) values.
//!
//! Key characteristics of Overpass responses:
//! - Nodes carry `lat`/`lon` directly; ways and relations only carry a
//!   `center` when the query asks for `out center`
//! - Tags are free-form; `name` is frequently missing
//! - A 429 or 504 means the shared instance is overloaded, not that the
//!   query is wrong

mod client;
mod convert;
mod error;
mod types;

pub use client::{OverpassClient, OverpassConfig};
pub use convert::convert_response;
pub use error::OverpassError;
pub use types::{ElementDto, FeatureSource, LatLonDto, OverpassResponseDto};
