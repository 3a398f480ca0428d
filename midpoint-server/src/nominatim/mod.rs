//! Nominatim geocoding adapter.
//!
//! Forward geocoding turns a free-text address into a single best-match
//! coordinate; reverse geocoding turns a coordinate into a display label.
//! Both go through the [`Geocoder`] trait so the orchestrator can be driven
//! by fakes in tests and by the caching wrapper in production.
//!
//! Nominatim's usage policy allows at most one request per second and
//! requires an identifying `User-Agent`; the client enforces both.

mod client;
mod error;
mod types;

pub use client::{NominatimClient, NominatimConfig};
pub use error::GeocodeError;
pub use types::{GeocodeMatch, Geocoder};
