//! Search orchestration.
//!
//! Connects user actions on a [`Session`](crate::session::Session) to the
//! geocoder and the feature source: resolving addresses, labelling clicked
//! coordinates, finding stations around the midpoint and places around the
//! active anchor.

mod config;
mod rank;
mod search;


pub use config::SearchConfig;
pub use rank::{collect_places, rank_stations};
pub use search::{Outcome, SearchError, SearchOrchestrator};
