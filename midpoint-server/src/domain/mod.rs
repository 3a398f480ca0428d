//! Domain types for the midpoint finder.
//!
//! This module contains the core value types: validated coordinates, the
//! two input slots, stations, places and the raw features they are built
//! from. Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod coordinate;
mod feature;
mod geo;
mod place;
mod slot;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use feature::Feature;
pub use geo::{
    EARTH_RADIUS_METERS, PLACE_SEARCH_RADIUS_METERS, STATION_SEARCH_RADIUS_METERS,
    distance_meters, midpoint,
};
pub use place::{Category, InvalidCategory, Place, category_label};
pub use slot::{InvalidSlot, Slot};
pub use station::Station;
