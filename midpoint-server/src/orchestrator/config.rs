//! Search configuration for the orchestrator.

use crate::domain::{PLACE_SEARCH_RADIUS_METERS, STATION_SEARCH_RADIUS_METERS};

/// Configuration parameters for station and place searches.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Radius around the midpoint searched for stations (meters).
    pub station_radius_meters: u32,

    /// Radius around the active anchor searched for places (meters).
    pub place_radius_meters: u32,

    /// Maximum number of stations kept, nearest first.
    pub max_stations: usize,

    /// Maximum number of places kept, in arrival order.
    pub max_places: usize,
}

impl SearchConfig {
    pub fn with_station_radius(mut self, meters: u32) -> Self {
        self.station_radius_meters = meters;
        self
    }

    pub fn with_place_radius(mut self, meters: u32) -> Self {
        self.place_radius_meters = meters;
        self
    }

    pub fn with_max_stations(mut self, n: usize) -> Self {
        self.max_stations = n;
        self
    }

    pub fn with_max_places(mut self, n: usize) -> Self {
        self.max_places = n;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            station_radius_meters: STATION_SEARCH_RADIUS_METERS,
            place_radius_meters: PLACE_SEARCH_RADIUS_METERS,
            max_stations: 10,
            max_places: 20,
        }
    }
}
