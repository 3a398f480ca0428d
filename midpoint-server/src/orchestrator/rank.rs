//! Turning raw features into stations and places.

use crate::domain::{Coordinate, Feature, Place, Station, distance_meters};

/// Build the station list for a midpoint.
///
/// Features without a position or a name are dropped. The rest are
/// measured from `center`, sorted nearest-first (ties keep backend order)
/// and cut to `limit`.
pub fn rank_stations(features: Vec<Feature>, center: Coordinate, limit: usize) -> Vec<Station> {
    let mut stations: Vec<Station> = features
        .iter()
        .filter_map(|feature| {
            let (coordinate, name) = feature.located_name()?;
            Some(Station {
                coordinate,
                name: name.to_string(),
                operator: feature.tag("operator").map(str::to_string),
                network: feature.tag("network").map(str::to_string),
                distance_meters: distance_meters(center, coordinate),
            })
        })
        .collect();

    stations.sort_by_key(|s| s.distance_meters);
    stations.truncate(limit);
    stations
}

/// Build the place list for an anchor.
///
/// Places keep backend order; only the first `limit` usable features are
/// kept. Sorting is left to the result view.
pub fn collect_places(features: Vec<Feature>, anchor: Coordinate, limit: usize) -> Vec<Place> {
    features
        .iter()
        .filter_map(|feature| {
            let (coordinate, name) = feature.located_name()?;
            Some(Place {
                coordinate,
                name: name.to_string(),
                category: feature.tag("amenity").unwrap_or_default().to_string(),
                cuisine: feature.tag("cuisine").map(str::to_string),
                phone: feature.tag("phone").map(str::to_string),
                website: feature.tag("website").map(str::to_string),
                distance_meters: distance_meters(anchor, coordinate),
            })
        })
        .take(limit)
        .collect()
}
