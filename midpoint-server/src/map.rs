//! Read-only description of what the map should display.
//!
//! The map collaborator consumes a [`MapScene`] and never writes back; all
//! map interaction comes in through the regular session operations.

use serde::Serialize;

use crate::domain::{Coordinate, Place, Slot};
use crate::session::Session;

/// Fraction of the box span added on each side when fitting the view.
pub const DEFAULT_PADDING_RATIO: f64 = 0.1;

/// Smallest padding in degrees, so a box around one point still has area.
const MIN_PADDING_DEGREES: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Primary,
    Secondary,
    Midpoint,
    Station,
    Place,
}

impl From<Slot> for MarkerKind {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Primary => MarkerKind::Primary,
            Slot::Secondary => MarkerKind::Secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub coordinate: Coordinate,
    pub label: Option<String>,
    /// Set on the station used as the search anchor, or on the focused place.
    pub selected: bool,
}

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box containing every point, or `None` for no points.
    pub fn around(points: impl IntoIterator<Item = Coordinate>) -> Option<Bounds> {
        points.into_iter().fold(None, |acc, c| {
            let (lat, lon) = (c.latitude(), c.longitude());
            Some(match acc {
                None => Bounds {
                    south: lat,
                    west: lon,
                    north: lat,
                    east: lon,
                },
                Some(b) => Bounds {
                    south: b.south.min(lat),
                    west: b.west.min(lon),
                    north: b.north.max(lat),
                    east: b.east.max(lon),
                },
            })
        })
    }

    /// Grow each side by `ratio` of the span, clamped to valid ranges.
    pub fn padded(self, ratio: f64) -> Bounds {
        let lat_pad = ((self.north - self.south) * ratio).max(MIN_PADDING_DEGREES);
        let lon_pad = ((self.east - self.west) * ratio).max(MIN_PADDING_DEGREES);
        Bounds {
            south: (self.south - lat_pad).max(-90.0),
            west: (self.west - lon_pad).max(-180.0),
            north: (self.north + lat_pad).min(90.0),
            east: (self.east + lon_pad).min(180.0),
        }
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        (self.south..=self.north).contains(&c.latitude())
            && (self.west..=self.east).contains(&c.longitude())
    }
}

/// Markers plus the box the view should fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub markers: Vec<Marker>,
    /// Covers the two inputs and the midpoint; `None` with no input set.
    pub fit_bounds: Option<Bounds>,
    /// Details for the popup over the focused place.
    pub popup: Option<Place>,
}

impl MapScene {
    pub fn from_session(session: &Session, padding_ratio: f64) -> Self {
        let locations = &session.locations;
        let mut markers = Vec::new();
        let mut fit_points = Vec::new();

        for slot in Slot::ALL {
            let entry = locations.slot(slot);
            if let Some(coordinate) = entry.coordinate() {
                markers.push(Marker {
                    kind: slot.into(),
                    coordinate,
                    label: entry.label().map(str::to_string),
                    selected: false,
                });
                fit_points.push(coordinate);
            }
        }

        if let Some(midpoint) = locations.midpoint() {
            markers.push(Marker {
                kind: MarkerKind::Midpoint,
                coordinate: midpoint,
                label: None,
                selected: locations.selected_station().is_none(),
            });
            fit_points.push(midpoint);
        }

        let selected = locations.selected_station();
        markers.extend(session.stations.stations.iter().map(|station| Marker {
            kind: MarkerKind::Station,
            coordinate: station.coordinate,
            label: Some(station.name.clone()),
            selected: selected.is_some_and(|s| s == station),
        }));

        let results = &session.places.results;
        let focused = results.focused();
        markers.extend(results.view().into_iter().map(|place| Marker {
            kind: MarkerKind::Place,
            coordinate: place.coordinate,
            selected: focused == Some(&place),
            label: Some(place.name),
        }));

        MapScene {
            markers,
            fit_bounds: Bounds::around(fit_points).map(|b| b.padded(padding_ratio)),
            popup: focused.cloned(),
        }
    }
}
