//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::advisory::AdvisoryEvent;
use crate::domain::{Category, Coordinate, Place, Slot, Station, category_label};
use crate::orchestrator::Outcome;
use crate::session::{LookupStatus, SearchAnchor, Session, SessionId, SlotStatus, SortKey};

/// Response to session creation.
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub id: SessionId,
}

/// Request to forward-geocode an address into a slot.
#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub text: String,
}

/// A coordinate as sent by the browser.
///
/// Validated separately so that an out-of-range value is a 400 rather than
/// a body rejection.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CoordinateRequest {
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of the browser's geolocation request: either a coordinate or
/// the error it reported.
#[derive(Debug, Deserialize)]
pub struct DeviceLocationRequest {
    pub coordinate: Option<CoordinateRequest>,
    pub error: Option<String>,
}

/// Keystroke notification for the input advisory.
#[derive(Debug, Deserialize)]
pub struct TextChangeRequest {
    pub text: String,
}

/// Category filter; `null` selects the default set.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub sort: String,
}

/// One input slot in a snapshot.
#[derive(Debug, Serialize)]
pub struct SlotResult {
    pub slot: Slot,
    pub status: SlotStatus,
    pub label: Option<String>,
}

/// Station list with its status.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub status: LookupStatus,
    pub stations: Vec<Station>,
}

/// A place with its display category.
#[derive(Debug, Serialize)]
pub struct PlaceResult {
    #[serde(flatten)]
    pub place: Place,
    pub category_label: String,
}

impl PlaceResult {
    pub fn from_place(place: Place) -> Self {
        Self {
            category_label: category_label(&place.category).to_string(),
            place,
        }
    }
}

/// Sorted place view with its status.
#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub status: LookupStatus,
    pub sort: SortKey,
    pub places: Vec<PlaceResult>,
}

/// Full session state as seen by the client.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub slots: Vec<SlotResult>,
    pub midpoint: Option<Coordinate>,
    pub anchor: Option<SearchAnchor>,
    pub category: Option<Category>,
    pub stations: StationsResponse,
    pub places: PlacesResponse,
    pub advisory: Option<Slot>,
}

impl SessionSnapshot {
    pub fn from_session(id: SessionId, session: &Session) -> Self {
        let slots = Slot::ALL
            .into_iter()
            .map(|slot| {
                let entry = session.locations.slot(slot);
                SlotResult {
                    slot,
                    status: entry.status(),
                    label: entry.label().map(str::to_string),
                }
            })
            .collect();

        Self {
            id,
            slots,
            midpoint: session.locations.midpoint(),
            anchor: session.locations.anchor(),
            category: session.category,
            stations: StationsResponse::from_session(session),
            places: PlacesResponse::from_session(session),
            advisory: session.advisory.visible(),
        }
    }
}

impl StationsResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            status: session.stations.status.clone(),
            stations: session.stations.stations.clone(),
        }
    }
}

impl PlacesResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            status: session.places.status.clone(),
            sort: session.places.results.sort_key(),
            places: session
                .places
                .results
                .view()
                .into_iter()
                .map(PlaceResult::from_place)
                .collect(),
        }
    }
}

/// Outcome of a mutating operation plus the resulting state.
#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub outcome: Outcome,
    pub session: SessionSnapshot,
}

/// Advisory visibility changes since the last poll.
#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
    pub events: Vec<AdvisoryEvent>,
    pub visible: Option<Slot>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
