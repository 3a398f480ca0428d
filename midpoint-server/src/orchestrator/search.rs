//! Asynchronous lookups against the geocoder and the feature source.
//!
//! Every backend call is issued under a ticket from the target's sequencer
//! (per slot, station list, place list). When the response arrives it is
//! applied only if that ticket is still current, so a slow, superseded
//! response can never overwrite a newer one. The session lock is only held
//! while issuing tickets and applying results, never across a backend call.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{Category, Coordinate, Slot};
use crate::nominatim::{GeocodeError, Geocoder};
use crate::overpass::{FeatureSource, OverpassError};
use crate::query::{build_place_query_with_radius, build_station_query_with_radius};
use crate::session::{LookupStatus, SearchAnchor, SessionHandle, Ticket};

use super::config::SearchConfig;
use super::rank::{collect_places, rank_stations};

/// Error from a search operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Forward geocoding found no match
    #[error("no location found for {query:?}")]
    NotFound { query: String },

    /// A backend could not be reached or returned garbage
    #[error("search service unavailable: {message}")]
    SearchUnavailable { message: String },

    /// Bad slot, category, station index or coordinate
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The device could not report its position
    #[error("current location unavailable: {0}")]
    LocationUnavailable(String),

    /// A search needs both locations to be set
    #[error("both locations must be set before searching")]
    IncompleteLocations,
}

impl From<GeocodeError> for SearchError {
    fn from(e: GeocodeError) -> Self {
        SearchError::SearchUnavailable {
            message: e.to_string(),
        }
    }
}

impl From<OverpassError> for SearchError {
    fn from(e: OverpassError) -> Self {
        SearchError::SearchUnavailable {
            message: e.to_string(),
        }
    }
}

/// What happened to the state an operation targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The response was written to the session.
    Applied,
    /// A newer request for the same target was issued first; the response
    /// was discarded.
    Superseded,
    /// Nothing to do (blank input, no free slot, no anchor).
    Skipped,
}

impl Outcome {
    /// Merge the outcomes of two searches run together.
    fn and(self, other: Outcome) -> Outcome {
        match (self, other) {
            (Outcome::Applied, _) | (_, Outcome::Applied) => Outcome::Applied,
            (Outcome::Superseded, _) | (_, Outcome::Superseded) => Outcome::Superseded,
            _ => Outcome::Skipped,
        }
    }
}

/// Drives lookups for sessions.
///
/// Holds no per-user state; every operation is handed the session it acts on.
#[derive(Clone)]
pub struct SearchOrchestrator {
    geocoder: Arc<dyn Geocoder>,
    features: Arc<dyn FeatureSource>,
    config: SearchConfig,
}

impl SearchOrchestrator {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        features: Arc<dyn FeatureSource>,
        config: SearchConfig,
    ) -> Self {
        Self {
            geocoder,
            features,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Forward-geocode `text` into `slot`.
    ///
    /// Blank text is skipped. On success the typed text becomes the slot
    /// label, and if both slots are now resolved the station and place
    /// searches run before this returns. Their failures are reported through
    /// the list statuses rather than as an error here.
    pub async fn resolve_address(
        &self,
        session: &SessionHandle,
        slot: Slot,
        text: &str,
    ) -> Result<Outcome, SearchError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Outcome::Skipped);
        }

        let ticket = {
            let mut s = session.lock().await;
            s.advisory.on_search_triggered(slot);
            s.locations.begin_lookup(slot)
        };

        let result = self.geocoder.geocode(text).await;

        let midpoint = {
            let mut s = session.lock().await;
            if !s.locations.is_current(slot, ticket) {
                debug!(%slot, "discarding superseded geocode");
                return Ok(Outcome::Superseded);
            }
            match result {
                Ok(Some(found)) => {
                    info!(%slot, coordinate = %found.coordinate, "address resolved");
                    s.locations
                        .set_from_address_lookup(slot, found.coordinate, text)
                }
                Ok(None) => {
                    s.locations.fail_lookup(slot, ticket);
                    return Err(SearchError::NotFound {
                        query: text.to_string(),
                    });
                }
                Err(e) => {
                    s.locations.fail_lookup(slot, ticket);
                    warn!(%slot, error = %e, "geocoding failed");
                    return Err(e.into());
                }
            }
        };

        if let Some(midpoint) = midpoint {
            self.refresh_around(session, midpoint).await;
        }
        Ok(Outcome::Applied)
    }

    /// Assign a coordinate directly, then backfill its label and, once both
    /// slots are resolved, search around the midpoint.
    pub async fn place_coordinate(
        &self,
        session: &SessionHandle,
        slot: Slot,
        coordinate: Coordinate,
    ) -> Outcome {
        self.assign_coordinate(session, Some(slot), coordinate).await
    }

    /// Fill the first unresolved slot with a clicked map position.
    ///
    /// Ignored when both slots are already resolved.
    pub async fn map_click(&self, session: &SessionHandle, coordinate: Coordinate) -> Outcome {
        self.assign_coordinate(session, None, coordinate).await
    }

    /// Apply the result of a device geolocation request.
    ///
    /// A failure leaves the session untouched.
    pub async fn use_device_location(
        &self,
        session: &SessionHandle,
        slot: Slot,
        result: Result<Coordinate, String>,
    ) -> Result<Outcome, SearchError> {
        match result {
            Ok(coordinate) => Ok(self.place_coordinate(session, slot, coordinate).await),
            Err(message) => {
                debug!(%slot, %message, "device location unavailable");
                Err(SearchError::LocationUnavailable(message))
            }
        }
    }

    async fn assign_coordinate(
        &self,
        session: &SessionHandle,
        slot: Option<Slot>,
        coordinate: Coordinate,
    ) -> Outcome {
        let (slot, ticket, midpoint) = {
            let mut s = session.lock().await;
            let Some(slot) = slot.or_else(|| s.locations.slot_for_click()) else {
                debug!(%coordinate, "both slots set, ignoring click");
                return Outcome::Skipped;
            };
            let (ticket, midpoint) = s.locations.set_coordinate(slot, coordinate);
            (slot, ticket, midpoint)
        };

        let label = self.resolve_coordinate_label(session, slot, coordinate, ticket);
        match midpoint {
            Some(midpoint) => {
                futures::join!(label, self.refresh_around(session, midpoint));
            }
            None => {
                label.await;
            }
        }
        Outcome::Applied
    }

    /// Best-effort reverse geocode into the slot label.
    ///
    /// Failures are logged and swallowed; the slot simply stays unlabelled.
    pub async fn resolve_coordinate_label(
        &self,
        session: &SessionHandle,
        slot: Slot,
        coordinate: Coordinate,
        ticket: Ticket,
    ) -> Outcome {
        let label = match self.geocoder.reverse_geocode(coordinate).await {
            Ok(Some(label)) => label,
            Ok(None) => return Outcome::Skipped,
            Err(e) => {
                debug!(%slot, error = %e, "reverse geocoding failed");
                return Outcome::Skipped;
            }
        };

        let mut s = session.lock().await;
        if s.locations.set_label(slot, ticket, label) {
            Outcome::Applied
        } else {
            Outcome::Superseded
        }
    }

    /// Search for stations around `center` and store the nearest ones.
    ///
    /// On failure the station list is emptied and marked failed; the
    /// previous list is never left in place.
    pub async fn find_stations(
        &self,
        session: &SessionHandle,
        center: Coordinate,
    ) -> Result<Outcome, SearchError> {
        let ticket = session.lock().await.stations.begin_search();

        let query = build_station_query_with_radius(center, self.config.station_radius_meters);
        let result = self.features.fetch_features(&query).await;

        let mut s = session.lock().await;
        if !s.stations.sequence.is_current(ticket) {
            debug!("discarding superseded station results");
            return Ok(Outcome::Superseded);
        }
        match result {
            Ok(features) => {
                s.stations.stations = rank_stations(features, center, self.config.max_stations);
                s.stations.status = LookupStatus::Ready;
                info!(count = s.stations.stations.len(), "stations updated");
                Ok(Outcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "station search failed");
                let err = SearchError::from(e);
                s.stations.stations.clear();
                s.stations.status = LookupStatus::Failed {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Search for places around `anchor` and replace the result set.
    pub async fn find_places(
        &self,
        session: &SessionHandle,
        anchor: SearchAnchor,
        category: Option<Category>,
    ) -> Result<Outcome, SearchError> {
        let ticket = session.lock().await.places.begin_search();

        let center = anchor.coordinate();
        let query =
            build_place_query_with_radius(center, category, self.config.place_radius_meters);
        let result = self.features.fetch_features(&query).await;

        let mut s = session.lock().await;
        if !s.places.sequence.is_current(ticket) {
            debug!("discarding superseded place results");
            return Ok(Outcome::Superseded);
        }
        match result {
            Ok(features) => {
                let places = collect_places(features, center, self.config.max_places);
                s.places.results.replace(places);
                s.places.status = LookupStatus::Ready;
                info!(count = s.places.results.len(), "places updated");
                Ok(Outcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "place search failed");
                let err = SearchError::from(e);
                s.places.results.clear();
                s.places.status = LookupStatus::Failed {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    /// Explicit "search" action: re-run both searches with the midpoint as
    /// the anchor.
    pub async fn search_midpoint(&self, session: &SessionHandle) -> Result<Outcome, SearchError> {
        let midpoint = {
            let mut s = session.lock().await;
            s.locations.select_midpoint();
            s.locations.midpoint()
        }
        .ok_or(SearchError::IncompleteLocations)?;

        self.search_around(session, midpoint).await
    }

    /// Make the station at `index` the anchor and search places around it.
    ///
    /// Only a finished station list can be selected from.
    pub async fn select_station(
        &self,
        session: &SessionHandle,
        index: usize,
    ) -> Result<Outcome, SearchError> {
        let (anchor, category) = {
            let mut s = session.lock().await;
            if s.stations.status != LookupStatus::Ready {
                return Err(SearchError::InvalidInput(
                    "station list is not ready".to_string(),
                ));
            }
            let station = s.stations.stations.get(index).cloned().ok_or_else(|| {
                SearchError::InvalidInput(format!("no station at index {index}"))
            })?;
            let anchor = s
                .locations
                .select_station(station)
                .ok_or(SearchError::IncompleteLocations)?;
            (anchor, s.category)
        };

        self.find_places(session, anchor, category).await
    }

    /// Drop the selected station and search places around the midpoint.
    pub async fn select_midpoint(&self, session: &SessionHandle) -> Result<Outcome, SearchError> {
        let (anchor, category) = {
            let mut s = session.lock().await;
            let anchor = s
                .locations
                .select_midpoint()
                .ok_or(SearchError::IncompleteLocations)?;
            (anchor, s.category)
        };

        self.find_places(session, anchor, category).await
    }

    /// Change the place filter, re-searching if there is an anchor.
    pub async fn set_category(
        &self,
        session: &SessionHandle,
        category: Option<Category>,
    ) -> Result<Outcome, SearchError> {
        let anchor = {
            let mut s = session.lock().await;
            s.category = category;
            s.locations.anchor()
        };

        match anchor {
            Some(anchor) => self.find_places(session, anchor, category).await,
            None => Ok(Outcome::Skipped),
        }
    }

    /// Empty `slot`, supersede in-flight searches and reset both lists.
    pub async fn clear(&self, session: &SessionHandle, slot: Slot) -> Outcome {
        let mut s = session.lock().await;
        s.locations.clear(slot);
        s.stations.reset();
        s.places.reset();
        debug!(%slot, "slot cleared");
        Outcome::Applied
    }

    /// Station and place searches around a fresh midpoint, run together.
    async fn search_around(
        &self,
        session: &SessionHandle,
        midpoint: Coordinate,
    ) -> Result<Outcome, SearchError> {
        let category = session.lock().await.category;
        let anchor = SearchAnchor::Midpoint {
            coordinate: midpoint,
        };

        let (stations, places) = futures::join!(
            self.find_stations(session, midpoint),
            self.find_places(session, anchor, category),
        );
        Ok(stations?.and(places?))
    }

    /// Like [`Self::search_around`], for searches triggered by a location
    /// change. Errors already live in the list statuses.
    async fn refresh_around(&self, session: &SessionHandle, midpoint: Coordinate) {
        if let Err(e) = self.search_around(session, midpoint).await {
            debug!(error = %e, "search after location change failed");
        }
    }
}
