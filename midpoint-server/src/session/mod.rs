//! Per-user session state.
//!
//! A [`Session`] holds everything one user's page works with: the two input
//! locations, the station list, the place results and their presentation
//! state. Sessions live in the [`SessionStore`] and are only mutated under
//! their mutex; backend calls happen with the lock released.

mod location;
mod results;
mod sequence;
mod store;

pub use location::{LocationSlot, LocationState, SearchAnchor, SlotStatus};
pub use results::{InvalidSortKey, LookupStatus, ResultSet, SortKey};
pub use sequence::{Sequencer, Ticket};
pub use store::{SessionHandle, SessionId, SessionStore};

use crate::advisory::InputAdvisory;
use crate::domain::{Category, Station};

/// Station search results plus their status.
#[derive(Debug, Clone, Default)]
pub struct StationList {
    pub stations: Vec<Station>,
    pub status: LookupStatus,
    pub(crate) sequence: Sequencer,
}

impl StationList {
    /// Start a search: supersede any in-flight one, drop the old list and
    /// show loading. Stations ranked around a previous center never stay
    /// selectable while the new list is on its way.
    pub(crate) fn begin_search(&mut self) -> Ticket {
        self.stations.clear();
        self.status = LookupStatus::Loading;
        self.sequence.issue()
    }

    /// Drop results and supersede any in-flight search.
    pub(crate) fn reset(&mut self) {
        self.sequence.issue();
        self.stations.clear();
        self.status = LookupStatus::Idle;
    }
}

/// Place search results plus their status.
#[derive(Debug, Clone, Default)]
pub struct PlaceList {
    pub results: ResultSet,
    pub status: LookupStatus,
    pub(crate) sequence: Sequencer,
}

impl PlaceList {
    pub(crate) fn begin_search(&mut self) -> Ticket {
        self.status = LookupStatus::Loading;
        self.sequence.issue()
    }

    pub(crate) fn reset(&mut self) {
        self.sequence.issue();
        self.results.clear();
        self.status = LookupStatus::Idle;
    }
}

/// All state owned by one user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub locations: LocationState,
    pub stations: StationList,
    pub places: PlaceList,
    /// Place filter; `None` searches the default category set.
    pub category: Option<Category>,
    pub advisory: InputAdvisory,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
