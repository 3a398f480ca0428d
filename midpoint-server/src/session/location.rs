//! The two input locations, the derived midpoint and the selected station.

use serde::Serialize;

use crate::domain::{Coordinate, Slot, Station, midpoint};

use super::sequence::{Sequencer, Ticket};

/// Resolution state of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "coordinate", rename_all = "lowercase")]
pub enum SlotStatus {
    Empty,
    /// A forward geocode is in flight for a slot that had no coordinate.
    Resolving,
    Resolved(Coordinate),
}

/// One user-supplied location.
#[derive(Debug, Clone)]
pub struct LocationSlot {
    status: SlotStatus,
    label: Option<String>,
    sequence: Sequencer,
}

impl LocationSlot {
    fn new() -> Self {
        Self {
            status: SlotStatus::Empty,
            label: None,
            sequence: Sequencer::default(),
        }
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.status {
            SlotStatus::Resolved(c) => Some(c),
            _ => None,
        }
    }
}

/// What place searches are currently centred on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchAnchor {
    Midpoint { coordinate: Coordinate },
    Station { coordinate: Coordinate, name: String },
}

impl SearchAnchor {
    pub fn coordinate(&self) -> Coordinate {
        match self {
            SearchAnchor::Midpoint { coordinate } | SearchAnchor::Station { coordinate, .. } => {
                *coordinate
            }
        }
    }
}

/// Owns both slots and everything derived from them.
///
/// Every mutation recomputes the midpoint before returning, so no caller
/// can observe a midpoint derived from only one updated slot. The midpoint
/// is defined exactly when both slots are resolved.
#[derive(Debug, Clone)]
pub struct LocationState {
    primary: LocationSlot,
    secondary: LocationSlot,
    midpoint: Option<Coordinate>,
    selected_station: Option<Station>,
}

impl Default for LocationState {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationState {
    pub fn new() -> Self {
        Self {
            primary: LocationSlot::new(),
            secondary: LocationSlot::new(),
            midpoint: None,
            selected_station: None,
        }
    }

    pub fn slot(&self, slot: Slot) -> &LocationSlot {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Secondary => &self.secondary,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut LocationSlot {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Secondary => &mut self.secondary,
        }
    }

    pub fn midpoint(&self) -> Option<Coordinate> {
        self.midpoint
    }

    pub fn selected_station(&self) -> Option<&Station> {
        self.selected_station.as_ref()
    }

    /// The active anchor: the selected station if any, else the midpoint.
    pub fn anchor(&self) -> Option<SearchAnchor> {
        let midpoint = self.midpoint?;
        Some(match &self.selected_station {
            Some(station) => SearchAnchor::Station {
                coordinate: station.coordinate,
                name: station.name.clone(),
            },
            None => SearchAnchor::Midpoint {
                coordinate: midpoint,
            },
        })
    }

    /// Whether `ticket` is the latest request issued for `slot`.
    pub fn is_current(&self, slot: Slot, ticket: Ticket) -> bool {
        self.slot(slot).sequence.is_current(ticket)
    }

    /// Start a forward lookup for `slot`.
    ///
    /// An empty slot moves to `Resolving`; a resolved slot keeps its
    /// coordinate until the lookup succeeds.
    pub fn begin_lookup(&mut self, slot: Slot) -> Ticket {
        let entry = self.slot_mut(slot);
        if entry.status == SlotStatus::Empty {
            entry.status = SlotStatus::Resolving;
        }
        entry.sequence.issue()
    }

    /// Abandon a forward lookup that found nothing or failed.
    ///
    /// Only the current lookup may return a `Resolving` slot to `Empty`.
    pub fn fail_lookup(&mut self, slot: Slot, ticket: Ticket) {
        let entry = self.slot_mut(slot);
        if entry.sequence.is_current(ticket) && entry.status == SlotStatus::Resolving {
            entry.status = SlotStatus::Empty;
        }
    }

    /// Assign a coordinate directly (map click or device location).
    ///
    /// The label is unset; the returned ticket is used to backfill it from
    /// reverse geocoding. Returns the midpoint when both slots are now
    /// resolved.
    pub fn set_coordinate(&mut self, slot: Slot, coordinate: Coordinate) -> (Ticket, Option<Coordinate>) {
        let entry = self.slot_mut(slot);
        let ticket = entry.sequence.issue();
        entry.status = SlotStatus::Resolved(coordinate);
        entry.label = None;
        (ticket, self.recompute())
    }

    /// Apply a successful forward geocode.
    ///
    /// Returns the midpoint when both slots are now resolved.
    pub fn set_from_address_lookup(
        &mut self,
        slot: Slot,
        coordinate: Coordinate,
        label: impl Into<String>,
    ) -> Option<Coordinate> {
        let entry = self.slot_mut(slot);
        entry.status = SlotStatus::Resolved(coordinate);
        entry.label = Some(label.into());
        self.recompute()
    }

    /// Set the display label if `ticket` is still current.
    ///
    /// Returns whether the label was applied.
    pub fn set_label(&mut self, slot: Slot, ticket: Ticket, label: impl Into<String>) -> bool {
        let entry = self.slot_mut(slot);
        if !entry.sequence.is_current(ticket) {
            return false;
        }
        entry.label = Some(label.into());
        true
    }

    /// Reset `slot` to empty, clearing the midpoint and the anchor.
    pub fn clear(&mut self, slot: Slot) {
        let entry = self.slot_mut(slot);
        entry.sequence.issue();
        entry.status = SlotStatus::Empty;
        entry.label = None;
        self.recompute();
    }

    /// Make `station` the anchor. Requires a midpoint.
    pub fn select_station(&mut self, station: Station) -> Option<SearchAnchor> {
        self.midpoint?;
        self.selected_station = Some(station);
        self.anchor()
    }

    /// Drop the selected station so the midpoint is the anchor again.
    pub fn select_midpoint(&mut self) -> Option<SearchAnchor> {
        self.selected_station = None;
        self.anchor()
    }

    /// Slot a map click should fill: the first one without a coordinate.
    pub fn slot_for_click(&self) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|s| self.slot(*s).coordinate().is_none())
    }

    /// Recompute the midpoint; any change drops the selected station,
    /// since station results are about to be replaced.
    fn recompute(&mut self) -> Option<Coordinate> {
        self.midpoint = match (self.primary.coordinate(), self.secondary.coordinate()) {
            (Some(a), Some(b)) => Some(midpoint(a, b)),
            _ => None,
        };
        self.selected_station = None;
        self.midpoint
    }
}
