//! Place results and their presentation order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Place;

/// Error returned for an unknown sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported sort key: {0:?}")]
pub struct InvalidSortKey(String);

/// Order in which place results are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Distance,
    Name,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Distance => "distance",
            SortKey::Name => "name",
        }
    }
}

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(SortKey::Distance),
            "name" => Ok(SortKey::Name),
            other => Err(InvalidSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation state of one result list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LookupStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed { message: String },
}

impl LookupStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LookupStatus::Loading)
    }
}

/// The latest batch of places in arrival order, plus the chosen sort key.
///
/// The stored order is never changed by sorting; [`ResultSet::view`]
/// derives a fresh ordering each time.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    places: Vec<Place>,
    sort_key: SortKey,
    /// Place picked for the map popup; dropped whenever the batch changes.
    focused: Option<Place>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every stored place. Places with a blank name are dropped.
    /// The sort key is preserved.
    pub fn replace(&mut self, places: Vec<Place>) {
        self.places = places
            .into_iter()
            .filter(|p| !p.name.trim().is_empty())
            .collect();
        self.focused = None;
    }

    pub fn clear(&mut self) {
        self.places.clear();
        self.focused = None;
    }

    /// Focus the place at `index` of the current [`view`](Self::view).
    pub fn focus(&mut self, index: usize) -> Option<&Place> {
        let place = self.view().into_iter().nth(index)?;
        self.focused = Some(place);
        self.focused.as_ref()
    }

    pub fn focused(&self) -> Option<&Place> {
        self.focused.as_ref()
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Places in arrival order.
    pub fn arrival_order(&self) -> &[Place] {
        &self.places
    }

    /// Places ordered by the current sort key.
    ///
    /// Distance ties keep arrival order. Names compare by code point, so
    /// uppercase sorts before lowercase.
    pub fn view(&self) -> Vec<Place> {
        let mut view = self.places.clone();
        match self.sort_key {
            SortKey::Distance => view.sort_by_key(|p| p.distance_meters),
            SortKey::Name => view.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        view
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::Coordinate;
    use proptest::prelude::*;

    fn any_place() -> impl Strategy<Value = Place> {
        ("[ a-zA-Z]{0,8}", 0u32..5000).prop_map(|(name, distance)| Place {
            coordinate: Coordinate::new(0.0, 0.0).unwrap(),
            name,
            category: "restaurant".to_string(),
            cuisine: None,
            phone: None,
            website: None,
            distance_meters: distance,
        })
    }

    proptest! {
        /// Distance view is non-decreasing
        #[test]
        fn distance_view_sorted(places in prop::collection::vec(any_place(), 0..40)) {
            let mut set = ResultSet::new();
            set.replace(places);
            let view = set.view();
            for pair in view.windows(2) {
                prop_assert!(pair[0].distance_meters <= pair[1].distance_meters);
            }
        }

        /// Name view is non-decreasing
        #[test]
        fn name_view_sorted(places in prop::collection::vec(any_place(), 0..40)) {
            let mut set = ResultSet::new();
            set.set_sort_key(SortKey::Name);
            set.replace(places);
            let view = set.view();
            for pair in view.windows(2) {
                prop_assert!(pair[0].name <= pair[1].name);
            }
        }

        /// View never grows and never contains blank names
        #[test]
        fn view_bounded_and_named(places in prop::collection::vec(any_place(), 0..40)) {
            let input_len = places.len();
            let mut set = ResultSet::new();
            set.replace(places);
            let view = set.view();
            prop_assert!(view.len() <= input_len);
            prop_assert!(view.iter().all(|p| !p.name.trim().is_empty()));
        }
    }
}
