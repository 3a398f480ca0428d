//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{Category, Place, Station, category_label};
use crate::session::{LookupStatus, Session, SortKey};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the two address inputs, map and result panes.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub categories: Vec<CategoryOption>,
}

impl IndexTemplate {
    pub fn new() -> Self {
        Self {
            categories: Category::ALL
                .into_iter()
                .map(|c| CategoryOption {
                    value: c.as_str(),
                    label: c.label(),
                })
                .collect(),
        }
    }
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Station list fragment.
#[derive(Template)]
#[template(path = "station_list.html")]
pub struct StationListTemplate {
    pub state: ListState,
    pub stations: Vec<StationView>,
}

impl StationListTemplate {
    pub fn from_session(session: &Session) -> Self {
        let selected = session.locations.selected_station();
        Self {
            state: ListState::from_status(&session.stations.status),
            stations: session
                .stations
                .stations
                .iter()
                .enumerate()
                .map(|(index, s)| StationView::from_station(index, s, selected == Some(s)))
                .collect(),
        }
    }
}

/// Place list fragment.
#[derive(Template)]
#[template(path = "place_list.html")]
pub struct PlaceListTemplate {
    pub state: ListState,
    pub sort_by_name: bool,
    pub places: Vec<PlaceView>,
}

impl PlaceListTemplate {
    pub fn from_session(session: &Session) -> Self {
        Self {
            state: ListState::from_status(&session.places.status),
            sort_by_name: session.places.results.sort_key() == SortKey::Name,
            places: session
                .places
                .results
                .view()
                .iter()
                .map(PlaceView::from_place)
                .collect(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// What a result pane should show besides its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl ListState {
    fn from_status(status: &LookupStatus) -> Self {
        match status {
            LookupStatus::Idle => ListState::Idle,
            LookupStatus::Loading => ListState::Loading,
            LookupStatus::Ready => ListState::Ready,
            LookupStatus::Failed { message } => ListState::Failed(message.clone()),
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == ListState::Idle
    }

    pub fn is_loading(&self) -> bool {
        *self == ListState::Loading
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ListState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StationView {
    pub index: usize,
    pub name: String,
    pub subtitle: String,
    pub distance: String,
    pub selected: bool,
}

impl StationView {
    pub fn from_station(index: usize, station: &Station, selected: bool) -> Self {
        Self {
            index,
            name: station.name.clone(),
            subtitle: station.subtitle(),
            distance: format_distance(station.distance_meters),
            selected,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaceView {
    pub name: String,
    pub category: String,
    pub distance: String,
    pub cuisine: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl PlaceView {
    pub fn from_place(place: &Place) -> Self {
        Self {
            name: place.name.clone(),
            category: category_label(&place.category).to_string(),
            distance: format_distance(place.distance_meters),
            cuisine: place.cuisine.clone(),
            phone: place.phone.clone(),
            website: place.website.clone(),
        }
    }
}

/// "850 m" below a kilometre, "1.2 km" above.
pub fn format_distance(meters: u32) -> String {
    if meters < 1000 {
        format!("{meters} m")
    } else {
        format!("{:.1} km", f64::from(meters) / 1000.0)
    }
}
