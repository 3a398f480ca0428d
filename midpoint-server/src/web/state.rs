//! Application state for the web layer.

use std::sync::Arc;

use crate::map::DEFAULT_PADDING_RATIO;
use crate::nominatim::Geocoder;
use crate::orchestrator::{SearchConfig, SearchOrchestrator};
use crate::overpass::FeatureSource;
use crate::session::SessionStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Runs lookups against the geocoder and feature source
    pub orchestrator: Arc<SearchOrchestrator>,

    /// Live user sessions
    pub sessions: SessionStore,

    /// Padding applied to the map's fit-to-bounds box
    pub map_padding: f64,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        features: Arc<dyn FeatureSource>,
        config: SearchConfig,
    ) -> Self {
        Self {
            orchestrator: Arc::new(SearchOrchestrator::new(geocoder, features, config)),
            sessions: SessionStore::default(),
            map_padding: DEFAULT_PADDING_RATIO,
        }
    }
}
