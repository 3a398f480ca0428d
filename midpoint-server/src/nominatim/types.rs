//! Geocoder trait and Nominatim response DTOs.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::GeocodeError;

/// The single best match for a forward geocode.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub coordinate: Coordinate,
    pub display_name: Option<String>,
}

/// Address ↔ coordinate lookups.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address to its best match.
    ///
    /// Returns `Ok(None)` when the service has no candidates; that is a
    /// normal outcome, not an error.
    async fn geocode(&self, address: &str) -> Result<Option<GeocodeMatch>, GeocodeError>;

    /// Look up a display label for a coordinate.
    ///
    /// Returns `Ok(None)` when the service knows no name for the location.
    async fn reverse_geocode(&self, coordinate: Coordinate)
    -> Result<Option<String>, GeocodeError>;
}

/// One entry of a `/search` response.
///
/// Nominatim sends coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResultDto {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}

impl SearchResultDto {
    /// Convert to a validated match.
    pub(crate) fn into_match(self) -> Result<GeocodeMatch, GeocodeError> {
        let lat: f64 = self.lat.parse().map_err(|_| GeocodeError::Json {
            message: format!("invalid latitude {:?}", self.lat),
        })?;
        let lon: f64 = self.lon.parse().map_err(|_| GeocodeError::Json {
            message: format!("invalid longitude {:?}", self.lon),
        })?;
        let coordinate = Coordinate::new(lat, lon).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

        Ok(GeocodeMatch {
            coordinate,
            display_name: self.display_name.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// A `/reverse` response.
///
/// When Nominatim cannot place the coordinate it answers
/// `{"error": "Unable to geocode"}`, which deserializes with no name.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReverseResultDto {
    pub display_name: Option<String>,
}
