//! Conversion from Overpass DTOs to domain features.

use tracing::trace;

use crate::domain::{Coordinate, Feature};

use super::error::OverpassError;
use super::types::{ElementDto, OverpassResponseDto};

/// Convert an interpreter response into features, preserving order.
///
/// A `remark` mentioning a runtime error means the result set is
/// incomplete, so the whole response is rejected rather than shown
/// partially.
pub fn convert_response(response: OverpassResponseDto) -> Result<Vec<Feature>, OverpassError> {
    if let Some(remark) = &response.remark
        && remark.contains("runtime error")
    {
        return Err(OverpassError::QueryFailed {
            message: remark.clone(),
        });
    }

    Ok(response.elements.into_iter().map(convert_element).collect())
}

fn convert_element(element: ElementDto) -> Feature {
    let position = match (element.lat, element.lon) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ => element.center.map(|c| (c.lat, c.lon)),
    };

    // An out-of-range position is treated the same as no position.
    let coordinate = position.and_then(|(lat, lon)| Coordinate::new(lat, lon).ok());
    if coordinate.is_none() {
        trace!(kind = %element.kind, id = ?element.id, "element without usable position");
    }

    Feature {
        coordinate,
        tags: element.tags,
    }
}
