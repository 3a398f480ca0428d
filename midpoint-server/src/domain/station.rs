//! Transit stations found near the midpoint.

use serde::Serialize;

use super::Coordinate;

/// A named transit station returned by a station search.
///
/// `distance_meters` is measured from the midpoint at the time of the
/// search and is never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub coordinate: Coordinate,
    pub name: String,
    pub operator: Option<String>,
    pub network: Option<String>,
    pub distance_meters: u32,
}

impl Station {
    /// Operator and network joined for display, e.g. "JR East / JR".
    pub fn subtitle(&self) -> String {
        match (self.operator.as_deref(), self.network.as_deref()) {
            (Some(op), Some(net)) if op != net => format!("{op} / {net}"),
            (Some(op), _) => op.to_string(),
            (None, Some(net)) => net.to_string(),
            (None, None) => String::new(),
        }
    }
}
