//! The two user-supplied location slots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown slot name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid slot {0:?}: expected \"primary\" or \"secondary\"")]
pub struct InvalidSlot(String);

/// One of the two independent input locations.
///
/// # Examples
///
/// ```
/// use midpoint_server::domain::Slot;
///
/// let slot: Slot = "secondary".parse().unwrap();
/// assert_eq!(slot, Slot::Secondary);
/// assert_eq!(slot.other(), Slot::Primary);
/// assert!("1".parse::<Slot>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Primary,
    Secondary,
}

impl Slot {
    /// Both slots, primary first.
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Secondary];

    /// The opposite slot.
    pub fn other(self) -> Slot {
        match self {
            Slot::Primary => Slot::Secondary,
            Slot::Secondary => Slot::Primary,
        }
    }

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Primary => "primary",
            Slot::Secondary => "secondary",
        }
    }
}

impl FromStr for Slot {
    type Err = InvalidSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Slot::Primary),
            "secondary" => Ok(Slot::Secondary),
            other => Err(InvalidSlot(other.to_string())),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for slot in Slot::ALL {
            assert_eq!(slot.as_str().parse::<Slot>().unwrap(), slot);
        }
    }

    #[test]
    fn rejects_positional_names() {
        assert!("0".parse::<Slot>().is_err());
        assert!("2".parse::<Slot>().is_err());
        assert!("Primary".parse::<Slot>().is_err());
    }

    #[test]
    fn other_is_involution() {
        for slot in Slot::ALL {
            assert_eq!(slot.other().other(), slot);
            assert_ne!(slot.other(), slot);
        }
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Slot::Secondary).unwrap(),
            "\"secondary\""
        );
        let slot: Slot = serde_json::from_str("\"primary\"").unwrap();
        assert_eq!(slot, Slot::Primary);
    }

    #[test]
    fn error_display() {
        let err = "third".parse::<Slot>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid slot \"third\": expected \"primary\" or \"secondary\""
        );
    }
}
