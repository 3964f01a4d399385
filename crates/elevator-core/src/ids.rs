//! Strongly typed identifier wrappers.
//!
//! `ElevatorId` wraps a `u32` index so it is `Copy` and cheap to use as a
//! `Vec`/`HashMap` key, while its `Display`/`FromStr` impls present the
//! stable string form (`"elevator-1"`) that the rest of the system — and the
//! external command surface — treats as the canonical id.

use std::fmt;
use std::str::FromStr;

/// Index of an elevator car within the fleet. 1-indexed in its string form
/// so operator-facing output reads "elevator-1" rather than "elevator-0".
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ElevatorId(pub u32);

impl ElevatorId {
    #[inline]
    pub fn new(index: u32) -> Self {
        ElevatorId(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elevator-{}", self.0 + 1)
    }
}

impl FromStr for ElevatorId {
    type Err = ParseElevatorIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .strip_prefix("elevator-")
            .ok_or(ParseElevatorIdError)?
            .parse::<u32>()
            .map_err(|_| ParseElevatorIdError)?;
        n.checked_sub(1).map(ElevatorId).ok_or(ParseElevatorIdError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseElevatorIdError;

impl fmt::Display for ParseElevatorIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a valid elevator id (expected \"elevator-<n>\")")
    }
}

impl std::error::Error for ParseElevatorIdError {}

impl TryFrom<String> for ElevatorId {
    type Error = ParseElevatorIdError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ElevatorId> for String {
    fn from(id: ElevatorId) -> String {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_from_str() {
        let id = ElevatorId::new(2);
        assert_eq!(id.to_string(), "elevator-3");
        assert_eq!("elevator-3".parse::<ElevatorId>().unwrap(), id);
    }

    #[test]
    fn rejects_malformed_ids() {
        // "elevator-0" is not a valid id: the string form is 1-indexed.
        assert!("elevator-0".parse::<ElevatorId>().is_err());
        assert!("car-1".parse::<ElevatorId>().is_err());
        assert!("elevator-x".parse::<ElevatorId>().is_err());
    }
}
