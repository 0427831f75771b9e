//! Search cost mode.

use std::fmt;
use std::str::FromStr;

/// Which cost function the search core optimises.
///
/// The source implementation also accepted a third `basic` mode that
/// ignored scheduled times entirely; it was never fully wired up to a
/// distinct code path there, and is not modeled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Earliest arrival: minimise wall-clock travel time.
    Time,
    /// Minimise an estimated distance-based cost, ignoring timetables.
    Cost,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Time => f.write_str("time"),
            Mode::Cost => f.write_str("cost"),
        }
    }
}

/// Error returned when parsing an unknown mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search mode: {0:?} (expected \"time\" or \"cost\")")]
pub struct InvalidMode(pub String);

impl FromStr for Mode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Mode::Time),
            "cost" => Ok(Mode::Cost),
            other => Err(InvalidMode(other.to_string())),
        }
    }
}
