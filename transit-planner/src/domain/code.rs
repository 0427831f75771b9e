//! Opaque station and settlement codes.
//!
//! Unlike fixed-width rail CRS codes, this system's upstream schedule
//! provider uses free-form alphanumeric codes (e.g. `s9600213`). Both
//! station and settlement codes come from the same namespace, but are
//! kept as distinct types so a settlement code can never be passed where
//! a station code is expected.

use std::fmt;
use std::sync::Arc;

/// Error returned when parsing an invalid station or settlement code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid code: {reason}")]
pub struct InvalidCode {
    reason: &'static str,
}

impl InvalidCode {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

fn validate(s: &str) -> Result<(), InvalidCode> {
    if s.is_empty() {
        return Err(InvalidCode::new("must not be empty"));
    }
    if s.len() > 64 {
        return Err(InvalidCode::new("must be at most 64 characters"));
    }
    if !s.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(InvalidCode::new(
            "must be printable ASCII with no whitespace",
        ));
    }
    Ok(())
}

/// A validated station code (e.g. `s9600213`).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationCode(Arc<str>);

impl StationCode {
    /// Parse a station code, rejecting empty or non-printable-ASCII input.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, InvalidCode> {
        let s = s.as_ref();
        validate(s)?;
        Ok(Self(Arc::from(s)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for StationCode {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for StationCode {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        StationCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A validated settlement code. Same grammar as [`StationCode`], kept
/// distinct so the two can't be confused at call sites.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SettlementCode(Arc<str>);

impl SettlementCode {
    pub fn parse(s: impl AsRef<str>) -> Result<Self, InvalidCode> {
        let s = s.as_ref();
        validate(s)?;
        Ok(Self(Arc::from(s)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SettlementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SettlementCode({})", self.0)
    }
}

impl fmt::Display for SettlementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl serde::Serialize for SettlementCode {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SettlementCode {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        SettlementCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(StationCode::parse("s9600213").is_ok());
        assert!(StationCode::parse("s2000002").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StationCode::parse("").is_err());
    }

    #[test]
    fn reject_whitespace() {
        assert!(StationCode::parse("s960 0213").is_err());
        assert!(StationCode::parse("\ts123").is_err());
    }

    #[test]
    fn reject_too_long() {
        let s = "s".repeat(65);
        assert!(StationCode::parse(&s).is_err());
    }

    #[test]
    fn display_and_as_str() {
        let code = StationCode::parse("s9600213").unwrap();
        assert_eq!(code.as_str(), "s9600213");
        assert_eq!(code.to_string(), "s9600213");
    }

    #[test]
    fn equality_and_hash() {
        use std::collections::HashSet;
        let a = StationCode::parse("s9600213").unwrap();
        let b = StationCode::parse("s9600213").unwrap();
        let c = StationCode::parse("s9600214").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
        assert!(!set.contains(&c));
    }

    #[test]
    fn station_and_settlement_are_distinct_types() {
        // This is a compile-time property: StationCode and SettlementCode
        // are not interchangeable. Runtime check: both parse the same text.
        let station = StationCode::parse("c213").unwrap();
        let settlement = SettlementCode::parse("c213").unwrap();
        assert_eq!(station.as_str(), settlement.as_str());
    }
}
