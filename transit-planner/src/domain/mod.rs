//! Domain types for the journey planner.
//!
//! This module contains the core domain model types used by the search
//! core and the rest of the crate. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod code;
mod error;
mod journey;
mod mode;
mod time;

pub use code::{InvalidCode, SettlementCode, StationCode};
pub use error::DomainError;
pub use journey::{Journey, Segment, Transport, Walk};
pub use mode::{InvalidMode, Mode};
pub use time::{TimeError, format_wire_date, format_wire_timestamp, parse_wire_timestamp};
