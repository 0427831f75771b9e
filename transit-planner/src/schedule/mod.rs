//! Schedule Source Client: fetches per-station and per-thread timetable
//! data on demand from the remote schedule API.

mod client;
mod error;
mod memo;
mod miss_cache;
mod mock;
mod source;
pub mod types;

pub use client::{ScheduleClient, ScheduleClientConfig};
pub use error::ScheduleError;
pub use memo::{MemoConfig, MemoizedScheduleClient};
pub use miss_cache::MissCache;
pub use mock::MockScheduleSource;
pub use source::ScheduleSource;
pub use types::Event;
