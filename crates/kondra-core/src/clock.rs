//! # Clock
//!
//! Injected wall-clock source.
//!
//! Transition timestamps are the one place the engine touches the outside
//! world. Routing them through a trait keeps every aggregation decision
//! reproducible under test: a fixed clock replays an operation sequence into
//! an identical condition list, timestamps included.

use chrono::{DateTime, Utc};

/// Source of "now" for transition timestamps.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The production clock: reads the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Shared instance used when no clock is injected.
pub(crate) static SYSTEM_CLOCK: SystemClock = SystemClock;
