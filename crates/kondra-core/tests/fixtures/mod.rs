//! # Shared Test Fixtures
//!
//! The in-memory resource handle and deterministic clock used by every
//! integration suite. The engine itself never ships an implementation of
//! [`StatusObject`]; the real one lives in the surrounding store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use kondra_core::{Clock, Condition, StatusObject};
use std::cell::Cell;

/// In-memory stand-in for the external resource store's handle.
pub struct TestResource {
    pub generation: i64,
    pub created: DateTime<Utc>,
    pub deleted: Option<DateTime<Utc>>,
    pub conditions: Vec<Condition>,
}

impl TestResource {
    pub fn new(generation: i64) -> Self {
        Self {
            generation,
            created: epoch(),
            deleted: None,
            conditions: Vec::new(),
        }
    }
}

impl StatusObject for TestResource {
    fn generation(&self) -> i64 {
        self.generation
    }
    fn creation_timestamp(&self) -> DateTime<Utc> {
        self.created
    }
    fn deletion_timestamp(&self) -> Option<DateTime<Utc>> {
        self.deleted
    }
    fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
    fn set_conditions(&mut self, conditions: Vec<Condition>) {
        self.conditions = conditions;
    }
}

/// Deterministic clock: every call returns a strictly later instant.
pub struct TickClock {
    start: DateTime<Utc>,
    ticks: Cell<i64>,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            start: epoch() + Duration::hours(1),
            ticks: Cell::new(0),
        }
    }
}

impl Clock for TickClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.get();
        self.ticks.set(tick + 1);
        self.start + Duration::seconds(tick)
    }
}

/// The fixed creation instant every test resource is born at.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid time")
}
