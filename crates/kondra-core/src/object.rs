//! # Status Object
//!
//! The handle through which the engine sees one live resource.
//!
//! The resource itself is owned by the surrounding store: Kondra never
//! persists anything. The aggregator mutates the handle's condition list in
//! place and the caller decides when (and whether) to write it back. The
//! handle is the sole source of truth; the engine keeps no state of its own.

use crate::Condition;
use chrono::{DateTime, Utc};

/// Capabilities the engine consumes from its host resource.
///
/// Object-safe by design: the aggregator binds to `&mut dyn StatusObject`,
/// which also lets the unbound (absent-handle) case be represented.
///
/// # Contract
///
/// The engine assumes exclusive ownership of the handle for the duration of
/// one reconciliation step. Serializing access per resource (e.g. keyed work
/// queues) is the scheduler's responsibility, not this crate's.
pub trait StatusObject {
    /// The resource's current spec generation.
    fn generation(&self) -> i64;

    /// When the resource was created.
    ///
    /// A dependent condition's implicit "first transition" is backdated to
    /// this instant on first observation.
    fn creation_timestamp(&self) -> DateTime<Utc>;

    /// When the resource was marked for deletion, if it was.
    fn deletion_timestamp(&self) -> Option<DateTime<Utc>>;

    /// The currently-stored condition list, in stored order.
    fn conditions(&self) -> &[Condition];

    /// Replace the entire condition list.
    ///
    /// Every successful mutation goes through a full replace; callers must
    /// treat the list as copy-on-write output of the engine.
    fn set_conditions(&mut self, conditions: Vec<Condition>);
}
