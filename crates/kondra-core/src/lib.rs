//! # kondra-core
//!
//! The deterministic condition aggregation engine for Kondra - THE LOGIC.
//!
//! A resource reports its health as a set of independently-updated named
//! sub-conditions. This crate computes and maintains a single derived "root"
//! condition summarizing whether the resource, as a whole, is ready: a
//! small but subtle consistency problem over a timestamped condition list,
//! with precise tie-breaking when sub-conditions disagree.
//!
//! ## Architecture
//!
//! - [`ConditionRegistry`] — static per-resource-kind configuration: the
//!   root condition's name and the dependent types that roll up into it.
//! - [`ConditionAggregator`] — bound to one live resource handle for one
//!   reconciliation step; read queries plus `set`/`clear` mutations that
//!   internally recompute the root.
//! - [`StatusObject`] — the trait the host resource abstraction implements;
//!   the engine's sole source of truth and only side-effect target.
//!
//! ## Architectural Constraints
//!
//! The engine:
//! - Is single-threaded, synchronous, and non-suspending; no I/O
//! - Holds no state of its own; it is a pure transformation over the handle
//! - Is idempotent: re-applying an equivalent outcome reports no change
//! - Never panics; the one error case (`clear` on a dependent) is a value
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregator;
pub mod clock;
pub mod object;
pub mod registry;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{Condition, ConditionStatus, ConditionType, KondraError};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use aggregator::ConditionAggregator;
pub use clock::{Clock, SystemClock};
pub use object::StatusObject;
pub use registry::{ConditionKind, ConditionRegistry};
