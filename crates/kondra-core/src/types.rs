//! # Core Type Definitions
//!
//! This module contains all core types for the Kondra condition engine:
//! - Condition identifiers (`ConditionType`)
//! - The tri-state status (`ConditionStatus`)
//! - The condition record itself (`Condition`)
//! - Error types (`KondraError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` where they participate in `BTreeSet` membership
//! - Carry integer generation counters only (no floating-point anywhere)
//! - Serialize to a stable, camelCase wire shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// CONDITION TYPE
// =============================================================================

/// Name of a condition, unique within one resource's condition list.
///
/// Condition types are the semantic units the aggregator keys on: each
/// reconciled sub-feature reports under its own type, and the registry
/// classifies each type as root, dependent, or independent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionType(pub String);

impl ConditionType {
    /// Create a new condition type from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConditionType {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// =============================================================================
// CONDITION STATUS
// =============================================================================

/// Tri-state health of a condition.
///
/// `Unknown` is not an error: it means the sub-feature has not yet been
/// confirmed one way or the other at the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    /// The condition holds.
    True,
    /// The condition does not hold.
    False,
    /// The condition has not been confirmed either way.
    Unknown,
}

// =============================================================================
// CONDITION
// =============================================================================

/// One named health fact about a resource.
///
/// Exactly one `Condition` per `condition_type` exists in a resource's
/// condition list at any time; the list behaves as a mapping from type to
/// condition, materialized to an ordered sequence at the persist boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// The unique name of this condition within the resource.
    #[serde(rename = "type")]
    pub condition_type: ConditionType,
    /// Current tri-state status.
    pub status: ConditionStatus,
    /// Short machine-readable token explaining the status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human-readable explanation of the status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Timestamp of the most recent status *change* (not update).
    ///
    /// Absent only transiently, before the condition's first write through
    /// the aggregator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,
    /// The resource generation at which this condition was last evaluated.
    /// Used to detect staleness relative to the resource's current spec.
    #[serde(default)]
    pub observed_generation: i64,
}

impl Condition {
    /// Create a new condition with no reason, message, or transition time.
    ///
    /// The aggregator stamps `observed_generation` and
    /// `last_transition_time` on write; values supplied here are advisory.
    #[must_use]
    pub fn new(condition_type: ConditionType, status: ConditionStatus) -> Self {
        Self {
            condition_type,
            status,
            reason: None,
            message: None,
            last_transition_time: None,
            observed_generation: 0,
        }
    }

    /// Check if the status is `True`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }

    /// Check if the status is `False`.
    #[must_use]
    pub fn is_false(&self) -> bool {
        self.status == ConditionStatus::False
    }

    /// Check if the status is `Unknown`.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.status == ConditionStatus::Unknown
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Kondra engine.
///
/// - No silent failures
/// - Use `Result<T, KondraError>` for fallible operations
/// - The engine never panics; all errors are recoverable by the caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KondraError {
    /// `clear` was called on a root or dependent condition type.
    /// Dependent conditions are only ever transitioned, never removed.
    #[error("clearing dependent condition {0:?} is not supported")]
    DependentConditionImmutable(ConditionType),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_helpers() {
        let cond = Condition::new(ConditionType::new("Ready"), ConditionStatus::True);
        assert!(cond.is_true());
        assert!(!cond.is_false());
        assert!(!cond.is_unknown());
    }

    #[test]
    fn new_condition_has_no_bookkeeping() {
        let cond = Condition::new(ConditionType::new("Synced"), ConditionStatus::Unknown);
        assert_eq!(cond.reason, None);
        assert_eq!(cond.message, None);
        assert_eq!(cond.last_transition_time, None);
        assert_eq!(cond.observed_generation, 0);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let cond = Condition {
            condition_type: ConditionType::new("Ready"),
            status: ConditionStatus::False,
            reason: Some("Boom".to_owned()),
            message: None,
            last_transition_time: Some(
                Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                    .single()
                    .expect("valid time"),
            ),
            observed_generation: 3,
        };

        let json = serde_json::to_value(&cond).expect("serialize");
        assert_eq!(json["type"], "Ready");
        assert_eq!(json["status"], "False");
        assert_eq!(json["reason"], "Boom");
        assert_eq!(json["observedGeneration"], 3);
        assert_eq!(json["lastTransitionTime"], "2024-05-01T12:00:00Z");
        // Absent optionals are omitted, not null.
        assert!(json.get("message").is_none());
    }

    #[test]
    fn wire_shape_round_trips_missing_optionals() {
        let json = r#"{"type":"Synced","status":"Unknown"}"#;
        let cond: Condition = serde_json::from_str(json).expect("deserialize");
        assert_eq!(cond.condition_type.as_str(), "Synced");
        assert!(cond.is_unknown());
        assert_eq!(cond.observed_generation, 0);
        assert_eq!(cond.last_transition_time, None);
    }

    #[test]
    fn error_names_the_condition() {
        let err = KondraError::DependentConditionImmutable(ConditionType::new("Ready"));
        assert!(err.to_string().contains("Ready"));
    }
}
