//! # Condition Registry
//!
//! Static, per-resource-kind configuration declaring which condition types
//! exist and how each one relates to the derived root condition.
//!
//! The registry is pure data: constructed once per resource kind and shared
//! read-only across every aggregator bound to resources of that kind. It has
//! no behavior beyond membership classification.

use crate::ConditionType;
use std::collections::BTreeSet;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// How a condition type participates in root aggregation.
///
/// Resolved once through the registry and used everywhere in place of ad hoc
/// string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    /// The single derived condition summarizing overall readiness.
    Root,
    /// A condition whose health is an input to the root's computation.
    Dependent,
    /// Any other condition: informational only, removable via `clear`.
    Independent,
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Per-resource-kind declaration of the root condition and its dependents.
///
/// Immutable after construction. Uses `BTreeSet` for deterministic ordering
/// when the dependent set is iterated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRegistry {
    /// The root condition type, typically "Ready" or "Succeeded".
    root: ConditionType,
    /// The condition types whose health rolls up into the root.
    dependents: BTreeSet<ConditionType>,
}

impl ConditionRegistry {
    /// Create a registry with the given root and dependent condition types.
    ///
    /// A name equal to the root is always treated as root, never as an
    /// ordinary dependent; listing the root among the dependents is
    /// therefore dropped here rather than carried as a contradiction.
    #[must_use]
    pub fn new(
        root: ConditionType,
        dependents: impl IntoIterator<Item = ConditionType>,
    ) -> Self {
        let dependents = dependents
            .into_iter()
            .filter(|t| *t != root)
            .collect::<BTreeSet<_>>();
        Self { root, dependents }
    }

    /// The root condition type.
    #[must_use]
    pub fn root(&self) -> &ConditionType {
        &self.root
    }

    /// The declared dependent condition types, in deterministic order.
    pub fn dependents(&self) -> impl Iterator<Item = &ConditionType> {
        self.dependents.iter()
    }

    /// Classify a condition type as root, dependent, or independent.
    #[must_use]
    pub fn classify(&self, condition_type: &ConditionType) -> ConditionKind {
        if *condition_type == self.root {
            ConditionKind::Root
        } else if self.dependents.contains(condition_type) {
            ConditionKind::Dependent
        } else {
            ConditionKind::Independent
        }
    }

    /// Check whether a condition type is involved in computing the root.
    ///
    /// True for the root itself and for every declared dependent.
    #[must_use]
    pub fn is_dependent(&self, condition_type: &ConditionType) -> bool {
        self.classify(condition_type) != ConditionKind::Independent
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_registry() -> ConditionRegistry {
        ConditionRegistry::new(
            ConditionType::new("Ready"),
            [ConditionType::new("Synced"), ConditionType::new("Healthy")],
        )
    }

    #[test]
    fn classifies_root_dependent_independent() {
        let registry = ready_registry();
        assert_eq!(
            registry.classify(&ConditionType::new("Ready")),
            ConditionKind::Root
        );
        assert_eq!(
            registry.classify(&ConditionType::new("Synced")),
            ConditionKind::Dependent
        );
        assert_eq!(
            registry.classify(&ConditionType::new("Paused")),
            ConditionKind::Independent
        );
    }

    #[test]
    fn root_and_dependents_are_dependent_conditions() {
        let registry = ready_registry();
        assert!(registry.is_dependent(&ConditionType::new("Ready")));
        assert!(registry.is_dependent(&ConditionType::new("Healthy")));
        assert!(!registry.is_dependent(&ConditionType::new("Paused")));
    }

    #[test]
    fn root_listed_as_dependent_is_dropped() {
        let registry = ConditionRegistry::new(
            ConditionType::new("Ready"),
            [ConditionType::new("Ready"), ConditionType::new("Synced")],
        );
        assert_eq!(registry.dependents().count(), 1);
        assert_eq!(
            registry.classify(&ConditionType::new("Ready")),
            ConditionKind::Root
        );
    }

    #[test]
    fn dependents_iterate_in_deterministic_order() {
        let registry = ConditionRegistry::new(
            ConditionType::new("Ready"),
            [
                ConditionType::new("Zeta"),
                ConditionType::new("Alpha"),
                ConditionType::new("Mid"),
            ],
        );
        let names: Vec<_> = registry.dependents().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }
}
