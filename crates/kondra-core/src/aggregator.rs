//! # Condition Aggregator
//!
//! The stateful-operation layer bound to one live resource handle.
//!
//! A reconciliation step for sub-feature X records X's outcome here; the
//! aggregator updates X's entry, re-sorts the condition list, and recomputes
//! the derived root condition by scanning all declared dependents.
//!
//! All mutations are:
//! - Deterministic (stable sorts, no randomness)
//! - Idempotent (re-applying an equivalent outcome is a no-op)
//! - Synchronous (no I/O, no blocking, no retries)
//!
//! The aggregator owns no state: it is a pure transformation applied to the
//! bound [`StatusObject`] on each call, and assumes exclusive ownership of
//! that handle for the duration of one reconciliation step.

use crate::clock::{Clock, SYSTEM_CLOCK};
use crate::registry::ConditionRegistry;
use crate::{Condition, ConditionStatus, ConditionType, KondraError, StatusObject};
use std::cmp::Ordering;

// =============================================================================
// DEGRADED-PATH LOGGING
// =============================================================================

/// Log a write attempted against an unbound aggregator.
///
/// The engine degrades rather than fails here, but the event should not be
/// silent. Uses stderr logging to keep the core free of a tracing
/// dependency; the app layer can redirect stderr if needed.
#[inline]
fn warn_unbound(operation: &str) {
    eprintln!(
        "{{\"level\":\"warn\",\"target\":\"kondra_core::aggregator\",\"message\":\"{} called on unbound aggregator; no resource handle to mutate\"}}",
        operation
    );
}

// =============================================================================
// AGGREGATOR
// =============================================================================

/// Evaluates and mutates the condition list of one bound resource.
///
/// Construction binds the aggregator to a [`ConditionRegistry`] (shared,
/// per-resource-kind) and at most one [`StatusObject`] (the live resource).
/// An unbound aggregator degrades gracefully: reads return empty results and
/// writes report `modified = false`.
pub struct ConditionAggregator<'a> {
    /// Root/dependent classification for this resource kind.
    registry: &'a ConditionRegistry,
    /// Wall-clock source for transition timestamps.
    clock: &'a dyn Clock,
    /// The bound resource handle, if any.
    object: Option<&'a mut dyn StatusObject>,
}

impl<'a> ConditionAggregator<'a> {
    /// Bind to a resource handle using the system clock.
    #[must_use]
    pub fn bind(registry: &'a ConditionRegistry, object: &'a mut dyn StatusObject) -> Self {
        Self {
            registry,
            clock: &SYSTEM_CLOCK,
            object: Some(object),
        }
    }

    /// Bind to a resource handle with an explicit clock.
    #[must_use]
    pub fn bind_with_clock(
        registry: &'a ConditionRegistry,
        clock: &'a dyn Clock,
        object: &'a mut dyn StatusObject,
    ) -> Self {
        Self {
            registry,
            clock,
            object: Some(object),
        }
    }

    /// Create an aggregator with no resource handle.
    ///
    /// Every read returns the zero/empty result and every write reports
    /// `modified = false`; nothing panics.
    #[must_use]
    pub fn unbound(registry: &'a ConditionRegistry) -> Self {
        Self {
            registry,
            clock: &SYSTEM_CLOCK,
            object: None,
        }
    }

    // =========================================================================
    // READ OPERATIONS
    // =========================================================================

    /// Find the condition that matches the given type, if stored.
    #[must_use]
    pub fn get(&self, condition_type: &ConditionType) -> Option<Condition> {
        self.object.as_deref().and_then(|object| {
            object
                .conditions()
                .iter()
                .find(|c| c.condition_type == *condition_type)
                .cloned()
        })
    }

    /// The currently-stored condition list, in stored order.
    ///
    /// Callers should not assume semantic ordering beyond what `set` and
    /// `clear` leave behind.
    #[must_use]
    pub fn list(&self) -> Vec<Condition> {
        self.object
            .as_deref()
            .map(|object| object.conditions().to_vec())
            .unwrap_or_default()
    }

    /// Check that every named type is currently stored with status `True`.
    /// An absent condition counts as not true.
    #[must_use]
    pub fn is_true(&self, condition_types: &[ConditionType]) -> bool {
        condition_types
            .iter()
            .all(|t| self.get(t).is_some_and(|c| c.is_true()))
    }

    /// The root condition, typically "Ready" or "Succeeded".
    #[must_use]
    pub fn root(&self) -> Option<Condition> {
        self.get(self.registry.root())
    }

    /// Readiness of the root condition.
    ///
    /// Requires the root to be `True` *and* observed at the resource's
    /// current generation: readiness must be current, not left over from a
    /// prior spec generation.
    #[must_use]
    pub fn is_root_ready(&self) -> bool {
        let Some(object) = self.object.as_deref() else {
            return false;
        };
        self.root()
            .is_some_and(|root| root.is_true() && root.observed_generation == object.generation())
    }

    /// Check whether a condition type is involved in computing the root.
    #[must_use]
    pub fn is_dependent_condition(&self, condition_type: &ConditionType) -> bool {
        self.registry.is_dependent(condition_type)
    }

    // =========================================================================
    // WRITE OPERATIONS
    // =========================================================================

    /// Set or update the condition stored for `condition.condition_type`.
    ///
    /// This is the only primitive mutator; the `set_*` wrappers all funnel
    /// through here. Returns whether the stored list changed.
    ///
    /// - `observed_generation` is stamped with the resource's current
    ///   generation; any caller-supplied value is overwritten.
    /// - `last_transition_time` is carried over when the status is
    ///   unchanged, set to now when it transitions, and backdated to the
    ///   resource's creation timestamp on the first observation of a
    ///   root/dependent type.
    /// - If the fully-derived condition equals the stored one field for
    ///   field, the handle is left untouched and `false` is returned.
    /// - Setting any non-root condition recomputes the root afterwards.
    pub fn set(&mut self, mut condition: Condition) -> bool {
        let registry = self.registry;
        let clock = self.clock;
        let Some(object) = self.object.as_deref_mut() else {
            warn_unbound("set");
            return false;
        };

        let generation = object.generation();
        let deleting = object.deletion_timestamp().is_some();
        condition.observed_generation = generation;

        let mut conditions: Vec<Condition> = Vec::with_capacity(object.conditions().len() + 1);
        let mut found = false;
        for stored in object.conditions() {
            if stored.condition_type != condition.condition_type {
                let mut retained = stored.clone();
                // Deletion freezes meaningful transitions but must not let
                // every other condition appear stale forever.
                if deleting {
                    retained.observed_generation = generation;
                }
                conditions.push(retained);
            } else {
                found = true;
                if condition.status == stored.status {
                    condition.last_transition_time = stored.last_transition_time;
                } else {
                    condition.last_transition_time = Some(clock.now());
                }
                if condition == *stored {
                    // Idempotence guarantee: no change, no write-back.
                    return false;
                }
            }
        }
        if !found {
            // First observation of this type. Dependent conditions always
            // exist conceptually, so their first "transition" was object
            // creation; independent conditions transition now.
            condition.last_transition_time = if registry.is_dependent(&condition.condition_type) {
                Some(object.creation_timestamp())
            } else {
                Some(clock.now())
            };
        }

        let condition_type = condition.condition_type.clone();
        conditions.push(condition);
        // Sorted for deterministic external presentation.
        sort_for_presentation(registry.root(), &mut conditions);
        object.set_conditions(conditions);

        if condition_type != *registry.root() {
            self.recompute_root();
        }
        true
    }

    /// Remove an independent condition.
    ///
    /// Root and dependent conditions can't be cleared, only transitioned;
    /// attempting to clear one fails without touching the handle. Clearing
    /// a type that is not stored is a no-op.
    pub fn clear(&mut self, condition_type: &ConditionType) -> Result<(), KondraError> {
        let registry = self.registry;
        let Some(object) = self.object.as_deref_mut() else {
            warn_unbound("clear");
            return Ok(());
        };

        if registry.is_dependent(condition_type) {
            return Err(KondraError::DependentConditionImmutable(
                condition_type.clone(),
            ));
        }
        if !object
            .conditions()
            .iter()
            .any(|c| c.condition_type == *condition_type)
        {
            return Ok(());
        }

        let mut conditions: Vec<Condition> = object
            .conditions()
            .iter()
            .filter(|c| c.condition_type != *condition_type)
            .cloned()
            .collect();
        // This path only ever removes independent conditions, so a simple
        // name order suffices.
        conditions.sort_by(|a, b| a.condition_type.cmp(&b.condition_type));
        object.set_conditions(conditions);
        Ok(())
    }

    // =========================================================================
    // CONVENIENCE WRAPPERS
    // =========================================================================

    /// Set `condition_type` to `True` with its own name as the reason.
    pub fn set_true(&mut self, condition_type: ConditionType) -> bool {
        let reason = condition_type.as_str().to_owned();
        self.set_true_with_reason(condition_type, &reason, "")
    }

    /// Set `condition_type` to `True` with the given reason and message.
    /// An empty reason or message is stored as absent.
    pub fn set_true_with_reason(
        &mut self,
        condition_type: ConditionType,
        reason: &str,
        message: &str,
    ) -> bool {
        self.set(Condition {
            condition_type,
            status: ConditionStatus::True,
            reason: non_empty(reason),
            message: non_empty(message),
            last_transition_time: None,
            observed_generation: 0,
        })
    }

    /// Set `condition_type` to `False` with the given reason and message.
    pub fn set_false(&mut self, condition_type: ConditionType, reason: &str, message: &str) -> bool {
        self.set(Condition {
            condition_type,
            status: ConditionStatus::False,
            reason: non_empty(reason),
            message: non_empty(message),
            last_transition_time: None,
            observed_generation: 0,
        })
    }

    /// Set `condition_type` to `Unknown` with a default awaiting-reconciliation
    /// reason.
    pub fn set_unknown(&mut self, condition_type: ConditionType) -> bool {
        let message = format!(
            "condition {:?} is awaiting reconciliation",
            condition_type.as_str()
        );
        self.set_unknown_with_reason(condition_type, "AwaitingReconciliation", &message)
    }

    /// Set `condition_type` to `Unknown` with the given reason and message.
    pub fn set_unknown_with_reason(
        &mut self,
        condition_type: ConditionType,
        reason: &str,
        message: &str,
    ) -> bool {
        self.set(Condition {
            condition_type,
            status: ConditionStatus::Unknown,
            reason: non_empty(reason),
            message: non_empty(message),
            last_transition_time: None,
            observed_generation: 0,
        })
    }

    // =========================================================================
    // ROOT RECOMPUTATION
    // =========================================================================

    /// Recompute the root condition from the declared dependents.
    ///
    /// A dependent is unhealthy when it is absent, `False`, `Unknown`, or
    /// observed at a generation other than the resource's current one.
    /// With zero unhealthy dependents the root becomes `True`; otherwise it
    /// mirrors the most-recently-transitioned `False` dependent, then the
    /// most-recently-transitioned `Unknown` one. When unhealthiness stems
    /// purely from absent or stale-but-`True` dependents, an `Unknown`
    /// representative is synthesized so the root never keeps a stale reason
    /// while failing readiness.
    fn recompute_root(&mut self) {
        let registry = self.registry;
        let root = registry.root().clone();
        let Some(object) = self.object.as_deref() else {
            return;
        };
        let generation = object.generation();

        let mut unhealthy: Vec<Condition> = Vec::new();
        let mut unreconciled: Vec<ConditionType> = Vec::new();
        for dependent in registry.dependents() {
            let stored = object
                .conditions()
                .iter()
                .find(|c| c.condition_type == *dependent);
            match stored {
                Some(cond) if cond.is_false() || cond.is_unknown() => {
                    unhealthy.push(cond.clone());
                }
                Some(cond) if cond.observed_generation != generation => {
                    unreconciled.push(dependent.clone());
                }
                Some(_) => {}
                None => unreconciled.push(dependent.clone()),
            }
        }

        if unhealthy.is_empty() && unreconciled.is_empty() {
            self.set_true(root);
        } else if let Some(worst) = most_unhealthy(unhealthy) {
            // Root adopts the representative's status/reason/message; its
            // own transition-time and idempotence rules apply via `set`.
            self.set(Condition {
                condition_type: root,
                status: worst.status,
                reason: worst.reason,
                message: worst.message,
                last_transition_time: None,
                observed_generation: 0,
            });
        } else {
            // Unhealthy purely by absence or staleness: degraded confidence,
            // not a confirmed failure.
            let names = unreconciled
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let message = format!(
                "dependent conditions not yet reconciled at generation {}: {}",
                generation, names
            );
            self.set_unknown_with_reason(root, "AwaitingReconciliation", &message);
        }
    }
}

// =============================================================================
// ORDERING RULES
// =============================================================================

/// Sort a condition list for external presentation.
///
/// The root condition is always ordered last; all others ascend by
/// `last_transition_time`, an absent timestamp sorting earliest. The sort is
/// stable, so ties keep their relative order.
fn sort_for_presentation(root: &ConditionType, conditions: &mut [Condition]) {
    conditions.sort_by(|a, b| {
        if a.condition_type == *root {
            Ordering::Greater
        } else if b.condition_type == *root {
            Ordering::Less
        } else {
            a.last_transition_time.cmp(&b.last_transition_time)
        }
    });
}

/// Select the representative of a set of unhealthy dependents.
///
/// `False` trumps `Unknown`; within a status, the most recent transition
/// wins, and an absent timestamp is never preferred over a present one.
fn most_unhealthy(mut unhealthy: Vec<Condition>) -> Option<Condition> {
    unhealthy.sort_by(|a, b| b.last_transition_time.cmp(&a.last_transition_time));
    unhealthy
        .iter()
        .find(|c| c.is_false())
        .or_else(|| unhealthy.iter().find(|c| c.is_unknown()))
        .cloned()
}

/// Store an empty reason/message as absent.
fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_owned()) }
}

// =============================================================================
// TESTS
// =============================================================================
