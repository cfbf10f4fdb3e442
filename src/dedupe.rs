// src/dedupe.rs
//
// Collapse jitter in a track's event log before counting. A person whose
// box lingers on both lines across several frames records the same event
// repeatedly; counting wants the logical transitions only. Timestamps are
// dropped at this stage, order preserved.

use crate::types::{Action, DedupePolicy, Event};

/// Reduce an event log to its action sequence under the given policy.
///
/// `ConsecutiveCollapse` keeps alternation (ENTER,ENTER,EXIT,ENTER →
/// ENTER,EXIT,ENTER) so a track can re-enter within a session.
/// `FirstOccurrence` keeps at most one ENTER and one EXIT total, the
/// stricter historical behavior.
pub fn dedupe(events: &[Event], policy: DedupePolicy) -> Vec<Action> {
    let mut actions: Vec<Action> = Vec::with_capacity(events.len());
    for event in events {
        let keep = match policy {
            DedupePolicy::ConsecutiveCollapse => actions.last() != Some(&event.action),
            DedupePolicy::FirstOccurrence => !actions.contains(&event.action),
        };
        if keep {
            actions.push(event.action);
        }
    }
    actions
}
