// src/crossing.rs
//
// Per-track crossing state machine.
//
// A single line touch is ambiguous: it can be detector jitter, or a person
// approaching the doorway without walking through. A crossing is only
// confirmed by sequential two-line contact — touch one line, then the other.
// Touching the interior line arms an entry; a later exterior touch while
// entry-armed confirms an EXIT (the person moved interior → exterior), and
// symmetrically for ENTER. Confirmation states re-arm immediately, so a
// track can enter and leave any number of times in one session.

use tracing::debug;

use crate::types::{Action, Event, TieBreak};

/// Crossing state of one track. `Idle` until the track first touches a
/// line; the confirmed states are not absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossingState {
    #[default]
    Idle,
    /// Exterior line touched; an interior touch will confirm an ENTER.
    ExitPending,
    /// Interior line touched; an exterior touch will confirm an EXIT.
    EntryPending,
    EntryConfirmed,
    ExitConfirmed,
}

impl CrossingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::ExitPending => "EXIT_PENDING",
            Self::EntryPending => "ENTRY_PENDING",
            Self::EntryConfirmed => "ENTRY_CONFIRMED",
            Self::ExitConfirmed => "EXIT_CONFIRMED",
        }
    }
}

/// The state machine proper. One instance per track; fed one observation's
/// line-test results at a time, in that track's chronological order.
#[derive(Debug, Clone)]
pub struct CrossingMachine {
    state: CrossingState,
    tie_break: TieBreak,
}

impl CrossingMachine {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            state: CrossingState::Idle,
            tie_break,
        }
    }

    pub fn state(&self) -> CrossingState {
        self.state
    }

    /// Consume one observation's line-test outcome. Emits at most one event.
    ///
    /// When the observation touches both lines at once the configured
    /// tie-break decides which touch is processed; the other is dropped for
    /// this observation. Every input transitions deterministically — there
    /// is no failure path here.
    pub fn observe(
        &mut self,
        interior_hit: bool,
        exterior_hit: bool,
        timestamp: f64,
    ) -> Option<Event> {
        let before = self.state;
        let event = match self.tie_break {
            TieBreak::InteriorFirst => {
                if interior_hit {
                    self.touch_interior(timestamp)
                } else if exterior_hit {
                    self.touch_exterior(timestamp)
                } else {
                    None
                }
            }
            TieBreak::ExteriorFirst => {
                if exterior_hit {
                    self.touch_exterior(timestamp)
                } else if interior_hit {
                    self.touch_interior(timestamp)
                } else {
                    None
                }
            }
        };

        if before != self.state {
            debug!(
                "crossing state {} -> {} (int={} ext={})",
                before.as_str(),
                self.state.as_str(),
                interior_hit,
                exterior_hit
            );
        }
        event
    }

    /// Interior touch: confirms an ENTER when exit-armed, otherwise arms
    /// for an exit.
    fn touch_interior(&mut self, timestamp: f64) -> Option<Event> {
        if self.state == CrossingState::ExitPending {
            self.state = CrossingState::EntryConfirmed;
            Some(Event {
                timestamp,
                action: Action::Enter,
            })
        } else {
            self.state = CrossingState::EntryPending;
            None
        }
    }

    /// Exterior touch: confirms an EXIT when entry-armed, otherwise arms
    /// for an entry.
    fn touch_exterior(&mut self, timestamp: f64) -> Option<Event> {
        if self.state == CrossingState::EntryPending {
            self.state = CrossingState::ExitConfirmed;
            Some(Event {
                timestamp,
                action: Action::Exit,
            })
        } else {
            self.state = CrossingState::ExitPending;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> CrossingMachine {
        CrossingMachine::new(TieBreak::InteriorFirst)
    }

    #[test]
    fn test_no_contact_leaves_state_unchanged() {
        let mut m = machine();
        assert!(m.observe(false, false, 1.0).is_none());
        assert_eq!(m.state(), CrossingState::Idle);
    }

    #[test]
    fn test_single_line_touch_never_confirms() {
        // Interior only, over and over: zero confirmed events
        let mut m = machine();
        for i in 0..10 {
            assert!(m.observe(true, false, i as f64).is_none());
        }
        assert_eq!(m.state(), CrossingState::EntryPending);
    }

    #[test]
    fn test_exterior_then_interior_is_enter() {
        let mut m = machine();
        assert!(m.observe(false, true, 1.0).is_none());
        assert_eq!(m.state(), CrossingState::ExitPending);

        let ev = m.observe(true, false, 2.0).expect("ENTER confirmed");
        assert_eq!(ev.action, Action::Enter);
        assert_eq!(ev.timestamp, 2.0);
        assert_eq!(m.state(), CrossingState::EntryConfirmed);
    }

    #[test]
    fn test_interior_then_exterior_is_exit() {
        let mut m = machine();
        assert!(m.observe(true, false, 1.0).is_none());

        let ev = m.observe(false, true, 2.0).expect("EXIT confirmed");
        assert_eq!(ev.action, Action::Exit);
        assert_eq!(m.state(), CrossingState::ExitConfirmed);
    }

    #[test]
    fn test_confirmed_state_rearms() {
        // Enter, then leave again: the confirmed state must not absorb
        let mut m = machine();
        m.observe(false, true, 1.0);
        assert_eq!(m.observe(true, false, 2.0).unwrap().action, Action::Enter);

        m.observe(true, false, 3.0);
        assert_eq!(m.state(), CrossingState::EntryPending);
        assert_eq!(m.observe(false, true, 4.0).unwrap().action, Action::Exit);
    }

    #[test]
    fn test_both_lines_interior_priority() {
        // Exit-armed + both lines hit: interior wins, ENTER confirmed
        let mut m = machine();
        m.observe(false, true, 1.0);
        let ev = m.observe(true, true, 2.0).expect("interior wins");
        assert_eq!(ev.action, Action::Enter);

        // Idle + both lines hit: interior arm, no event
        let mut m2 = machine();
        assert!(m2.observe(true, true, 1.0).is_none());
        assert_eq!(m2.state(), CrossingState::EntryPending);
    }

    #[test]
    fn test_both_lines_exterior_priority() {
        let mut m = CrossingMachine::new(TieBreak::ExteriorFirst);
        m.observe(true, false, 1.0);
        let ev = m.observe(true, true, 2.0).expect("exterior wins");
        assert_eq!(ev.action, Action::Exit);

        let mut m2 = CrossingMachine::new(TieBreak::ExteriorFirst);
        assert!(m2.observe(true, true, 1.0).is_none());
        assert_eq!(m2.state(), CrossingState::ExitPending);
    }

    #[test]
    fn test_repeated_pending_touches_stay_pending() {
        // Lingering near the exterior line must not build phantom events
        let mut m = machine();
        for i in 0..5 {
            assert!(m.observe(false, true, i as f64).is_none());
            assert_eq!(m.state(), CrossingState::ExitPending);
        }
    }
}
