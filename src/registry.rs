// src/registry.rs
//
// One Track per distinct track identifier, owned exclusively by the
// registry; all mutation goes through `get_or_create`. Tracks are created
// lazily on first observation and live for the whole session.

use std::collections::HashMap;

use crate::crossing::{CrossingMachine, CrossingState};
use crate::types::{Event, TieBreak};

/// A single tracked person: its crossing state machine plus the
/// append-only log of confirmed events.
#[derive(Debug, Clone)]
pub struct Track {
    machine: CrossingMachine,
    events: Vec<Event>,
}

impl Track {
    fn new(tie_break: TieBreak) -> Self {
        Self {
            machine: CrossingMachine::new(tie_break),
            events: Vec::new(),
        }
    }

    /// Feed one observation's line-test results; a confirmed crossing is
    /// appended to the log and also returned to the caller.
    pub fn observe(
        &mut self,
        interior_hit: bool,
        exterior_hit: bool,
        timestamp: f64,
    ) -> Option<Event> {
        let event = self.machine.observe(interior_hit, exterior_hit, timestamp);
        if let Some(ev) = event {
            self.events.push(ev);
        }
        event
    }

    pub fn state(&self) -> CrossingState {
        self.machine.state()
    }

    /// Confirmed events in temporal order of detection.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

/// Registry of every track seen in a session, keyed by the tracker-assigned
/// identifier. Identity equality on the id string is the only collision
/// handling; ids are opaque here.
#[derive(Debug)]
pub struct TrackRegistry {
    tie_break: TieBreak,
    tracks: HashMap<String, Track>,
}

impl TrackRegistry {
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            tie_break,
            tracks: HashMap::new(),
        }
    }

    /// Get the track for `track_id`, instantiating it in `Idle` on first
    /// reference.
    pub fn get_or_create(&mut self, track_id: &str) -> &mut Track {
        self.tracks
            .entry(track_id.to_string())
            .or_insert_with(|| Track::new(self.tie_break))
    }

    pub fn get(&self, track_id: &str) -> Option<&Track> {
        self.tracks.get(track_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Track)> {
        self.tracks.iter().map(|(id, t)| (id.as_str(), t))
    }
}
