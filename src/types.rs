use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Segment};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub counting: CountingConfig,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CountingConfig {
    /// Which line test wins when one observation touches both lines.
    pub tie_break: TieBreak,
    /// How repeated events in a track's log are collapsed before counting.
    pub dedupe: DedupePolicy,
    /// Test both box diagonals against each line (higher recall) or only
    /// the top-left↔bottom-right one.
    pub use_both_diagonals: bool,
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::InteriorFirst,
            dedupe: DedupePolicy::ConsecutiveCollapse,
            use_both_diagonals: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    InteriorFirst,
    ExteriorFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupePolicy {
    /// Drop an event whose action equals the previously retained one.
    /// Supports re-entry within a session; the default.
    ConsecutiveCollapse,
    /// Retain at most one occurrence of each action per track, ever.
    FirstOccurrence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// A session JSON file, or a directory walked for `*.json` sessions.
    pub session_path: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            session_path: "detections.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// The two calibrated reference lines, already scaled into frame
/// coordinates. Built once per session, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceLines {
    pub interior: Segment,
    pub exterior: Segment,
}

/// One validated detection: the raw heterogeneous JSON entry reduced to a
/// typed record at the session boundary.
#[derive(Debug, Clone)]
pub struct Observation {
    pub track_id: String,
    pub bbox: BoundingBox,
}

/// One frame's worth of validated detections.
#[derive(Debug, Clone)]
pub struct Frame {
    pub timestamp: f64,
    pub detections: Vec<Observation>,
}

/// A confirmed crossing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Enter,
    Exit,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enter => "ENTER",
            Self::Exit => "EXIT",
        }
    }
}

/// A confirmed crossing, appended to its track's log and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub timestamp: f64,
    pub action: Action,
}

/// Final per-session occupancy numbers, derived from the full set of track
/// logs after the pass completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counts {
    pub entries: u64,
    pub exits: u64,
    pub present: u64,
}
