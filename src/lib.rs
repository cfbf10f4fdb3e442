//! # visitor-counter
//!
//! Converts a detection session — per-frame person bounding boxes from an
//! external detector/tracker — into entry/exit/occupancy counts for a
//! monitored space, by detecting when a tracked box crosses two calibrated
//! reference lines (interior and exterior).
//!
//! A crossing is only confirmed by sequential two-line contact: a track
//! must touch one line and then the other, which filters single-line
//! jitter near the doorway. Repeated confirmations are collapsed per track
//! before the final fold into counts.
//!
//! ## Example
//!
//! ```rust,ignore
//! use visitor_counter::{session, SessionCounter};
//! use visitor_counter::types::CountingConfig;
//!
//! let data = session::load_session("detections.json".as_ref())?;
//! let calibration = session::extract_calibration(&data)?;
//! let counts = SessionCounter::new(calibration, CountingConfig::default()).run();
//! println!("entries={} exits={} present={}", counts.entries, counts.exits, counts.present);
//! ```

pub mod config;
pub mod counter;
pub mod crossing;
pub mod dedupe;
pub mod geometry;
pub mod pipeline;
pub mod registry;
pub mod session;
pub mod types;

pub use counter::aggregate;
pub use crossing::{CrossingMachine, CrossingState};
pub use dedupe::dedupe;
pub use geometry::{BoundingBox, Point, Segment};
pub use pipeline::SessionCounter;
pub use registry::{Track, TrackRegistry};
pub use types::{Action, Config, Counts, Event, Frame, Observation, ReferenceLines};
