// src/pipeline.rs
//
// The session pass: owns the reference lines and the track registry,
// drives every frame's observations through the per-track state machines,
// then folds the logs into counts. Single-threaded, one pass, no partial
// results until `finish`.

use tracing::{debug, info};

use crate::counter::aggregate;
use crate::registry::TrackRegistry;
use crate::session::Calibration;
use crate::types::{Counts, CountingConfig, Frame, Observation};

pub struct SessionCounter {
    calibration: Calibration,
    registry: TrackRegistry,
    config: CountingConfig,
}

impl SessionCounter {
    pub fn new(calibration: Calibration, config: CountingConfig) -> Self {
        Self {
            registry: TrackRegistry::new(config.tie_break),
            calibration,
            config,
        }
    }

    /// Run the full batch pass over the session's frames and return the
    /// final counts.
    pub fn run(mut self) -> Counts {
        let frames = std::mem::take(&mut self.calibration.frames);
        for frame in &frames {
            self.process_frame(frame);
        }
        info!(
            "processed {} frames, {} distinct tracks",
            frames.len(),
            self.registry.len()
        );
        self.finish()
    }

    /// Feed one frame's validated observations to their tracks.
    pub fn process_frame(&mut self, frame: &Frame) {
        for obs in &frame.detections {
            self.process_observation(obs, frame.timestamp);
        }
    }

    fn process_observation(&mut self, obs: &Observation, timestamp: f64) {
        let lines = &self.calibration.lines;
        let interior_hit = obs
            .bbox
            .sweeps_across(&lines.interior, self.config.use_both_diagonals);
        let exterior_hit = obs
            .bbox
            .sweeps_across(&lines.exterior, self.config.use_both_diagonals);

        let track = self.registry.get_or_create(&obs.track_id);
        if let Some(event) = track.observe(interior_hit, exterior_hit, timestamp) {
            debug!(
                "track {} confirmed {} at {}",
                obs.track_id,
                event.action.as_str(),
                event.timestamp
            );
        }
    }

    /// Aggregate the accumulated logs. Pure over the registry; callable
    /// repeatedly with identical results.
    pub fn finish(&self) -> Counts {
        aggregate(&self.registry, self.config.dedupe)
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }
}
