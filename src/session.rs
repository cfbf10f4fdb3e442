// src/session.rs
//
// Detection-session loading and calibration extraction. This is the system
// boundary: everything downstream of here works on typed records, so the
// raw wire shape — heterogeneous per-person arrays with a trailing
// track-id object — is validated exactly once, in this module.
//
// Wire format (one camera record per session):
//   eventSpecific.nnDetect.<camera_id>.cfg.cross_lines[0] = {ext_line,
//     int_line, box}, coordinates in calibration-box space
//   eventSpecific.nnDetect.<camera_id>.cfg.video_frames = frame dims
//   eventSpecific.nnDetect.<camera_id>.frames.<key> = {timestamp,
//     detected.person[] = [x1, y1, x2, y2, confidence, {id: {track_id}}]}
//
// Reference-line coordinates are rescaled linearly per axis from the
// calibration box into frame space: scaled = raw / box_dim * frame_dim.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::geometry::{BoundingBox, Segment};
use crate::types::{Frame, Observation, ReferenceLines};

const DEFAULT_FRAME_WIDTH: f64 = 640.0;
const DEFAULT_FRAME_HEIGHT: f64 = 360.0;

#[derive(Debug, Deserialize)]
pub struct SessionData {
    #[serde(rename = "eventSpecific")]
    event_specific: EventSpecific,
}

#[derive(Debug, Deserialize)]
struct EventSpecific {
    #[serde(rename = "nnDetect")]
    nn_detect: BTreeMap<String, CameraRecord>,
}

#[derive(Debug, Deserialize)]
struct CameraRecord {
    cfg: CameraCfg,
    #[serde(default)]
    frames: BTreeMap<String, FrameRecord>,
}

#[derive(Debug, Deserialize)]
struct CameraCfg {
    #[serde(default)]
    cross_lines: Vec<CrossLines>,
    #[serde(default)]
    video_frames: VideoFrames,
}

#[derive(Debug, Deserialize)]
struct CrossLines {
    ext_line: [f64; 4],
    int_line: [f64; 4],
    #[serde(rename = "box")]
    box_dimensions: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
struct VideoFrames {
    frame_width: Option<f64>,
    frame_height: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FrameRecord {
    timestamp: f64,
    #[serde(default)]
    detected: BTreeMap<String, Vec<Value>>,
}

/// Calibration plus the session's frames, ready for the counting pass.
#[derive(Debug)]
pub struct Calibration {
    pub lines: ReferenceLines,
    pub frames: Vec<Frame>,
}

/// Read and parse a session file. I/O or JSON failure is an error for this
/// session only; callers log it and move on.
pub fn load_session(path: &Path) -> Result<SessionData> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read session file {}", path.display()))?;
    let session: SessionData = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse session file {}", path.display()))?;
    Ok(session)
}

/// Extract reference lines and chronologically ordered frames from a
/// session. Missing or degenerate calibration is a configuration error and
/// aborts the session with no partial counts.
pub fn extract_calibration(session: &SessionData) -> Result<Calibration> {
    let cameras = &session.event_specific.nn_detect;
    let (camera_id, camera) = cameras
        .iter()
        .next()
        .context("session contains no camera record")?;
    if cameras.len() > 1 {
        warn!(
            "session contains {} camera records, using {}",
            cameras.len(),
            camera_id
        );
    }

    let cross = camera
        .cfg
        .cross_lines
        .first()
        .context("calibration has no cross_lines entry")?;

    let [box_width, box_height] = cross.box_dimensions;
    if box_width <= 0.0 || box_height <= 0.0 {
        bail!(
            "calibration reference box is degenerate: {}x{}",
            box_width,
            box_height
        );
    }

    let frame_width = camera
        .cfg
        .video_frames
        .frame_width
        .unwrap_or(DEFAULT_FRAME_WIDTH);
    let frame_height = camera
        .cfg
        .video_frames
        .frame_height
        .unwrap_or(DEFAULT_FRAME_HEIGHT);

    let lines = ReferenceLines {
        interior: scale_to_line(&cross.int_line, (box_width, box_height), (frame_width, frame_height)),
        exterior: scale_to_line(&cross.ext_line, (box_width, box_height), (frame_width, frame_height)),
    };

    let mut frames: Vec<Frame> = camera
        .frames
        .values()
        .map(|record| Frame {
            timestamp: record.timestamp,
            detections: parse_people(record),
        })
        .collect();
    // Frame keys are opaque; the timestamp field is authoritative for order.
    frames.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    debug!(
        "calibration: interior {:?}, exterior {:?}, {} frames",
        lines.interior,
        lines.exterior,
        frames.len()
    );

    Ok(Calibration { lines, frames })
}

/// Rescale calibration-space endpoints into frame space, per axis.
pub fn scale_to_line(coords: &[f64; 4], box_dims: (f64, f64), frame_dims: (f64, f64)) -> Segment {
    let (box_width, box_height) = box_dims;
    let (frame_width, frame_height) = frame_dims;
    Segment::from_coords(
        coords[0] / box_width * frame_width,
        coords[1] / box_height * frame_height,
        coords[2] / box_width * frame_width,
        coords[3] / box_height * frame_height,
    )
}

/// Validate one frame's raw person entries. A malformed entry is skipped
/// with a warning; one bad detection must not invalidate the session.
fn parse_people(record: &FrameRecord) -> Vec<Observation> {
    let people = match record.detected.get("person") {
        Some(people) => people,
        None => return Vec::new(),
    };

    people
        .iter()
        .filter_map(|raw| match parse_person(raw) {
            Some(obs) => Some(obs),
            None => {
                warn!(
                    "skipping malformed detection at timestamp {}: {}",
                    record.timestamp, raw
                );
                None
            }
        })
        .collect()
}

/// One raw person entry: at least four numeric coordinates, then optional
/// extras, ending in an object whose first value carries the track id. The
/// confidence at index 4 is present on the wire and deliberately unused.
fn parse_person(raw: &Value) -> Option<Observation> {
    let entry = raw.as_array()?;
    if entry.len() < 5 {
        return None;
    }

    let mut coords = [0.0f64; 4];
    for (slot, value) in coords.iter_mut().zip(entry.iter()) {
        *slot = value.as_f64()?;
    }

    let track_id = entry
        .last()?
        .as_object()?
        .values()
        .next()?
        .get("track_id")?
        .as_str()?;
    if track_id.is_empty() {
        return None;
    }

    Some(Observation {
        track_id: track_id.to_string(),
        bbox: BoundingBox::new(coords[0], coords[1], coords[2], coords[3]),
    })
}
