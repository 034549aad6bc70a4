pub mod core;
pub mod models;
pub mod platform;

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use crate::core::config::{GestureConfig, MotionThresholds, PoseThresholds, StateUpdatePolicy};
pub use crate::core::frame_processor::FrameProcessor;
pub use crate::core::gesture_recognizer::{GestureRecognizer, RecognizerStats};
pub use crate::core::motion_classifier::{classify_motion, MotionClassifier, TemporalState};
pub use crate::core::pose_classifier::{classify_pose, PoseClassifier};
pub use crate::models::gesture::{
    FingerState, FrameOutcome, GestureError, GestureEvent, GestureResult, MotionGesture, PoseLabel,
};
pub use crate::models::hand::{Frame, HandLandmark, HandLandmarks, HandRect, Landmark};
pub use crate::platform::{FrameSource, JsonLinesSource, ReplaySource};

/// How classified frames are written by [`run`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `pose<TAB>motion`, one line per frame
    #[default]
    Text,
    /// One JSON [`GestureEvent`] per line
    Json,
}

/// Totals for one [`run`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub motion_events: u64,
}

/// Classify every frame of `source` in order, writing one line per frame.
///
/// Frames that cannot be decoded or classified are logged and skipped. A
/// failure to read from the source or to write output ends the run early.
pub fn run(
    source: &mut dyn FrameSource,
    config: &GestureConfig,
    format: OutputFormat,
    out: &mut dyn Write,
) -> GestureResult<RunSummary> {
    config.validate()?;
    info!("Reading frames from {}", source.describe());

    let mut processor = FrameProcessor::new(config);
    let mut summary = RunSummary::default();

    loop {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(GestureError::Io(e)) => return Err(GestureError::Io(e)),
            Err(e) => {
                warn!("Skipping unreadable frame: {}", e);
                summary.frames_skipped += 1;
                continue;
            }
        };

        let outcome = match processor.process(&frame) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Skipping frame {}: {}", frame.timestamp, e);
                summary.frames_skipped += 1;
                continue;
            }
        };

        summary.frames_processed += 1;
        if outcome.motion.is_some() {
            summary.motion_events += 1;
        }

        match format {
            OutputFormat::Text => writeln!(
                out,
                "{}\t{}",
                outcome.pose,
                MotionGesture::label(outcome.motion)
            )?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &GestureEvent::from(outcome))?;
                writeln!(out)?;
            }
        }
    }

    info!(
        "Processed {} frames ({} skipped, {} motion gestures)",
        summary.frames_processed, summary.frames_skipped, summary.motion_events
    );
    Ok(summary)
}
