// Runs both classifiers on one frame at a time

use tracing::{debug, trace};

use crate::core::config::GestureConfig;
use crate::core::motion_classifier::MotionClassifier;
use crate::core::pose_classifier::PoseClassifier;
use crate::models::gesture::{FrameOutcome, GestureError, GestureResult};
use crate::models::hand::Frame;

/// Synchronous per-frame pipeline: pose label plus motion gesture.
///
/// Frames must arrive with strictly increasing timestamps. The pose is
/// reported for every accepted frame. A frame without hand rectangles gets no
/// motion gesture and leaves both the timestamp and the motion state as they
/// were, as does a rejected frame.
#[derive(Debug, Clone, Default)]
pub struct FrameProcessor {
    pose: PoseClassifier,
    motion: MotionClassifier,
    last_timestamp: Option<i64>,
}

impl FrameProcessor {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            pose: PoseClassifier::new(config.pose.clone()),
            motion: MotionClassifier::new(config.motion.clone()),
            last_timestamp: None,
        }
    }

    pub fn process(&mut self, frame: &Frame) -> GestureResult<FrameOutcome> {
        if let Some(previous) = self.last_timestamp {
            if frame.timestamp <= previous {
                return Err(GestureError::OutOfOrderFrame {
                    previous,
                    current: frame.timestamp,
                });
            }
        }

        let pose = self.pose.classify(&frame.hands);
        let motion = match self.motion.classify(&frame.rects, &frame.hands) {
            Ok(motion) => {
                self.last_timestamp = Some(frame.timestamp);
                motion
            }
            Err(e) => {
                debug!("[TS:{}] Motion skipped: {}", frame.timestamp, e);
                None
            }
        };

        trace!("[TS:{}] {}", frame.timestamp, frame.debug_summary());
        trace!(
            "[TS:{}] pose={} motion={:?}",
            frame.timestamp,
            pose,
            motion
        );

        Ok(FrameOutcome {
            timestamp: frame.timestamp,
            pose,
            motion,
        })
    }

    /// Forget the previous frame, as if the stream had just started
    pub fn reset(&mut self) {
        self.motion.reset();
        self.last_timestamp = None;
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }

    pub fn motion(&self) -> &MotionClassifier {
        &self.motion
    }
}
