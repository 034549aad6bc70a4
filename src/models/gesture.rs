// Data models for classification output: pose labels, motion gestures, events, errors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// Pose Label (static hand shape)
// ==============================================================================

/// Static hand-shape classification for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseLabel {
    Five,
    Four,
    Three,
    Two,
    One,
    Yeah,
    Rock,
    SpiderMan,
    Fist,
    Ok,
    Unknown,
    NoHand,
}

impl PoseLabel {
    /// Display text shown to the user
    pub fn as_str(&self) -> &'static str {
        match self {
            PoseLabel::Five => "FIVE",
            PoseLabel::Four => "FOUR",
            PoseLabel::Three => "TREE",
            PoseLabel::Two => "TWO",
            PoseLabel::One => "ONE",
            PoseLabel::Yeah => "YEAH",
            PoseLabel::Rock => "ROCK",
            PoseLabel::SpiderMan => "Spider-Man",
            PoseLabel::Fist => "fist",
            PoseLabel::Ok => "OK",
            PoseLabel::Unknown => "___",
            PoseLabel::NoHand => "No hand deal",
        }
    }
}

impl fmt::Display for PoseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open/closed flag for each finger of one hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    pub fn new(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn as_tuple(&self) -> (bool, bool, bool, bool, bool) {
        (self.thumb, self.index, self.middle, self.ring, self.pinky)
    }
}

// ==============================================================================
// Motion Gesture (between consecutive frames)
// ==============================================================================

/// Motion classification derived from consecutive frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionGesture {
    ScrollRight,
    ScrollUp,
    ScrollLeft,
    ScrollDown,
    ZoomIn,
    ZoomOut,
    SlideLeft,
    SlideRight,
}

impl MotionGesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionGesture::ScrollRight => "Scrolling right",
            MotionGesture::ScrollUp => "Scrolling up",
            MotionGesture::ScrollLeft => "Scrolling left",
            MotionGesture::ScrollDown => "Scrolling down",
            MotionGesture::ZoomIn => "Zoom in",
            MotionGesture::ZoomOut => "Zoom out",
            MotionGesture::SlideLeft => "Slide left",
            MotionGesture::SlideRight => "Slide right",
        }
    }

    /// Label text for an optional gesture; no gesture is the empty string
    pub fn label(gesture: Option<MotionGesture>) -> &'static str {
        gesture.map(|g| g.as_str()).unwrap_or("")
    }
}

impl fmt::Display for MotionGesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==============================================================================
// Frame Outcome / Gesture Event
// ==============================================================================

/// Result of running both classifiers on one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub timestamp: i64,
    pub pose: PoseLabel,
    pub motion: Option<MotionGesture>,
}

/// Classification event published by the recognizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureEvent {
    pub id: Uuid,
    pub timestamp: i64,
    pub pose: PoseLabel,
    pub motion: Option<MotionGesture>,
    pub processed_at: DateTime<Utc>,
}

impl From<FrameOutcome> for GestureEvent {
    fn from(outcome: FrameOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: outcome.timestamp,
            pose: outcome.pose,
            motion: outcome.motion,
            processed_at: Utc::now(),
        }
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    #[error("Malformed hand landmarks: expected {expected} points, found {found}")]
    MalformedLandmarks { expected: usize, found: usize },

    #[error("Motion classification requires at least one hand rectangle")]
    EmptyRectInput,

    #[error("Frame timestamp {current} is not after previous frame {previous}")]
    OutOfOrderFrame { previous: i64, current: i64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Gesture recognizer already running")]
    AlreadyRunning,

    #[error("Gesture recognizer not running")]
    NotRunning,

    #[error("Gesture recognizer channel closed")]
    ChannelClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GestureResult<T> = Result<T, GestureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_label_text() {
        assert_eq!(PoseLabel::Three.as_str(), "TREE");
        assert_eq!(PoseLabel::SpiderMan.to_string(), "Spider-Man");
        assert_eq!(PoseLabel::Unknown.as_str(), "___");
    }

    #[test]
    fn test_motion_label_text() {
        assert_eq!(MotionGesture::label(None), "");
        assert_eq!(MotionGesture::label(Some(MotionGesture::ZoomOut)), "Zoom out");
        assert_eq!(MotionGesture::ScrollDown.to_string(), "Scrolling down");
    }

    #[test]
    fn test_event_from_outcome() {
        let outcome = FrameOutcome {
            timestamp: 7,
            pose: PoseLabel::Fist,
            motion: Some(MotionGesture::SlideLeft),
        };
        let event = GestureEvent::from(outcome);
        assert_eq!(event.timestamp, 7);
        assert_eq!(event.pose, PoseLabel::Fist);
        assert_eq!(event.motion, Some(MotionGesture::SlideLeft));

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"slide_left\""));
        assert!(json.contains("\"fist\""));
    }
}
