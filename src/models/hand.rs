// Data models for hand tracking input: landmarks, hand rectangles, frames

use serde::{Deserialize, Serialize};

use crate::models::gesture::GestureError;

/// Number of landmarks MediaPipe Hands produces per detected hand
pub const LANDMARK_COUNT: usize = 21;

// ==============================================================================
// Landmarks (21 keypoints per hand)
// ==============================================================================

/// A normalized hand keypoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // Normalized [0, 1] to image width
    pub y: f32, // Normalized [0, 1] to image height
    #[serde(default)]
    pub z: f32, // Depth relative to the wrist
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Mirror about the vertical line x = 0.5
    pub fn mirrored(&self) -> Self {
        Self {
            x: 1.0 - self.x,
            y: self.y,
            z: self.z,
        }
    }
}

/// MediaPipe Hand Landmark indices (21 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandLandmark {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The 21 landmarks of one detected hand.
///
/// Always holds exactly [`LANDMARK_COUNT`] points. Building one from a list of
/// any other length fails with [`GestureError::MalformedLandmarks`], which is
/// also what deserialization reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    pub fn get(&self, landmark: HandLandmark) -> Landmark {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Mirror every landmark about x = 0.5
    pub fn mirrored(&self) -> Self {
        Self {
            points: self.points.map(|p| p.mirrored()),
        }
    }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = GestureError;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        let found = points.len();
        let points: [Landmark; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| GestureError::MalformedLandmarks {
                    expected: LANDMARK_COUNT,
                    found,
                })?;
        Ok(Self { points })
    }
}

impl From<HandLandmarks> for Vec<Landmark> {
    fn from(hand: HandLandmarks) -> Self {
        hand.points.to_vec()
    }
}

// ==============================================================================
// Hand Rectangle
// ==============================================================================

/// Rotated bounding rectangle of a detected hand, normalized to the image
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandRect {
    #[serde(alias = "xCenter")]
    pub x_center: f32,
    #[serde(alias = "yCenter")]
    pub y_center: f32,
    pub height: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub rotation: f32, // Radians
}

impl HandRect {
    pub fn new(x_center: f32, y_center: f32, height: f32, width: f32) -> Self {
        Self {
            x_center,
            y_center,
            height,
            width,
            rotation: 0.0,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x_center, self.y_center)
    }
}

// ==============================================================================
// Frame (unit of processing)
// ==============================================================================

/// One frame of hand tracking output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp: i64,
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
    #[serde(default)]
    pub rects: Vec<HandRect>,
}

impl Frame {
    pub fn new(timestamp: i64, hands: Vec<HandLandmarks>, rects: Vec<HandRect>) -> Self {
        Self {
            timestamp,
            hands,
            rects,
        }
    }

    /// Multi-line listing of every landmark, for trace logging
    pub fn debug_summary(&self) -> String {
        if self.hands.is_empty() {
            return "No hand landmarks".to_string();
        }

        let mut out = format!("Number of hands detected: {}\n", self.hands.len());
        for (hand_index, hand) in self.hands.iter().enumerate() {
            out.push_str(&format!(
                "\t#Hand landmarks for hand[{}]: {}\n",
                hand_index, LANDMARK_COUNT
            ));
            for (i, lm) in hand.points().iter().enumerate() {
                out.push_str(&format!("\t\tLandmark [{}]: ({}, {}, {})\n", i, lm.x, lm.y, lm.z));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand() -> Vec<Landmark> {
        (0..LANDMARK_COUNT)
            .map(|i| Landmark::new(i as f32 / 100.0, 0.5, 0.0))
            .collect()
    }

    #[test]
    fn test_hand_landmarks_requires_21_points() {
        let hand = HandLandmarks::try_from(flat_hand()).unwrap();
        assert_eq!(hand.get(HandLandmark::PinkyTip).x, 0.2);

        let mut short = flat_hand();
        short.truncate(20);
        match HandLandmarks::try_from(short) {
            Err(GestureError::MalformedLandmarks { expected, found }) => {
                assert_eq!(expected, 21);
                assert_eq!(found, 20);
            }
            other => panic!("expected MalformedLandmarks, got {:?}", other),
        }
    }

    #[test]
    fn test_frame_deserialization() {
        let points: Vec<String> = (0..LANDMARK_COUNT)
            .map(|_| r#"{"x":0.5,"y":0.5}"#.to_string())
            .collect();
        let json = format!(
            r#"{{"timestamp": 42, "hands": [[{}]], "rects": [{{"xCenter": 0.4, "yCenter": 0.6, "height": 0.3}}]}}"#,
            points.join(",")
        );

        let frame: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame.timestamp, 42);
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.rects[0].center(), (0.4, 0.6));
        assert_eq!(frame.rects[0].rotation, 0.0);
    }

    #[test]
    fn test_frame_rejects_short_hand() {
        let json = r#"{"timestamp": 1, "hands": [[{"x":0.1,"y":0.2,"z":0.0}]], "rects": []}"#;
        let err = serde_json::from_str::<Frame>(json).unwrap_err();
        assert!(err.to_string().contains("expected 21"));
    }

    #[test]
    fn test_hand_rect_new_takes_height_before_width() {
        let rect = HandRect::new(0.4, 0.6, 0.3, 0.2);
        assert_eq!(rect.center(), (0.4, 0.6));
        assert_eq!(rect.height, 0.3);
        assert_eq!(rect.width, 0.2);
        assert_eq!(rect.rotation, 0.0);
    }

    #[test]
    fn test_mirrored_landmark() {
        let lm = Landmark::new(0.2, 0.7, 0.1).mirrored();
        assert!((lm.x - 0.8).abs() < 1e-6);
        assert_eq!(lm.y, 0.7);
    }

    #[test]
    fn test_debug_summary() {
        let frame = Frame::new(0, vec![], vec![]);
        assert_eq!(frame.debug_summary(), "No hand landmarks");

        let hand = HandLandmarks::try_from(flat_hand()).unwrap();
        let frame = Frame::new(0, vec![hand], vec![]);
        let summary = frame.debug_summary();
        assert!(summary.starts_with("Number of hands detected: 1"));
        assert!(summary.contains("Landmark [20]"));
    }
}
