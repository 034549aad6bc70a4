// Static hand pose classification - maps finger-open flags to a pose label

use tracing::debug;

use crate::core::config::PoseThresholds;
use crate::core::geometry::{euclidean_distance, point};
use crate::models::gesture::{FingerState, PoseLabel};
use crate::models::hand::{HandLandmark, HandLandmarks, Landmark};

/// (PIP, DIP, TIP) for index, middle, ring, and pinky
const FINGER_JOINTS: [(HandLandmark, HandLandmark, HandLandmark); 4] = [
    (
        HandLandmark::IndexFingerPip,
        HandLandmark::IndexFingerDip,
        HandLandmark::IndexFingerTip,
    ),
    (
        HandLandmark::MiddleFingerPip,
        HandLandmark::MiddleFingerDip,
        HandLandmark::MiddleFingerTip,
    ),
    (
        HandLandmark::RingFingerPip,
        HandLandmark::RingFingerDip,
        HandLandmark::RingFingerTip,
    ),
    (
        HandLandmark::PinkyPip,
        HandLandmark::PinkyDip,
        HandLandmark::PinkyTip,
    ),
];

/// Thumb is open when both IP and tip lie past the thumb MCP, on the side away
/// from the middle finger MCP.
pub fn thumb_is_open(hand: &HandLandmarks) -> bool {
    let pivot_x = hand.get(HandLandmark::ThumbMcp).x;
    let middle_mcp_x = hand.get(HandLandmark::MiddleFingerMcp).x;
    let ip_x = hand.get(HandLandmark::ThumbIp).x;
    let tip_x = hand.get(HandLandmark::ThumbTip).x;

    if pivot_x < middle_mcp_x {
        ip_x < pivot_x && tip_x < pivot_x
    } else if pivot_x > middle_mcp_x {
        ip_x > pivot_x && tip_x > pivot_x
    } else {
        false
    }
}

/// A finger is open when each joint sits strictly above (smaller y) the one below it
pub fn finger_is_open(hand: &HandLandmarks, pip: HandLandmark, dip: HandLandmark, tip: HandLandmark) -> bool {
    let pip_y = hand.get(pip).y;
    let dip_y = hand.get(dip).y;
    let tip_y = hand.get(tip).y;

    dip_y < pip_y && tip_y < dip_y
}

pub fn finger_state(hand: &HandLandmarks) -> FingerState {
    let [index, middle, ring, pinky] =
        FINGER_JOINTS.map(|(pip, dip, tip)| finger_is_open(hand, pip, dip, tip));

    FingerState {
        thumb: thumb_is_open(hand),
        index,
        middle,
        ring,
        pinky,
    }
}

fn is_touching(a: Landmark, b: Landmark, max_distance: f64) -> bool {
    euclidean_distance(point(a.x, a.y), point(b.x, b.y)) < max_distance
}

/// Stateless classifier from hand landmarks to a [`PoseLabel`]
#[derive(Debug, Clone, Default)]
pub struct PoseClassifier {
    thresholds: PoseThresholds,
}

impl PoseClassifier {
    pub fn new(thresholds: PoseThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify the primary (first) hand of a frame.
    ///
    /// Additional hands never influence the result. An empty list yields
    /// [`PoseLabel::NoHand`].
    pub fn classify(&self, hands: &[HandLandmarks]) -> PoseLabel {
        match hands.first() {
            Some(hand) => self.classify_hand(hand),
            None => PoseLabel::NoHand,
        }
    }

    /// One label per hand, in input order
    pub fn classify_each(&self, hands: &[HandLandmarks]) -> Vec<PoseLabel> {
        hands.iter().map(|hand| self.classify_hand(hand)).collect()
    }

    pub fn classify_hand(&self, hand: &HandLandmarks) -> PoseLabel {
        let fingers = finger_state(hand);

        // First match wins; the order is part of the contract.
        match fingers.as_tuple() {
            (true, true, true, true, true) => PoseLabel::Five,
            (false, true, true, true, true) => PoseLabel::Four,
            (true, true, true, false, false) => PoseLabel::Three,
            (true, true, false, false, false) => PoseLabel::Two,
            (false, true, false, false, false) => PoseLabel::One,
            (false, true, true, false, false) => PoseLabel::Yeah,
            (false, true, false, false, true) => PoseLabel::Rock,
            (true, true, false, false, true) => PoseLabel::SpiderMan,
            (false, false, false, false, false) => PoseLabel::Fist,
            (_, false, true, true, true)
                if is_touching(
                    hand.get(HandLandmark::ThumbTip),
                    hand.get(HandLandmark::IndexFingerTip),
                    self.thresholds.ok_touch_distance,
                ) =>
            {
                PoseLabel::Ok
            }
            _ => {
                debug!(
                    "Unrecognized pose: thumb={} index={} middle={} ring={} pinky={}",
                    fingers.thumb, fingers.index, fingers.middle, fingers.ring, fingers.pinky
                );
                PoseLabel::Unknown
            }
        }
    }
}

/// Classify the primary hand with default thresholds
pub fn classify_pose(hands: &[HandLandmarks]) -> PoseLabel {
    PoseClassifier::default().classify(hands)
}

#[cfg(test)]
pub(crate) mod test_hands {
    use super::*;
    use crate::models::hand::LANDMARK_COUNT;

    /// Builder for synthetic right-hand-in-view landmarks.
    ///
    /// The wrist sits at the bottom; the thumb is on the left of the palm, so
    /// an open thumb extends further left than its MCP.
    pub struct HandBuilder {
        points: [Landmark; LANDMARK_COUNT],
    }

    impl HandBuilder {
        pub fn new() -> Self {
            let mut points = [Landmark::default(); LANDMARK_COUNT];
            points[0] = Landmark::new(0.50, 0.80, 0.0);
            // Thumb: CMC, MCP, then IP and tip tucked right of the MCP (closed)
            points[1] = Landmark::new(0.44, 0.74, 0.0);
            points[2] = Landmark::new(0.40, 0.68, 0.0);
            points[3] = Landmark::new(0.43, 0.63, 0.0);
            points[4] = Landmark::new(0.46, 0.60, 0.0);

            let mut builder = Self { points };
            for (finger, x) in [0.42f32, 0.48, 0.54, 0.60].iter().enumerate() {
                let mcp = 5 + finger * 4;
                builder.points[mcp] = Landmark::new(*x, 0.60, 0.0);
                builder = builder.finger(finger, false);
            }
            builder
        }

        /// finger: 0 = index .. 3 = pinky
        pub fn finger(mut self, finger: usize, open: bool) -> Self {
            let mcp = 5 + finger * 4;
            let x = self.points[mcp].x;
            let ys = if open {
                [0.50, 0.42, 0.35]
            } else {
                // curled: DIP and tip fold back below the PIP
                [0.52, 0.56, 0.58]
            };
            for (offset, y) in ys.iter().enumerate() {
                self.points[mcp + 1 + offset] = Landmark::new(x, *y, 0.0);
            }
            self
        }

        pub fn thumb(mut self, open: bool) -> Self {
            if open {
                self.points[3] = Landmark::new(0.35, 0.64, 0.0);
                self.points[4] = Landmark::new(0.30, 0.61, 0.0);
            } else {
                self.points[3] = Landmark::new(0.43, 0.63, 0.0);
                self.points[4] = Landmark::new(0.46, 0.60, 0.0);
            }
            self
        }

        pub fn set(mut self, landmark: HandLandmark, x: f32, y: f32) -> Self {
            self.points[landmark.index()] = Landmark::new(x, y, 0.0);
            self
        }

        pub fn fingers(self, thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> Self {
            self.thumb(thumb)
                .finger(0, index)
                .finger(1, middle)
                .finger(2, ring)
                .finger(3, pinky)
        }

        pub fn build(self) -> HandLandmarks {
            HandLandmarks::new(self.points)
        }
    }

    pub fn hand(thumb: bool, index: bool, middle: bool, ring: bool, pinky: bool) -> HandLandmarks {
        HandBuilder::new()
            .fingers(thumb, index, middle, ring, pinky)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::test_hands::{hand, HandBuilder};
    use super::*;

    #[test]
    fn test_finger_state_detection() {
        let h = hand(true, false, true, false, true);
        assert_eq!(finger_state(&h), FingerState::new(true, false, true, false, true));
    }

    #[test]
    fn test_five_and_fist() {
        assert_eq!(classify_pose(&[hand(true, true, true, true, true)]), PoseLabel::Five);
        assert_eq!(classify_pose(&[hand(false, false, false, false, false)]), PoseLabel::Fist);
    }

    #[test]
    fn test_decision_table() {
        let cases = [
            ((false, true, true, true, true), PoseLabel::Four),
            ((true, true, true, false, false), PoseLabel::Three),
            ((true, true, false, false, false), PoseLabel::Two),
            ((false, true, false, false, false), PoseLabel::One),
            ((false, true, true, false, false), PoseLabel::Yeah),
            ((false, true, false, false, true), PoseLabel::Rock),
            ((true, true, false, false, true), PoseLabel::SpiderMan),
            ((true, false, false, false, false), PoseLabel::Unknown),
            ((false, false, true, false, false), PoseLabel::Unknown),
        ];

        for ((t, i, m, r, p), expected) in cases {
            assert_eq!(
                classify_pose(&[hand(t, i, m, r, p)]),
                expected,
                "fingers ({}, {}, {}, {}, {})",
                t, i, m, r, p
            );
        }
    }

    #[test]
    fn test_ok_pose() {
        // Index curled with its tip resting on the thumb tip
        let ok = HandBuilder::new()
            .fingers(false, false, true, true, true)
            .set(HandLandmark::ThumbTip, 0.43, 0.57)
            .build();
        assert_eq!(classify_pose(&[ok]), PoseLabel::Ok);
    }

    #[test]
    fn test_ok_requires_touching_tips() {
        let apart = HandBuilder::new()
            .fingers(false, false, true, true, true)
            .set(HandLandmark::ThumbTip, 0.20, 0.90)
            .build();
        assert_eq!(classify_pose(&[apart]), PoseLabel::Unknown);

        let strict = PoseClassifier::new(PoseThresholds {
            ok_touch_distance: 0.001,
        });
        let ok = HandBuilder::new()
            .fingers(false, false, true, true, true)
            .set(HandLandmark::ThumbTip, 0.43, 0.57)
            .build();
        assert_eq!(strict.classify_hand(&ok), PoseLabel::Unknown);
    }

    #[test]
    fn test_thumb_open_is_mirror_invariant() {
        for open in [true, false] {
            let h = HandBuilder::new().thumb(open).build();
            assert_eq!(thumb_is_open(&h), open);
            assert_eq!(thumb_is_open(&h.mirrored()), open);
        }
    }

    #[test]
    fn test_thumb_closed_when_pivot_aligned_with_middle_mcp() {
        let h = HandBuilder::new()
            .thumb(true)
            .set(HandLandmark::ThumbMcp, 0.48, 0.68)
            .build();
        assert!(!thumb_is_open(&h));
    }

    #[test]
    fn test_only_primary_hand_counts() {
        let hands = [hand(false, false, false, false, false), hand(true, true, true, true, true)];
        assert_eq!(classify_pose(&hands), PoseLabel::Fist);

        let classifier = PoseClassifier::default();
        assert_eq!(
            classifier.classify_each(&hands),
            vec![PoseLabel::Fist, PoseLabel::Five]
        );
    }

    #[test]
    fn test_no_hands() {
        assert_eq!(classify_pose(&[]), PoseLabel::NoHand);
    }
}
