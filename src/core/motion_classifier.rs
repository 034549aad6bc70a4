// Motion gesture detection - identifies scroll, zoom, and slide gestures between frames

use tracing::{debug, trace};

use crate::core::config::{MotionThresholds, StateUpdatePolicy};
use crate::core::geometry::{euclidean_distance, heading_degrees, point};
use crate::models::gesture::{GestureError, GestureResult, MotionGesture};
use crate::models::hand::{HandLandmark, HandLandmarks, HandRect};

/// Measurements remembered from the previous frame.
///
/// `None` means no earlier frame has supplied the value yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalState {
    pub previous_center: Option<(f32, f32)>,
    pub previous_height: Option<f32>,
    /// Hand axis (wrist -> middle MCP) in whole degrees
    pub previous_angle: Option<i32>,
    /// Flipped on every frame that reaches slide detection
    pub slide_frame: bool,
}

impl TemporalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Map a movement heading (degrees, +x = 0, screen-up = 90) to a scroll direction
pub fn scroll_direction(angle: i32) -> MotionGesture {
    match angle {
        -45..=44 => MotionGesture::ScrollRight,
        45..=134 => MotionGesture::ScrollUp,
        -135..=-46 => MotionGesture::ScrollDown,
        _ => MotionGesture::ScrollLeft,
    }
}

/// Angle of the wrist -> middle finger MCP axis
pub fn hand_axis_degrees(hand: &HandLandmarks, reference_offset: f64) -> i32 {
    let wrist = hand.get(HandLandmark::Wrist);
    let mcp = hand.get(HandLandmark::MiddleFingerMcp);
    heading_degrees(point(wrist.x, wrist.y), point(mcp.x, mcp.y), reference_offset)
}

fn detect_scroll(
    rect: &HandRect,
    previous_center: Option<(f32, f32)>,
    thresholds: &MotionThresholds,
) -> Option<MotionGesture> {
    let (prev_x, prev_y) = previous_center?;
    let previous = point(prev_x, prev_y);
    let current = point(rect.x_center, rect.y_center);

    let distance = euclidean_distance(current, previous);
    let threshold = thresholds.scroll_distance_factor * rect.height as f64;
    if distance <= threshold {
        return None;
    }

    let angle = heading_degrees(previous, current, thresholds.reference_offset);
    let gesture = scroll_direction(angle);
    debug!("{} (distance {:.4} > {:.4}, angle {})", gesture, distance, threshold, angle);
    Some(gesture)
}

fn detect_zoom(
    height: f32,
    previous_height: Option<f32>,
    thresholds: &MotionThresholds,
) -> Option<MotionGesture> {
    let previous = previous_height? as f64;
    let height = height as f64;
    let threshold = thresholds.zoom_height_factor * height;

    let gesture = if height < previous - threshold {
        MotionGesture::ZoomOut
    } else if height > previous + threshold {
        MotionGesture::ZoomIn
    } else {
        return None;
    };

    debug!("{} (height {:.4} -> {:.4})", gesture, previous, height);
    Some(gesture)
}

/// Flip the alternate-frame toggle; true when this frame should check slides
fn advance_slide_frame(state: &mut TemporalState, thresholds: &MotionThresholds) -> bool {
    if !thresholds.slide_on_alternate_frames {
        return true;
    }
    state.slide_frame = !state.slide_frame;
    state.slide_frame
}

/// Compare each hand's axis against the stored angle, storing the new angle
/// after every hand that does not trigger.
fn detect_slide(
    hands: &[HandLandmarks],
    state: &mut TemporalState,
    thresholds: &MotionThresholds,
) -> Option<MotionGesture> {
    let band = thresholds.vertical_band_min_deg..=thresholds.vertical_band_max_deg;
    let delta = thresholds.slide_angle_delta_deg;

    for hand in hands {
        let angle = hand_axis_degrees(hand, thresholds.reference_offset);

        if let Some(previous) = state.previous_angle.filter(|p| band.contains(p)) {
            if angle > previous + delta {
                debug!("Slide left (axis {} -> {})", previous, angle);
                return Some(MotionGesture::SlideLeft);
            } else if angle < previous - delta {
                debug!("Slide right (axis {} -> {})", previous, angle);
                return Some(MotionGesture::SlideRight);
            }
        }

        state.previous_angle = Some(angle);
    }

    None
}

fn classify_cascade(
    rect: &HandRect,
    hands: &[HandLandmarks],
    state: &mut TemporalState,
    thresholds: &MotionThresholds,
) -> Option<MotionGesture> {
    if let Some(gesture) = detect_scroll(rect, state.previous_center, thresholds) {
        return Some(gesture);
    }
    state.previous_center = Some(rect.center());

    if let Some(gesture) = detect_zoom(rect.height, state.previous_height, thresholds) {
        return Some(gesture);
    }
    state.previous_height = Some(rect.height);

    if advance_slide_frame(state, thresholds) && !hands.is_empty() {
        return detect_slide(hands, state, thresholds);
    }

    None
}

fn classify_every_frame(
    rect: &HandRect,
    hands: &[HandLandmarks],
    state: &mut TemporalState,
    thresholds: &MotionThresholds,
) -> Option<MotionGesture> {
    let scroll = detect_scroll(rect, state.previous_center, thresholds);
    state.previous_center = Some(rect.center());

    let zoom = detect_zoom(rect.height, state.previous_height, thresholds);
    state.previous_height = Some(rect.height);

    let slide = if advance_slide_frame(state, thresholds) && !hands.is_empty() {
        let slide = detect_slide(hands, state, thresholds);
        if slide.is_some() {
            state.previous_angle = hands
                .last()
                .map(|hand| hand_axis_degrees(hand, thresholds.reference_offset));
        }
        slide
    } else {
        None
    };

    scroll.or(zoom).or(slide)
}

/// Classify motion between the remembered state and this frame, then update the state.
///
/// Only `rects[0]` is used; every hand in `hands` takes part in slide detection.
/// Fails with [`GestureError::EmptyRectInput`] when `rects` is empty, leaving
/// the state untouched.
pub fn classify_motion(
    rects: &[HandRect],
    hands: &[HandLandmarks],
    state: &mut TemporalState,
    thresholds: &MotionThresholds,
) -> GestureResult<Option<MotionGesture>> {
    let rect = rects.first().ok_or(GestureError::EmptyRectInput)?;

    let gesture = match thresholds.update_policy {
        StateUpdatePolicy::Cascade => classify_cascade(rect, hands, state, thresholds),
        StateUpdatePolicy::EveryFrame => classify_every_frame(rect, hands, state, thresholds),
    };

    trace!("Motion state after frame: {:?}", state);
    Ok(gesture)
}

/// Stateful motion classifier for one tracked gesture stream
#[derive(Debug, Clone, Default)]
pub struct MotionClassifier {
    thresholds: MotionThresholds,
    state: TemporalState,
}

impl MotionClassifier {
    pub fn new(thresholds: MotionThresholds) -> Self {
        Self {
            thresholds,
            state: TemporalState::new(),
        }
    }

    pub fn classify(
        &mut self,
        rects: &[HandRect],
        hands: &[HandLandmarks],
    ) -> GestureResult<Option<MotionGesture>> {
        classify_motion(rects, hands, &mut self.state, &self.thresholds)
    }

    /// Forget all previous-frame measurements
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn state(&self) -> &TemporalState {
        &self.state
    }

    pub fn thresholds(&self) -> &MotionThresholds {
        &self.thresholds
    }
}
