/// Replays a synthetic hand track through the async gesture recognizer
/// Run with: cargo run --example replay
///
/// Pass `--emit` to print the frames as JSON lines instead, suitable as
/// input for the `handsign` binary.

use handsign_lib::{
    Frame, GestureConfig, GestureRecognizer, HandLandmarks, HandRect, Landmark, MotionGesture,
};

/// Open palm with the wrist -> middle MCP axis at `axis_degrees` (screen-up = 90)
fn open_hand(center_x: f32, center_y: f32, axis_degrees: f32) -> HandLandmarks {
    let wrist = (center_x, center_y + 0.15);
    let axis = axis_degrees.to_radians();
    let (dx, dy) = (axis.cos(), -axis.sin());

    let mut points = [Landmark::default(); 21];
    points[0] = Landmark::new(wrist.0, wrist.1, 0.0);

    // Thumb fans out to the left of the palm
    points[1] = Landmark::new(wrist.0 - 0.05, wrist.1 - 0.04, 0.0);
    points[2] = Landmark::new(wrist.0 - 0.08, wrist.1 - 0.08, 0.0);
    points[3] = Landmark::new(wrist.0 - 0.11, wrist.1 - 0.10, 0.0);
    points[4] = Landmark::new(wrist.0 - 0.14, wrist.1 - 0.12, 0.0);

    // Index, middle, ring, pinky: MCP then three joints further along the axis
    for (finger, spread) in [-0.04f32, 0.0, 0.03, 0.06].iter().enumerate() {
        let base = 5 + finger * 4;
        for joint in 0..4 {
            let reach = 0.12 + joint as f32 * 0.05;
            points[base + joint] = Landmark::new(
                wrist.0 + dx * reach + spread,
                wrist.1 + dy * reach,
                0.0,
            );
        }
    }

    HandLandmarks::new(points)
}

fn track() -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut timestamp = 0;
    let mut push = |x: f32, y: f32, height: f32, axis: f32| {
        timestamp += 33_333;
        frames.push(Frame::new(
            timestamp,
            vec![open_hand(x, y, axis)],
            vec![HandRect::new(x, y, height, height * 0.8)],
        ));
    };

    // Hold still, then move right
    push(0.5, 0.5, 0.3, 90.0);
    push(0.5, 0.5, 0.3, 90.0);
    push(0.6, 0.5, 0.3, 90.0);
    // Come back and hold, then pull the hand away from the camera
    push(0.5, 0.5, 0.3, 90.0);
    push(0.5, 0.5, 0.3, 90.0);
    push(0.5, 0.5, 0.2, 90.0);
    // Hold, then tilt the hand to the left
    push(0.5, 0.5, 0.3, 90.0);
    push(0.5, 0.5, 0.3, 90.0);
    push(0.5, 0.5, 0.3, 90.0);
    push(0.5, 0.5, 0.3, 90.0);
    push(0.5, 0.5, 0.3, 115.0);

    frames
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let frames = track();

    if std::env::args().any(|arg| arg == "--emit") {
        for frame in &frames {
            println!("{}", serde_json::to_string(frame)?);
        }
        return Ok(());
    }

    println!("=== Gesture Replay ===\n");

    let recognizer = GestureRecognizer::new(GestureConfig::default())?;
    let mut events = recognizer.start().await?;

    for frame in frames {
        recognizer.submit(frame).await?;
    }
    recognizer.stop().await?;

    while let Some(event) = events.recv().await {
        println!(
            "  [{:>7}] pose: {:<12} motion: {}",
            event.timestamp,
            event.pose.as_str(),
            MotionGesture::label(event.motion)
        );
    }

    let stats = recognizer.stats().await;
    println!();
    println!("Frames processed: {}", stats.frames_processed);
    println!("Frames rejected:  {}", stats.frames_rejected);
    println!("Motion gestures:  {}", stats.motion_events);

    Ok(())
}
