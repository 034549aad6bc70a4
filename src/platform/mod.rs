// Upstream integration: where hand tracking frames come from

pub mod frame_source;

pub use frame_source::{FrameSource, JsonLinesSource, ReplaySource};
