pub mod config;
pub mod geometry;

// Classifiers
pub mod pose_classifier;
pub mod motion_classifier;

// Frame pipeline
pub mod frame_processor;
pub mod gesture_recognizer;
