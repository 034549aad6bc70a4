use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::gesture::{GestureError, GestureResult};

/// How the motion classifier refreshes its remembered state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StateUpdatePolicy {
    /// Detectors run in order (scroll, zoom, slide) and the first match
    /// returns immediately, leaving later state fields from the previous frame
    #[default]
    Cascade,
    /// Every detector runs and every state field is refreshed each frame;
    /// the first match in cascade order is reported
    EveryFrame,
}

impl StateUpdatePolicy {
    pub fn from_string(s: &str) -> GestureResult<Self> {
        match s {
            "cascade" => Ok(StateUpdatePolicy::Cascade),
            "every-frame" | "every_frame" => Ok(StateUpdatePolicy::EveryFrame),
            other => Err(GestureError::InvalidConfig(format!(
                "Unknown state update policy: {}. Must be one of: cascade, every-frame",
                other
            ))),
        }
    }
}

/// Thresholds for the static pose classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseThresholds {
    /// Maximum thumb-tip to index-tip distance for the "OK" pose
    pub ok_touch_distance: f64,
}

impl Default for PoseThresholds {
    fn default() -> Self {
        Self {
            ok_touch_distance: 0.1,
        }
    }
}

/// Thresholds for the temporal motion classifier.
///
/// Distance and height factors are multiplied by the current rectangle height,
/// so a hand close to the camera needs the same relative movement as a far one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionThresholds {
    /// Center displacement (x height) that counts as a scroll
    pub scroll_distance_factor: f64,
    /// Height change (x height) that counts as a zoom
    pub zoom_height_factor: f64,
    /// Hand-axis rotation in degrees that counts as a slide
    pub slide_angle_delta_deg: i32,
    /// The previous hand axis must lie in this band (degrees) for a slide
    pub vertical_band_min_deg: i32,
    pub vertical_band_max_deg: i32,
    /// Length of the horizontal reference ray used for angle measurement
    pub reference_offset: f64,
    /// Only evaluate slides on every other frame
    pub slide_on_alternate_frames: bool,
    pub update_policy: StateUpdatePolicy,
}

impl Default for MotionThresholds {
    fn default() -> Self {
        Self {
            scroll_distance_factor: 0.02,
            zoom_height_factor: 0.03,
            slide_angle_delta_deg: 12,
            vertical_band_min_deg: 80,
            vertical_band_max_deg: 100,
            reference_offset: 0.1,
            slide_on_alternate_frames: true,
            update_policy: StateUpdatePolicy::Cascade,
        }
    }
}

/// Gesture recognition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub pose: PoseThresholds,
    pub motion: MotionThresholds,
    /// Frames buffered between submitter and recognizer worker
    pub channel_capacity: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pose: PoseThresholds::default(),
            motion: MotionThresholds::default(),
            channel_capacity: 100,
        }
    }
}

impl GestureConfig {
    /// Load configuration from the default location, creating it with defaults if missing
    pub fn load() -> GestureResult<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from a JSON file
    pub fn load_from(path: &Path) -> GestureResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GestureConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> GestureResult<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> GestureResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> GestureResult<()> {
        if !(self.pose.ok_touch_distance > 0.0 && self.pose.ok_touch_distance <= 1.0) {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid OK touch distance: {}. Must be in (0.0, 1.0]",
                self.pose.ok_touch_distance
            )));
        }

        let motion = &self.motion;

        if !(0.0..=1.0).contains(&motion.scroll_distance_factor) {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid scroll distance factor: {}. Must be between 0.0 and 1.0",
                motion.scroll_distance_factor
            )));
        }

        if !(0.0..=1.0).contains(&motion.zoom_height_factor) {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid zoom height factor: {}. Must be between 0.0 and 1.0",
                motion.zoom_height_factor
            )));
        }

        if motion.slide_angle_delta_deg <= 0 || motion.slide_angle_delta_deg >= 180 {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid slide angle delta: {}. Must be between 1 and 179 degrees",
                motion.slide_angle_delta_deg
            )));
        }

        if motion.vertical_band_min_deg > motion.vertical_band_max_deg
            || motion.vertical_band_min_deg < -180
            || motion.vertical_band_max_deg > 180
        {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid vertical band: [{}, {}]. Must be an ordered range within [-180, 180]",
                motion.vertical_band_min_deg, motion.vertical_band_max_deg
            )));
        }

        if motion.reference_offset <= 0.0 {
            return Err(GestureError::InvalidConfig(format!(
                "Invalid reference offset: {}. Must be positive",
                motion.reference_offset
            )));
        }

        if self.channel_capacity == 0 {
            return Err(GestureError::InvalidConfig(
                "Channel capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Reset the stored configuration to defaults
    pub fn reset() -> GestureResult<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn get_config_path() -> GestureResult<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                GestureError::InvalidConfig("Could not determine home directory".to_string())
            })?;

        let mut path = PathBuf::from(home);
        path.push(".handsign");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}
