//! Configuration management for the live annotator application

use crate::constants::{
    CASCADE_MIN_NEIGHBORS, CASCADE_SCALE_FACTOR, FRAME_QUEUE_DEPTH, MIN_CONTOUR_AREA,
    MIN_FEATURE_FRACTION, TICK_INTERVAL_MS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Capture source configuration
    pub camera: CameraConfig,

    /// Cascade detector configuration
    pub cascades: CascadeConfig,

    /// Color segmentation configuration
    pub segmentation: SegmentationConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Capture source parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera device index
    pub device: i32,

    /// Interval between scheduler ticks in milliseconds
    pub tick_ms: u64,
}

/// Cascade detector model paths and matching parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CascadeConfig {
    /// Path to the frontal-face cascade model
    pub frontal_face: PathBuf,

    /// Path to the profile-face cascade model
    pub profile_face: PathBuf,

    /// Path to the eye cascade model
    pub eye: PathBuf,

    /// Image pyramid scale factor (must exceed 1.0)
    pub scale_factor: f64,

    /// Minimum neighbor count for a match to survive
    pub min_neighbors: i32,

    /// Minimum detectable feature size as a fraction of frame height
    pub min_size_fraction: f32,
}

/// Color segmentation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationConfig {
    /// Contours with enclosed area at or below this value are discarded
    pub min_contour_area: f64,
}

/// Display parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Title of the display window
    pub window_name: String,

    /// Capacity of the scheduler-to-display frame channel
    pub frame_queue_depth: usize,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            tick_ms: TICK_INTERVAL_MS,
        }
    }
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            frontal_face: PathBuf::from("assets/haarcascade_frontalface_alt.xml"),
            profile_face: PathBuf::from("assets/haarcascade_profileface.xml"),
            eye: PathBuf::from("assets/haarcascade_eye.xml"),
            scale_factor: CASCADE_SCALE_FACTOR,
            min_neighbors: CASCADE_MIN_NEIGHBORS,
            min_size_fraction: MIN_FEATURE_FRACTION,
        }
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_contour_area: MIN_CONTOUR_AREA,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_name: "Live Annotator".to_string(),
            frame_queue_depth: FRAME_QUEUE_DEPTH,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Interval between scheduler ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.camera.tick_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.camera.tick_ms == 0 {
            return Err(Error::Config("Tick interval must be greater than 0".to_string()));
        }
        if self.cascades.scale_factor <= 1.0 {
            return Err(Error::Config(
                "Cascade scale factor must be greater than 1.0".to_string(),
            ));
        }
        if self.cascades.min_neighbors < 0 {
            return Err(Error::Config(
                "Cascade minimum neighbor count must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.cascades.min_size_fraction) {
            return Err(Error::Config(
                "Minimum feature fraction must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.segmentation.min_contour_area < 0.0 {
            return Err(Error::Config(
                "Minimum contour area must not be negative".to_string(),
            ));
        }
        if self.display.frame_queue_depth == 0 {
            return Err(Error::Config(
                "Frame queue depth must be greater than 0".to_string(),
            ));
        }

        for (role, path) in [
            ("frontal-face", &self.cascades.frontal_face),
            ("profile-face", &self.cascades.profile_face),
            ("eye", &self.cascades.eye),
        ] {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "{role} cascade model not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Live Annotator Configuration

# Capture source
camera:
  device: 0
  tick_ms: 33

# Cascade detector models and parameters
cascades:
  frontal_face: "assets/haarcascade_frontalface_alt.xml"
  profile_face: "assets/haarcascade_profileface.xml"
  eye: "assets/haarcascade_eye.xml"
  scale_factor: 1.2
  min_neighbors: 2
  min_size_fraction: 0.2

# Color segmentation
segmentation:
  min_contour_area: 500.0

# Display
display:
  window_name: "Live Annotator"
  frame_queue_depth: 2
"#;
