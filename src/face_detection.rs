//! Face and eye detection using a priority cascade of pretrained detectors.
//!
//! Three detector roles are loaded once at startup: frontal face, profile
//! face and eye. Per frame they run in that priority order and the first
//! role that matches wins; results are never merged across roles.

use crate::config::CascadeConfig;
use crate::error::{Error, Result};
use log::debug;
use opencv::core::{Mat, Rect, Size, Vector};
use opencv::imgproc;
use opencv::objdetect::{self, CascadeClassifier};
use opencv::prelude::*;
use std::fmt;
use std::path::Path;

/// The detector role that produced a set of detection boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorKind {
    Front,
    Profile,
    Eye,
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Front => "frontal-face",
            Self::Profile => "profile-face",
            Self::Eye => "eye",
        };
        write!(f, "{name}")
    }
}

/// Detection result for one frame: zero or more boxes from a single role
#[derive(Debug, Clone, Default)]
pub struct FaceDetections {
    /// Bounding boxes, all produced by the same detector role
    pub boxes: Vec<Rect>,
    /// The role that matched, or `None` when nothing was found
    pub source: Option<DetectorKind>,
}

impl FaceDetections {
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Per-frame face detection contract, abstracted so callers can be tested
/// without cascade model files.
pub trait FaceFinder: Send {
    /// Detect faces or eyes in a frame
    fn detect(&mut self, frame: &Mat) -> Result<FaceDetections>;
}

/// Cascade-backed face detection pipeline
pub struct FaceDetectionPipeline {
    frontal: CascadeClassifier,
    profile: CascadeClassifier,
    eye: CascadeClassifier,
    scale_factor: f64,
    min_neighbors: i32,
    min_size_fraction: f32,
}

impl FaceDetectionPipeline {
    /// Load all three detector roles from the configured model files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CascadeLoad`] when any role fails to load; a missing
    /// detector is a fatal configuration error, not a per-frame condition.
    pub fn new(config: &CascadeConfig) -> Result<Self> {
        Ok(Self {
            frontal: load_cascade(&config.frontal_face, "frontal-face")?,
            profile: load_cascade(&config.profile_face, "profile-face")?,
            eye: load_cascade(&config.eye, "eye")?,
            scale_factor: config.scale_factor,
            min_neighbors: config.min_neighbors,
            min_size_fraction: config.min_size_fraction,
        })
    }
}

impl FaceFinder for FaceDetectionPipeline {
    fn detect(&mut self, frame: &Mat) -> Result<FaceDetections> {
        let prepared = prepare(frame)?;

        let side = min_feature_size(frame.rows(), self.min_size_fraction);
        let min_size = if side > 0 {
            Size::new(side, side)
        } else {
            // Let the detector backend apply its own default minimum.
            Size::default()
        };

        let roles = [
            (DetectorKind::Front, &mut self.frontal),
            (DetectorKind::Profile, &mut self.profile),
            (DetectorKind::Eye, &mut self.eye),
        ];
        for (kind, classifier) in roles {
            let mut hits = Vector::<Rect>::new();
            classifier.detect_multi_scale(
                &prepared,
                &mut hits,
                self.scale_factor,
                self.min_neighbors,
                objdetect::CASCADE_SCALE_IMAGE,
                min_size,
                Size::default(),
            )?;
            if !hits.is_empty() {
                debug!("{kind} detector matched {} region(s)", hits.len());
                return Ok(FaceDetections {
                    boxes: hits.to_vec(),
                    source: Some(kind),
                });
            }
        }

        debug!("no detections");
        Ok(FaceDetections::default())
    }
}

/// Convert to grayscale and equalize the histogram to normalize lighting
/// before cascade matching.
fn prepare(frame: &Mat) -> Result<Mat> {
    let mut gray = Mat::default();
    imgproc::cvt_color(frame, &mut gray, imgproc::COLOR_BGR2GRAY, 0)?;
    let mut equalized = Mat::default();
    imgproc::equalize_hist(&gray, &mut equalized)?;
    Ok(equalized)
}

/// Minimum detectable feature side length: the configured fraction of the
/// frame height, rounded to the nearest integer.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub(crate) fn min_feature_size(frame_height: i32, fraction: f32) -> i32 {
    (frame_height as f32 * fraction).round() as i32
}

fn load_cascade(path: &Path, role: &str) -> Result<CascadeClassifier> {
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::Config(format!("{role} cascade path is not valid UTF-8")))?;
    let classifier = CascadeClassifier::new(path_str)?;
    if classifier.empty()? {
        return Err(Error::CascadeLoad(format!(
            "{role} cascade failed to load from {}",
            path.display()
        )));
    }
    Ok(classifier)
}
