//! Live annotator library for real-time camera stream annotation.
//!
//! This library captures frames from a camera at a fixed cadence and
//! annotates each one according to the selected mode:
//! - color segmentation: objects within a configurable HSV range are
//!   outlined, their centroids marked and their geometric shape labeled
//! - face detection: a priority cascade of pretrained detectors
//!   (frontal face, profile face, eye) draws a box per match
//!
//! The processing pipeline runs on a dedicated scheduler thread; annotated
//! frames are posted to the display context over a non-blocking channel so
//! neither side ever stalls the other.
//!
//! # Examples
//!
//! ## Segmenting and classifying shapes in a single image
//!
//! ```no_run
//! use live_annotator::color_range::ColorRange;
//! use live_annotator::{segmentation, shape};
//! use opencv::imgcodecs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = imgcodecs::imread("test.jpg", imgcodecs::IMREAD_COLOR)?;
//!
//! let contours = segmentation::segment(&image, &ColorRange::green(), 500.0)?;
//! for contour in contours.iter() {
//!     // Degenerate contours are skipped rather than classified.
//!     if let Some(found) = shape::classify(&contour)? {
//!         println!(
//!             "{} at ({:.1}, {:.1})",
//!             found.label, found.centroid.x, found.centroid.y
//!         );
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the scheduler against a camera
//!
//! ```no_run
//! use live_annotator::capture::CameraCapture;
//! use live_annotator::config::Config;
//! use live_annotator::face_detection::FaceDetectionPipeline;
//! use live_annotator::mode::{Selection, SharedMode};
//! use live_annotator::scheduler::{ChannelSink, FrameScheduler};
//! use opencv::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let faces = FaceDetectionPipeline::new(&config.cascades)?;
//! let capture = CameraCapture::new(config.camera.device)?;
//! let shared_mode = SharedMode::new();
//! let (sink, frame_rx) = ChannelSink::new(config.display.frame_queue_depth);
//!
//! let mut scheduler = FrameScheduler::new(
//!     Box::new(capture),
//!     Box::new(faces),
//!     Arc::new(sink),
//!     shared_mode.clone(),
//!     config.segmentation.min_contour_area,
//!     config.tick_interval(),
//! );
//!
//! scheduler.start()?;
//! shared_mode.select(Selection::Green);
//! let annotated = frame_rx.recv()?;
//! println!("got a {}x{} frame", annotated.cols(), annotated.rows());
//! scheduler.stop()?;
//! # Ok(())
//! # }
//! ```

/// Color segmentation pipeline turning a frame into size-filtered contours
pub mod segmentation;

/// Shape classification from contour geometry
pub mod shape;

/// Priority cascade face and eye detection
pub mod face_detection;

/// Rendering of analysis results onto frame copies
pub mod annotation;

/// Fixed-cadence frame scheduler and display sink
pub mod scheduler;

/// Capture source contract and camera implementation
pub mod capture;

/// Shared processing mode state
pub mod mode;

/// Inclusive HSV color ranges
pub mod color_range;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
