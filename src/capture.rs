//! Capture source contract and the camera-backed implementation.

use crate::error::{Error, Result};
use log::info;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE};

/// The contract the scheduler depends on for frame acquisition.
///
/// Implementations are driven from a single thread at a time; the scheduler
/// serializes open, read and release through its own state machine.
pub trait CaptureSource: Send {
    /// Open the source; returns false when the device cannot be opened
    fn open(&mut self) -> Result<bool>;

    /// Whether the source is currently open
    fn is_open(&self) -> Result<bool>;

    /// Acquire the next frame
    fn read(&mut self) -> Result<Mat>;

    /// Release the source; subsequent reads fail until reopened
    fn release(&mut self) -> Result<()>;
}

/// Webcam capture over `OpenCV`'s `VideoCapture`
pub struct CameraCapture {
    device: i32,
    inner: VideoCapture,
}

impl CameraCapture {
    /// Create an unopened capture for the given device index
    pub fn new(device: i32) -> Result<Self> {
        Ok(Self {
            device,
            inner: VideoCapture::default()?,
        })
    }
}

impl CaptureSource for CameraCapture {
    fn open(&mut self) -> Result<bool> {
        info!("Opening camera {}", self.device);
        if !self.inner.open(self.device, videoio::CAP_ANY)? {
            return Ok(false);
        }
        // Keep the driver buffer shallow so reads return recent frames.
        self.inner.set(CAP_PROP_BUFFERSIZE, 1.0)?;
        Ok(true)
    }

    fn is_open(&self) -> Result<bool> {
        Ok(self.inner.is_opened()?)
    }

    fn read(&mut self) -> Result<Mat> {
        let mut frame = Mat::default();
        if !self.inner.read(&mut frame)? || frame.empty() {
            return Err(Error::FrameRead(format!(
                "camera {} returned no frame",
                self.device
            )));
        }
        Ok(frame)
    }

    fn release(&mut self) -> Result<()> {
        info!("Releasing camera {}", self.device);
        self.inner.release()?;
        Ok(())
    }
}
