//! Main application module wiring the pipelines, scheduler and display.

use crate::capture::CameraCapture;
use crate::config::Config;
use crate::error::Result;
use crate::face_detection::FaceDetectionPipeline;
use crate::mode::{Selection, SharedMode};
use crate::scheduler::{ChannelSink, FrameScheduler};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{info, warn};
use opencv::core::Mat;
use opencv::highgui::{self, WINDOW_NORMAL};
use std::sync::Arc;
use std::time::Duration;

/// The live annotator application.
///
/// Owns the scheduler and the display loop. The display loop runs on the
/// calling thread and doubles as the mode-selection surface: annotated
/// frames are drained from the sink channel and shown, key presses switch
/// the shared mode consumed by the scheduler thread.
pub struct AnnotatorApp {
    scheduler: FrameScheduler,
    shared_mode: SharedMode,
    frame_rx: Receiver<Mat>,
    window_name: String,
    tick_interval: Duration,
}

impl AnnotatorApp {
    /// Build the application from configuration.
    ///
    /// Loads all cascade detector roles up front; a model that fails to load
    /// aborts startup.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let faces = FaceDetectionPipeline::new(&config.cascades)?;
        let capture = CameraCapture::new(config.camera.device)?;
        let shared_mode = SharedMode::new();
        let (sink, frame_rx) = ChannelSink::new(config.display.frame_queue_depth);

        let scheduler = FrameScheduler::new(
            Box::new(capture),
            Box::new(faces),
            Arc::new(sink),
            shared_mode.clone(),
            config.segmentation.min_contour_area,
            config.tick_interval(),
        );

        highgui::named_window(&config.display.window_name, WINDOW_NORMAL)?;

        Ok(Self {
            scheduler,
            shared_mode,
            frame_rx,
            window_name: config.display.window_name.clone(),
            tick_interval: config.tick_interval(),
        })
    }

    /// Run the display loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        self.scheduler.start()?;
        info!("Keys: [g]reen, [o]range, [f]ace, [i]nactive, space start/stop, q/ESC quit");

        loop {
            match self.frame_rx.recv_timeout(self.tick_interval) {
                Ok(frame) => highgui::imshow(&self.window_name, &frame)?,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let key = highgui::wait_key(1)?;
            match key {
                k if k == i32::from(b'g') => {
                    info!("Mode: color segmentation (green)");
                    self.shared_mode.select(Selection::Green);
                }
                k if k == i32::from(b'o') => {
                    info!("Mode: color segmentation (orange)");
                    self.shared_mode.select(Selection::Orange);
                }
                k if k == i32::from(b'f') => {
                    info!("Mode: face detection");
                    self.shared_mode.select(Selection::Face);
                }
                k if k == i32::from(b'i') => {
                    info!("Mode: inactive");
                    self.shared_mode.select(Selection::Inactive);
                }
                k if k == i32::from(b' ') => self.toggle_capture()?,
                k if k == 27 || k == i32::from(b'q') => {
                    info!("Exit requested by user");
                    break;
                }
                _ => {}
            }
        }

        self.scheduler.stop()
    }

    /// Stop the capture if running, otherwise try to start it again.
    fn toggle_capture(&mut self) -> Result<()> {
        if self.scheduler.is_running() {
            self.scheduler.stop()
        } else {
            // A failed open is recoverable; the user may toggle again.
            if let Err(e) = self.scheduler.start() {
                warn!("could not start capture: {e}");
            }
            Ok(())
        }
    }
}
