//! Fixed-cadence frame scheduler driving the per-frame analysis pipeline.
//!
//! The scheduler owns the capture lifecycle and a dedicated worker thread
//! that ticks at a fixed interval: read the current mode snapshot, acquire
//! one frame, dispatch to the matching pipeline, render annotations and post
//! the result to the display sink. Every per-frame error kind skips only the
//! tick it occurred in; the loop itself stops only on explicit `stop()`.

use crate::annotation;
use crate::capture::CaptureSource;
use crate::error::{Error, Result};
use crate::face_detection::FaceFinder;
use crate::mode::{Mode, ModeSnapshot, SharedMode};
use crate::segmentation;
use crate::shape;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{info, trace, warn};
use opencv::core::Mat;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Where finished frames go. Implementations must never block the caller;
/// the handoff to the display context is an asynchronous post.
pub trait DisplaySink: Send + Sync {
    fn show(&self, frame: Mat);
}

/// Channel-backed sink: frames are posted with a non-blocking send and
/// dropped when the display context is behind.
pub struct ChannelSink {
    tx: Sender<Mat>,
}

impl ChannelSink {
    /// Create a sink and the receiver the display context drains
    pub fn new(depth: usize) -> (Self, Receiver<Mat>) {
        let (tx, rx) = bounded(depth);
        (Self { tx }, rx)
    }
}

impl DisplaySink for ChannelSink {
    fn show(&self, frame: Mat) {
        match self.tx.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => trace!("display queue full; dropping frame"),
            Err(TrySendError::Disconnected(_)) => trace!("display receiver gone; dropping frame"),
        }
    }
}

/// Scheduler lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

struct Worker {
    handle: JoinHandle<()>,
    done_rx: Receiver<()>,
}

/// Drives capture, analysis and rendering at a fixed cadence
pub struct FrameScheduler {
    capture: Arc<Mutex<Box<dyn CaptureSource>>>,
    faces: Arc<Mutex<Box<dyn FaceFinder>>>,
    sink: Arc<dyn DisplaySink>,
    shared_mode: SharedMode,
    min_contour_area: f64,
    interval: Duration,
    stop_flag: Arc<AtomicBool>,
    worker: Option<Worker>,
    state: SchedulerState,
}

impl FrameScheduler {
    pub fn new(
        capture: Box<dyn CaptureSource>,
        faces: Box<dyn FaceFinder>,
        sink: Arc<dyn DisplaySink>,
        shared_mode: SharedMode,
        min_contour_area: f64,
        interval: Duration,
    ) -> Self {
        Self {
            capture: Arc::new(Mutex::new(capture)),
            faces: Arc::new(Mutex::new(faces)),
            sink,
            shared_mode,
            min_contour_area,
            interval,
            stop_flag: Arc::new(AtomicBool::new(false)),
            worker: None,
            state: SchedulerState::Stopped,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Open the capture source and start the periodic worker.
    ///
    /// On open failure the scheduler stays Stopped and the error is returned
    /// to the caller; a later retry is allowed.
    pub fn start(&mut self) -> Result<()> {
        if self.state == SchedulerState::Running {
            return Ok(());
        }

        {
            let mut capture = self.capture.lock();
            if !capture.open()? {
                return Err(Error::CameraOpen(
                    "capture source could not be opened".to_string(),
                ));
            }
        }

        self.stop_flag.store(false, Ordering::SeqCst);
        let (done_tx, done_rx) = bounded(1);

        let capture = Arc::clone(&self.capture);
        let faces = Arc::clone(&self.faces);
        let sink = Arc::clone(&self.sink);
        let shared_mode = self.shared_mode.clone();
        let min_contour_area = self.min_contour_area;
        let interval = self.interval;
        let stop_flag = Arc::clone(&self.stop_flag);

        let handle = thread::Builder::new()
            .name("frame-scheduler".to_string())
            .spawn(move || {
                run_ticks(
                    &capture,
                    &faces,
                    sink.as_ref(),
                    &shared_mode,
                    min_contour_area,
                    interval,
                    &stop_flag,
                );
                let _ = done_tx.send(());
            })?;

        self.worker = Some(Worker { handle, done_rx });
        self.state = SchedulerState::Running;
        info!("Scheduler started at {} ms cadence", self.interval.as_millis());
        Ok(())
    }

    /// Stop the periodic worker and release the capture source.
    ///
    /// Waits at most one tick interval for the in-flight tick to finish,
    /// then releases the capture regardless. Release goes through the same
    /// lock the worker reads under, so it never races an in-flight read.
    pub fn stop(&mut self) -> Result<()> {
        if self.state == SchedulerState::Stopped {
            return Ok(());
        }

        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            match worker.done_rx.recv_timeout(self.interval) {
                Ok(()) => {
                    let _ = worker.handle.join();
                }
                Err(_) => {
                    // Detach; the worker exits on its next stop-flag check.
                    warn!("scheduler worker did not stop within one tick interval");
                }
            }
        }

        let mut capture = self.capture.lock();
        capture.release()?;
        self.state = SchedulerState::Stopped;
        info!("Scheduler stopped");
        Ok(())
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!("scheduler shutdown failed: {e}");
        }
    }
}

fn run_ticks(
    capture: &Mutex<Box<dyn CaptureSource>>,
    faces: &Mutex<Box<dyn FaceFinder>>,
    sink: &dyn DisplaySink,
    shared_mode: &SharedMode,
    min_contour_area: f64,
    interval: Duration,
    stop_flag: &AtomicBool,
) {
    while !stop_flag.load(Ordering::SeqCst) {
        let tick_started = Instant::now();
        let snapshot = shared_mode.snapshot();

        let acquired = {
            let mut capture = capture.lock();
            capture.read()
        };

        match acquired {
            Ok(frame) => match process_tick(&frame, &snapshot, faces, min_contour_area) {
                Ok(annotated) => sink.show(annotated),
                Err(e) => warn!("frame processing failed; skipping tick: {e}"),
            },
            Err(e) => warn!("frame acquisition failed; skipping tick: {e}"),
        }

        if stop_flag.load(Ordering::SeqCst) {
            break;
        }
        if let Some(remaining) = interval.checked_sub(tick_started.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

/// Run one frame through the pipeline selected by the mode snapshot.
fn process_tick(
    frame: &Mat,
    snapshot: &ModeSnapshot,
    faces: &Mutex<Box<dyn FaceFinder>>,
    min_contour_area: f64,
) -> Result<Mat> {
    match snapshot.mode {
        Mode::Inactive => Ok(frame.clone()),
        Mode::ColorSegment => {
            let contours = segmentation::segment(frame, &snapshot.color_range, min_contour_area)?;
            let shapes = shape::classify_all(&contours)?;
            annotation::render_shapes(frame, &contours, &shapes)
        }
        Mode::FaceDetect => {
            let detections = faces.lock().detect(frame)?;
            annotation::render_faces(frame, &detections)
        }
    }
}
