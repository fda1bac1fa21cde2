//! Processing mode state shared between the UI and the scheduler thread.
//!
//! The mode and its color range are the one piece of shared mutable state in
//! the system: written by the UI context on selection change, read by the
//! scheduler thread once at the top of each tick. [`SharedMode`] guards the
//! pair behind a lock so readers always observe a consistent snapshot.

use crate::color_range::ColorRange;
use parking_lot::Mutex;
use std::sync::Arc;

/// What the per-frame analysis should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pass frames through unannotated
    Inactive,
    /// Segment by color range and label shapes
    ColorSegment,
    /// Run the face/eye detector cascade
    FaceDetect,
}

/// A consistent (mode, color range) pair read once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeSnapshot {
    pub mode: Mode,
    pub color_range: ColorRange,
}

impl Default for ModeSnapshot {
    fn default() -> Self {
        Self {
            mode: Mode::Inactive,
            color_range: ColorRange::full(),
        }
    }
}

/// The discrete options the mode-selection surface exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Inactive,
    Green,
    Orange,
    Face,
}

impl Selection {
    /// The snapshot this selection resolves to
    pub fn snapshot(self) -> ModeSnapshot {
        match self {
            Self::Inactive => ModeSnapshot::default(),
            Self::Green => ModeSnapshot {
                mode: Mode::ColorSegment,
                color_range: ColorRange::green(),
            },
            Self::Orange => ModeSnapshot {
                mode: Mode::ColorSegment,
                color_range: ColorRange::orange(),
            },
            Self::Face => ModeSnapshot {
                mode: Mode::FaceDetect,
                color_range: ColorRange::full(),
            },
        }
    }
}

/// Lock-guarded snapshot cell shared between the UI and scheduler contexts
#[derive(Debug, Clone, Default)]
pub struct SharedMode {
    inner: Arc<Mutex<ModeSnapshot>>,
}

impl SharedMode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the snapshot with the one for `selection`
    pub fn select(&self, selection: Selection) {
        *self.inner.lock() = selection.snapshot();
    }

    /// Copy out the current snapshot
    pub fn snapshot(&self) -> ModeSnapshot {
        *self.inner.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_default_snapshot_is_inactive_full_range() {
        let snapshot = ModeSnapshot::default();
        assert_eq!(snapshot.mode, Mode::Inactive);
        assert_eq!(snapshot.color_range, ColorRange::full());
    }

    #[test]
    fn test_selection_maps_to_mode_and_range() {
        assert_eq!(Selection::Green.snapshot().mode, Mode::ColorSegment);
        assert_eq!(Selection::Green.snapshot().color_range, ColorRange::green());
        assert_eq!(Selection::Orange.snapshot().mode, Mode::ColorSegment);
        assert_eq!(Selection::Orange.snapshot().color_range, ColorRange::orange());
        assert_eq!(Selection::Face.snapshot().mode, Mode::FaceDetect);
        assert_eq!(Selection::Inactive.snapshot().mode, Mode::Inactive);
    }

    #[test]
    fn test_selection_is_visible_across_threads() {
        let shared = SharedMode::new();
        let writer = shared.clone();

        let handle = thread::spawn(move || {
            writer.select(Selection::Orange);
        });
        handle.join().unwrap();

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.mode, Mode::ColorSegment);
        assert_eq!(snapshot.color_range, ColorRange::orange());
    }
}
