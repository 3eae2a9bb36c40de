//! Capture sequencing state machine.
//!
//! One trigger walks Idle → Hiding → Settling → Grabbing → Restoring →
//! Idle. The region is resolved from the still-visible geometry before
//! anything hides; the settle wait is a timer suspension, not a blocking
//! sleep; restore runs on every exit path so the overlay can never stay
//! stuck hidden. Overlapping triggers are rejected, never queued.
//!
//! The sequencer is generic over its collaborators so the whole cycle is
//! testable without a window system or a capture device.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;

use super::geometry::{self, CaptureRegion, GeometryError, MonitorLookup};
use crate::jobs::{Job, JobSink, OcrJob, SaveJob};
use crate::overlay::WindowFrame;
use crate::storage;

/// The overlay window set as the sequencer sees it.
pub trait OverlaySurface: Send + Sync {
    /// Current main-window frame in global coordinates.
    fn frame(&self) -> Option<WindowFrame>;

    fn is_visible(&self) -> bool;

    /// Hide the main window and every chrome window.
    fn hide_all(&self);

    /// Undo `hide_all`. Only called when the set was visible beforehand.
    fn show_all(&self);

    /// Push pending window-system work through so a hide/show is
    /// committed before the sequence moves on.
    fn flush(&self);
}

/// The external capture device.
pub trait FrameGrabber: Send + Sync {
    /// Grab exactly `region`. `Ok(None)` is the empty-frame condition:
    /// recoverable, nothing gets dispatched.
    fn grab(&self, region: &CaptureRegion) -> Result<Option<RgbaImage>, GrabError>;
}

#[derive(Debug, thiserror::Error)]
pub enum GrabError {
    #[error("monitor lookup failed: {0}")]
    Monitor(String),

    #[error("capture device failed: {0}")]
    Device(String),
}

/// How one trigger ended. Serialized back to the frontend as a status
/// string; nothing in the UI blocks on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureOutcome {
    /// Frame grabbed; one save job and one OCR job dispatched.
    Completed,
    /// Device returned no pixels; nothing dispatched.
    EmptyFrame,
    /// A capture was already in flight; this trigger was dropped.
    Rejected,
    /// Resolution or the grab itself failed; logged, nothing dispatched.
    Failed,
}

#[derive(Debug, thiserror::Error)]
enum SequenceError {
    #[error("overlay window has no frame")]
    NoWindowFrame,

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

pub struct CaptureSequencer<S, G, M, J> {
    surface: S,
    grabber: G,
    monitors: M,
    jobs: J,
    output_dir: PathBuf,
    settle: Duration,
    capturing: AtomicBool,
}

impl<S, G, M, J> CaptureSequencer<S, G, M, J>
where
    S: OverlaySurface,
    G: FrameGrabber,
    M: MonitorLookup,
    J: JobSink,
{
    pub fn new(
        surface: S,
        grabber: G,
        monitors: M,
        jobs: J,
        output_dir: PathBuf,
        settle: Duration,
    ) -> Self {
        Self {
            surface,
            grabber,
            monitors,
            jobs,
            output_dir,
            settle,
            capturing: AtomicBool::new(false),
        }
    }

    /// Run one capture cycle. Re-entrant triggers while a cycle is in
    /// flight return [`CaptureOutcome::Rejected`] without side effects.
    pub async fn trigger(&self) -> CaptureOutcome {
        if self
            .capturing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::debug!("[CAPTURE] trigger ignored, capture already in flight");
            return CaptureOutcome::Rejected;
        }

        // Recorded before anything hides; restore consults this, not the
        // current window state.
        let was_visible = self.surface.is_visible();
        let outcome = self.run_cycle(was_visible).await;

        // Cleanup phase, on success and on every failure path alike.
        if was_visible {
            self.surface.show_all();
            self.surface.flush();
        }
        self.capturing.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_cycle(&self, was_visible: bool) -> CaptureOutcome {
        // Resolve against the currently visible geometry, before hiding.
        let region = match self.resolve_region() {
            Ok(region) => region,
            Err(e) => {
                log::error!("[CAPTURE] could not resolve capture region: {e}");
                return CaptureOutcome::Failed;
            }
        };

        if was_visible {
            self.surface.hide_all();
            self.surface.flush();
        }

        // Settle: let the compositor redraw without the overlay. Timer
        // suspension; the event loop keeps running.
        tokio::time::sleep(self.settle).await;

        // Monitor layout may have changed while settling; re-clamp the
        // already-computed region against current bounds.
        let region = match geometry::clamp_to_monitor(region, &self.monitors) {
            Ok(region) => region,
            Err(e) => {
                log::error!("[CAPTURE] region no longer on any monitor: {e}");
                return CaptureOutcome::Failed;
            }
        };

        match self.grabber.grab(&region) {
            Ok(Some(frame)) => {
                self.dispatch_jobs(frame);
                CaptureOutcome::Completed
            }
            Ok(None) => {
                log::warn!("[CAPTURE] capture device returned an empty frame");
                CaptureOutcome::EmptyFrame
            }
            Err(e) => {
                log::error!("[CAPTURE] grab failed: {e}");
                CaptureOutcome::Failed
            }
        }
    }

    fn resolve_region(&self) -> Result<CaptureRegion, SequenceError> {
        let frame = self.surface.frame().ok_or(SequenceError::NoWindowFrame)?;
        let region = geometry::region_over_window(frame.x, frame.y, frame.width, frame.height);
        Ok(geometry::clamp_to_monitor(region, &self.monitors)?)
    }

    /// One save job and one OCR job, sharing the frame and the timestamp
    /// stem. Fire-and-forget; the jobs own everything from here.
    fn dispatch_jobs(&self, frame: RgbaImage) {
        let frame = Arc::new(frame);
        let timestamp = storage::timestamp_now();
        log::info!(
            "[CAPTURE] {}x{} frame dispatched as capture_{timestamp}",
            frame.width(),
            frame.height()
        );
        self.jobs.submit(Job::SaveImage(SaveJob::new(
            frame.clone(),
            self.output_dir.clone(),
            timestamp.clone(),
        )));
        self.jobs.submit(Job::RecognizeText(OcrJob::new(
            frame,
            self.output_dir.clone(),
            timestamp,
        )));
    }
}
