//! Screen capture domain — public API.
//!
//! `geometry` is the pure core (region math, monitor clamping),
//! `sequencer` the hide → settle → grab → restore state machine, and
//! `grabber` the xcap-backed infrastructure edge. External code should
//! only use what is re-exported here.

pub mod geometry;
mod grabber;
mod sequencer;

pub use geometry::{
    clamp_to_monitor, region_over_window, CaptureRegion, GeometryError, MonitorBounds,
    MonitorLookup,
};
pub use grabber::{XcapGrabber, XcapMonitors};
pub use sequencer::{CaptureOutcome, CaptureSequencer, FrameGrabber, GrabError, OverlaySurface};
