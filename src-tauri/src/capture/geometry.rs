//! Pure capture-region geometry — functional core.
//!
//! Translates the overlay window's on-screen frame into a pixel rectangle
//! and clamps it to the bounds of the monitor that owns it. This module has
//! zero infrastructure dependencies; monitor bounds come in through the
//! [`MonitorLookup`] trait so the xcap-backed implementation is swappable
//! in tests.

/// A capture rectangle in global screen coordinates.
///
/// Invariant after [`clamp_to_monitor`]: `left < right`, `top < bottom`,
/// and the rectangle lies wholly inside one monitor's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct CaptureRegion {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl CaptureRegion {
    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }

    /// Center point, used to pick the owning monitor.
    pub fn center(&self) -> (i32, i32) {
        ((self.left + self.right) / 2, (self.top + self.bottom) / 2)
    }

    pub fn is_degenerate(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

/// Position and extent of one physical display, in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl MonitorBounds {
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}

/// Monitor enumeration as seen by the geometry core.
///
/// Implementations must re-query the backend on every call: monitor
/// layout can change between captures (hot-plug, resolution switch).
pub trait MonitorLookup: Send + Sync {
    /// The monitor whose bounds contain the given point, if any.
    fn monitor_at(&self, x: i32, y: i32) -> Option<MonitorBounds>;

    /// The primary monitor, used as fallback when no monitor contains
    /// the requested point.
    fn primary(&self) -> Option<MonitorBounds>;
}

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("no monitors available")]
    NoMonitors,

    #[error(
        "region ({},{})-({},{}) does not intersect monitor at ({},{}) {}x{}",
        region.left, region.top, region.right, region.bottom,
        monitor.x, monitor.y, monitor.width, monitor.height
    )]
    OutsideMonitor {
        region: CaptureRegion,
        monitor: MonitorBounds,
    },
}

/// The pixel rectangle directly beneath a window frame.
pub fn region_over_window(x: i32, y: i32, width: u32, height: u32) -> CaptureRegion {
    CaptureRegion {
        left: x,
        top: y,
        right: x + width as i32,
        bottom: y + height as i32,
    }
}

/// Clamp a region to the monitor containing its center point.
///
/// Falls back to the primary monitor when no monitor contains the center
/// (the window may straddle a boundary or sit on a just-unplugged
/// display). Each edge is clamped independently; a result with no area
/// left is an error rather than a 0-px capture request.
pub fn clamp_to_monitor<M: MonitorLookup>(
    region: CaptureRegion,
    monitors: &M,
) -> Result<CaptureRegion, GeometryError> {
    let (cx, cy) = region.center();
    let monitor = monitors
        .monitor_at(cx, cy)
        .or_else(|| monitors.primary())
        .ok_or(GeometryError::NoMonitors)?;

    let clamped = CaptureRegion {
        left: region.left.max(monitor.x),
        top: region.top.max(monitor.y),
        right: region.right.min(monitor.right()),
        bottom: region.bottom.min(monitor.bottom()),
    };

    if clamped.is_degenerate() {
        return Err(GeometryError::OutsideMonitor { region, monitor });
    }

    Ok(clamped)
}
