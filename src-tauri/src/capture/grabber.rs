//! Capture-device and monitor-enumeration edge, backed by `xcap`.
//!
//! This is the infrastructure layer — it talks to the OS. Monitor layout
//! is re-queried on every call; nothing here caches across captures, so
//! hot-plug and resolution changes are picked up by the next trigger.

use image::RgbaImage;
use xcap::Monitor;

use super::geometry::{CaptureRegion, MonitorBounds, MonitorLookup};
use super::sequencer::{FrameGrabber, GrabError};

fn bounds_of(monitor: &Monitor) -> xcap::XCapResult<MonitorBounds> {
    Ok(MonitorBounds {
        x: monitor.x()?,
        y: monitor.y()?,
        width: monitor.width()?,
        height: monitor.height()?,
    })
}

/// Monitor lookup over live xcap enumeration.
pub struct XcapMonitors;

impl MonitorLookup for XcapMonitors {
    fn monitor_at(&self, x: i32, y: i32) -> Option<MonitorBounds> {
        let monitor = Monitor::from_point(x, y).ok()?;
        bounds_of(&monitor).ok()
    }

    fn primary(&self) -> Option<MonitorBounds> {
        let monitors = Monitor::all().ok()?;
        monitors
            .iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| monitors.first())
            .and_then(|m| bounds_of(m).ok())
    }
}

/// Frame grabber: captures the owning monitor and crops to the region.
pub struct XcapGrabber;

impl FrameGrabber for XcapGrabber {
    fn grab(&self, region: &CaptureRegion) -> Result<Option<RgbaImage>, GrabError> {
        let (cx, cy) = region.center();
        let monitor =
            Monitor::from_point(cx, cy).map_err(|e| GrabError::Monitor(e.to_string()))?;
        let bounds = bounds_of(&monitor).map_err(|e| GrabError::Monitor(e.to_string()))?;

        let image = monitor
            .capture_image()
            .map_err(|e| GrabError::Device(e.to_string()))?;

        // Region is monitor-clamped global pixels; translate into the
        // captured image's coordinate space.
        let x = (region.left - bounds.x).max(0) as u32;
        let y = (region.top - bounds.y).max(0) as u32;
        let width = region.width().min(image.width().saturating_sub(x));
        let height = region.height().min(image.height().saturating_sub(y));

        if width == 0 || height == 0 {
            return Ok(None);
        }

        Ok(Some(
            image::imageops::crop_imm(&image, x, y, width, height).to_image(),
        ))
    }
}
