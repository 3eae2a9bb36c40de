//! Compile-time application defaults.
//!
//! Veilshot keeps no persisted configuration beyond the output folder
//! path; everything here is a plain struct built once at startup and
//! handed to the components that need it.

use std::path::PathBuf;
use std::time::Duration;

/// Pixel size of a runtime-created chrome window.
#[derive(Debug, Clone, Copy)]
pub struct ChromeSize {
    pub width: u32,
    pub height: u32,
}

/// Capture action button, docked to the right edge of the overlay.
pub const ACTION_SIZE: ChromeSize = ChromeSize {
    width: 120,
    height: 56,
};

/// Minimize/close bar, floating above the top-right corner.
pub const TITLE_SIZE: ChromeSize = ChromeSize {
    width: 76,
    height: 36,
};

/// Resize grip, inset into the bottom-right corner.
pub const HANDLE_SIZE: ChromeSize = ChromeSize {
    width: 16,
    height: 16,
};

/// Inset of the resize grip from the overlay's bottom-right corner.
pub const HANDLE_MARGIN: i32 = 8;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Destination folder for capture images and OCR text files,
    /// created on first write.
    pub output_dir: PathBuf,
    /// Wait after hiding the overlay before grabbing, so the compositor
    /// finishes redrawing without it.
    pub settle_delay: Duration,
    /// Blocking workers available to the save/OCR job pool.
    pub worker_threads: usize,
    /// The overlay window never resizes below this.
    pub min_window_width: u32,
    pub min_window_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("screenshots"),
            settle_delay: Duration::from_millis(40),
            worker_threads: 2,
            min_window_width: 220,
            min_window_height: 140,
        }
    }
}

impl AppConfig {
    pub fn min_size(&self) -> (u32, u32) {
        (self.min_window_width, self.min_window_height)
    }
}
