//! Overlay window set — public API.
//!
//! The main translucent frame plus three chrome windows (capture button,
//! title bar, resize grip) that track its position, size, and visibility.
//! Chrome windows have no lifecycle of their own: they are created right
//! after the main window, follow every move/resize, and close with it.
//!
//! Placement math lives in `layout` and gesture math in `gestures`, both
//! pure. This file is the Tauri edge that applies them.

mod gestures;
mod layout;

pub use gestures::{MoveDrag, ResizeDrag};
pub use layout::{action_origin, handle_origin, title_origin, WindowFrame};

use std::sync::{Arc, Mutex};

use tauri::{AppHandle, Manager, PhysicalPosition, Position, WebviewUrl, WebviewWindowBuilder};

use crate::capture::OverlaySurface;
use crate::config::{ChromeSize, ACTION_SIZE, HANDLE_SIZE, TITLE_SIZE};

pub const MAIN_WINDOW: &str = "overlay";
pub const ACTION_WINDOW: &str = "action";
pub const TITLE_WINDOW: &str = "title";
pub const HANDLE_WINDOW: &str = "handle";

/// Chrome windows in creation order: label, size, page.
const CHROME_WINDOWS: [(&str, ChromeSize, &str); 3] = [
    (ACTION_WINDOW, ACTION_SIZE, "action.html"),
    (TITLE_WINDOW, TITLE_SIZE, "title.html"),
    (HANDLE_WINDOW, HANDLE_SIZE, "handle.html"),
];

/// The two signals that can hide the chrome. They compose: a capture
/// while minimized must not reveal anything when it finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityState {
    pub minimized: bool,
    pub hidden_for_capture: bool,
}

impl VisibilityState {
    pub fn chrome_visible(&self) -> bool {
        !self.minimized && !self.hidden_for_capture
    }
}

/// Visibility state shared between the capture sequencer, the minimize
/// command, and the window-event handler.
#[derive(Clone, Default)]
pub struct SharedVisibility {
    state: Arc<Mutex<VisibilityState>>,
}

impl SharedVisibility {
    pub fn get(&self) -> VisibilityState {
        self.state.lock().map(|s| *s).unwrap_or_default()
    }

    /// Apply a mutation and return the resulting state.
    pub fn update(&self, apply: impl FnOnce(&mut VisibilityState)) -> VisibilityState {
        match self.state.lock() {
            Ok(mut s) => {
                apply(&mut s);
                *s
            }
            Err(_) => VisibilityState::default(),
        }
    }
}

/// The main overlay frame as currently placed on screen.
pub fn main_frame(app: &AppHandle) -> Option<WindowFrame> {
    let window = app.get_webview_window(MAIN_WINDOW)?;
    let position = window.outer_position().ok()?;
    let size = window.inner_size().ok()?;
    Some(WindowFrame {
        x: position.x,
        y: position.y,
        width: size.width,
        height: size.height,
    })
}

/// Create the chrome windows next to the already-created main window.
///
/// Built hidden, positioned from the main frame, then shown, so they
/// never flash at the default placement.
pub fn create_chrome_windows(app: &AppHandle) -> tauri::Result<()> {
    for (label, size, page) in CHROME_WINDOWS {
        WebviewWindowBuilder::new(app, label, WebviewUrl::App(page.into()))
            .title(label)
            .inner_size(f64::from(size.width), f64::from(size.height))
            .decorations(false)
            .transparent(true)
            .always_on_top(true)
            .skip_taskbar(true)
            .resizable(false)
            .focused(false)
            .visible(false)
            .shadow(false)
            .build()?;
    }
    sync_chrome_positions(app);
    apply_chrome_visibility(app, true);
    Ok(())
}

/// Recompute every chrome window's derived position from the main frame.
/// Called after each move/resize of the main window.
pub fn sync_chrome_positions(app: &AppHandle) {
    let Some(frame) = main_frame(app) else {
        return;
    };
    for (label, size, _) in CHROME_WINDOWS {
        let (x, y) = match label {
            ACTION_WINDOW => layout::action_origin(&frame, size),
            TITLE_WINDOW => layout::title_origin(&frame, size),
            _ => layout::handle_origin(&frame, size),
        };
        if let Some(window) = app.get_webview_window(label) {
            let _ = window.set_position(Position::Physical(PhysicalPosition { x, y }));
        }
    }
}

/// Show or hide the chrome set as a unit.
pub fn apply_chrome_visibility(app: &AppHandle, visible: bool) {
    for (label, _, _) in CHROME_WINDOWS {
        if let Some(window) = app.get_webview_window(label) {
            let result = if visible {
                window.show()
            } else {
                window.hide()
            };
            if let Err(e) = result {
                log::warn!("[OVERLAY] could not toggle {label}: {e}");
            }
        }
    }
}

/// Close the chrome set; used when the main window is closing.
pub fn close_chrome(app: &AppHandle) {
    for (label, _, _) in CHROME_WINDOWS {
        if let Some(window) = app.get_webview_window(label) {
            let _ = window.close();
        }
    }
}

/// The live window set as seen by the capture sequencer.
pub struct TauriSurface {
    app: AppHandle,
    visibility: SharedVisibility,
}

impl TauriSurface {
    pub fn new(app: AppHandle, visibility: SharedVisibility) -> Self {
        Self { app, visibility }
    }
}

impl OverlaySurface for TauriSurface {
    fn frame(&self) -> Option<WindowFrame> {
        main_frame(&self.app)
    }

    fn is_visible(&self) -> bool {
        self.app
            .get_webview_window(MAIN_WINDOW)
            .and_then(|w| w.is_visible().ok())
            .unwrap_or(false)
    }

    fn hide_all(&self) {
        self.visibility.update(|s| s.hidden_for_capture = true);
        if let Some(window) = self.app.get_webview_window(MAIN_WINDOW) {
            let _ = window.hide();
        }
        apply_chrome_visibility(&self.app, false);
    }

    fn show_all(&self) {
        let state = self.visibility.update(|s| s.hidden_for_capture = false);
        if let Some(window) = self.app.get_webview_window(MAIN_WINDOW) {
            let _ = window.show();
        }
        apply_chrome_visibility(&self.app, state.chrome_visible());
        sync_chrome_positions(&self.app);
    }

    fn flush(&self) {
        // Round-trip through the main thread: once the closure has run,
        // every window operation queued before it has been processed.
        let (tx, rx) = std::sync::mpsc::channel();
        let queued = self.app.run_on_main_thread(move || {
            let _ = tx.send(());
        });
        if queued.is_ok() {
            let _ = rx.recv_timeout(std::time::Duration::from_millis(100));
        }
    }
}
