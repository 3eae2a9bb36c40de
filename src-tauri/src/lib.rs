//! Veilshot — Tauri application entry point.
//!
//! This is the app shell that wires together:
//! - Capture domain (capture/): geometry, sequencing, xcap edge
//! - Overlay window set (overlay/): chrome placement, visibility, gestures
//! - Background job pool (jobs/): image save + OCR off the UI thread
//! - Tauri command handlers for the overlay pages

pub mod capture;
pub mod config;
pub mod jobs;
pub mod ocr;
pub mod overlay;
pub mod storage;

use std::sync::Mutex;

use tauri::{Manager, PhysicalPosition, PhysicalSize, Position, Size};

use capture::{CaptureOutcome, CaptureSequencer, XcapGrabber, XcapMonitors};
use config::AppConfig;
use jobs::TaskDispatcher;
use overlay::{MoveDrag, ResizeDrag, SharedVisibility, TauriSurface};

type AppSequencer = CaptureSequencer<TauriSurface, XcapGrabber, XcapMonitors, TaskDispatcher>;

/// The capture sequencer, shared by every trigger source.
struct CaptureController {
    sequencer: AppSequencer,
}

/// In-progress drag gestures. One of each at most; cleared on release.
#[derive(Default)]
struct GestureState {
    move_drag: Mutex<Option<MoveDrag>>,
    resize_drag: Mutex<Option<ResizeDrag>>,
}

/// Tauri command: run one capture cycle.
///
/// Returns immediately with the outcome; save and OCR continue in the
/// background. A trigger while a cycle is in flight reports `rejected`.
#[tauri::command]
async fn trigger_capture(
    controller: tauri::State<'_, CaptureController>,
) -> Result<CaptureOutcome, String> {
    let outcome = controller.sequencer.trigger().await;
    log::info!(
        "[CAPTURE] trigger finished: {}",
        serde_json::to_string(&outcome).map_err(|e| e.to_string())?
    );
    Ok(outcome)
}

/// Tauri command: press on the overlay body records the pointer/origin offset.
#[tauri::command]
fn begin_window_drag(
    app: tauri::AppHandle,
    gestures: tauri::State<'_, GestureState>,
    pointer_x: i32,
    pointer_y: i32,
) -> Result<(), String> {
    let frame = overlay::main_frame(&app).ok_or("overlay window unavailable")?;
    let drag = MoveDrag::begin((pointer_x, pointer_y), (frame.x, frame.y));
    *gestures.move_drag.lock().map_err(|e| e.to_string())? = Some(drag);
    Ok(())
}

/// Tauri command: pointer moved during a window drag.
#[tauri::command]
fn update_window_drag(
    app: tauri::AppHandle,
    gestures: tauri::State<'_, GestureState>,
    pointer_x: i32,
    pointer_y: i32,
) -> Result<(), String> {
    let drag = *gestures.move_drag.lock().map_err(|e| e.to_string())?;
    let Some(drag) = drag else {
        return Ok(());
    };
    let (x, y) = drag.window_origin((pointer_x, pointer_y));
    let window = app
        .get_webview_window(overlay::MAIN_WINDOW)
        .ok_or("overlay window unavailable")?;
    // Chrome windows follow through the Moved event.
    window
        .set_position(Position::Physical(PhysicalPosition { x, y }))
        .map_err(|e| e.to_string())
}

#[tauri::command]
fn end_window_drag(gestures: tauri::State<'_, GestureState>) -> Result<(), String> {
    *gestures.move_drag.lock().map_err(|e| e.to_string())? = None;
    Ok(())
}

/// Tauri command: press on the resize grip records the pointer and size.
#[tauri::command]
fn begin_resize_drag(
    app: tauri::AppHandle,
    gestures: tauri::State<'_, GestureState>,
    pointer_x: i32,
    pointer_y: i32,
) -> Result<(), String> {
    let frame = overlay::main_frame(&app).ok_or("overlay window unavailable")?;
    let drag = ResizeDrag::begin((pointer_x, pointer_y), (frame.width, frame.height));
    *gestures.resize_drag.lock().map_err(|e| e.to_string())? = Some(drag);
    Ok(())
}

/// Tauri command: pointer moved during a resize drag.
#[tauri::command]
fn update_resize_drag(
    app: tauri::AppHandle,
    gestures: tauri::State<'_, GestureState>,
    config: tauri::State<'_, AppConfig>,
    pointer_x: i32,
    pointer_y: i32,
) -> Result<(), String> {
    let drag = *gestures.resize_drag.lock().map_err(|e| e.to_string())?;
    let Some(drag) = drag else {
        return Ok(());
    };
    let (width, height) = drag.window_size((pointer_x, pointer_y), config.min_size());
    let window = app
        .get_webview_window(overlay::MAIN_WINDOW)
        .ok_or("overlay window unavailable")?;
    window
        .set_size(Size::Physical(PhysicalSize { width, height }))
        .map_err(|e| e.to_string())
}

#[tauri::command]
fn end_resize_drag(gestures: tauri::State<'_, GestureState>) -> Result<(), String> {
    *gestures.resize_drag.lock().map_err(|e| e.to_string())? = None;
    Ok(())
}

/// Tauri command: minimize the overlay; the chrome set goes with it.
#[tauri::command]
fn minimize_overlay(
    app: tauri::AppHandle,
    visibility: tauri::State<'_, SharedVisibility>,
) -> Result<(), String> {
    let state = visibility.update(|s| s.minimized = true);
    overlay::apply_chrome_visibility(&app, state.chrome_visible());
    app.get_webview_window(overlay::MAIN_WINDOW)
        .ok_or("overlay window unavailable")?
        .minimize()
        .map_err(|e| e.to_string())
}

/// Tauri command: close the overlay and the chrome set.
#[tauri::command]
fn close_overlay(app: tauri::AppHandle) -> Result<(), String> {
    log::info!("Close requested from title bar");
    overlay::close_chrome(&app);
    if let Some(window) = app.get_webview_window(overlay::MAIN_WINDOW) {
        window.close().map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Re-derive the minimized flag from the window and re-apply chrome
/// visibility when it changed (restore arrives as focus/resize events,
/// there is no dedicated minimize event).
fn sync_minimized_state(app: &tauri::AppHandle, window: &tauri::Window) {
    let minimized = window.is_minimized().unwrap_or(false);
    let visibility = app.state::<SharedVisibility>();
    if visibility.get().minimized != minimized {
        let state = visibility.update(|s| s.minimized = minimized);
        log::debug!("[OVERLAY] minimized changed: {minimized}");
        overlay::apply_chrome_visibility(app, state.chrome_visible());
        if state.chrome_visible() {
            overlay::sync_chrome_positions(app);
        }
    }
}

/// Entry point — called by the Tauri runtime.
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::init();

    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            trigger_capture,
            begin_window_drag,
            update_window_drag,
            end_window_drag,
            begin_resize_drag,
            update_resize_drag,
            end_resize_drag,
            minimize_overlay,
            close_overlay
        ])
        .setup(|app| {
            log::info!("Veilshot starting up");

            let config = AppConfig::default();
            let visibility = SharedVisibility::default();
            let dispatcher = TaskDispatcher::new(config.worker_threads)?;
            let surface = TauriSurface::new(app.handle().clone(), visibility.clone());
            let sequencer = CaptureSequencer::new(
                surface,
                XcapGrabber,
                XcapMonitors,
                dispatcher,
                config.output_dir.clone(),
                config.settle_delay,
            );

            app.manage(CaptureController { sequencer });
            app.manage(GestureState::default());
            app.manage(visibility);
            app.manage(config);

            overlay::create_chrome_windows(app.handle())?;

            log::info!("Overlay and chrome windows ready");
            Ok(())
        })
        .on_window_event(|window, event| {
            if window.label() != overlay::MAIN_WINDOW {
                return;
            }
            let app = window.app_handle();
            match event {
                tauri::WindowEvent::Moved(_) | tauri::WindowEvent::Resized(_) => {
                    overlay::sync_chrome_positions(app);
                    sync_minimized_state(app, window);
                }
                tauri::WindowEvent::Focused(true) => {
                    sync_minimized_state(app, window);
                }
                tauri::WindowEvent::CloseRequested { .. } => {
                    overlay::close_chrome(app);
                }
                _ => {}
            }
        })
        .run(tauri::generate_context!())
        .expect("Error running Veilshot");
}
