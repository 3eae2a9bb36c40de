//! Derived chrome-window placement — pure functions.
//!
//! Every chrome window's position is a function of the main overlay
//! frame and the chrome window's own size, recomputed after every move
//! or resize of the main window. No state lives here.

use crate::config::{ChromeSize, HANDLE_MARGIN};

/// The main overlay window's frame in global screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFrame {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Capture button: docked just past the right edge, vertically centered
/// (2 px overlap so the windows read as one surface).
pub fn action_origin(main: &WindowFrame, size: ChromeSize) -> (i32, i32) {
    let x = main.x + main.width as i32 - 2;
    let y = main.y + ((main.height as i32 - size.height as i32) / 2).max(0);
    (x, y)
}

/// Title bar: floats above the top edge, right-aligned with a 2 px inset.
pub fn title_origin(main: &WindowFrame, size: ChromeSize) -> (i32, i32) {
    let x = main.x + main.width as i32 - size.width as i32 - 2;
    let y = main.y - size.height as i32 + 2;
    (x, y)
}

/// Resize grip: inset into the bottom-right corner of the main frame.
pub fn handle_origin(main: &WindowFrame, size: ChromeSize) -> (i32, i32) {
    let x = main.x + main.width as i32 - size.width as i32 - HANDLE_MARGIN;
    let y = main.y + main.height as i32 - size.height as i32 - HANDLE_MARGIN;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> WindowFrame {
        WindowFrame {
            x: 100,
            y: 100,
            width: 600,
            height: 200,
        }
    }

    #[test]
    fn action_docks_right_and_centers_vertically() {
        let size = ChromeSize {
            width: 120,
            height: 56,
        };
        assert_eq!(action_origin(&frame(), size), (698, 172));
    }

    #[test]
    fn action_never_rises_above_the_frame() {
        let size = ChromeSize {
            width: 120,
            height: 400,
        };
        let (_, y) = action_origin(&frame(), size);
        assert_eq!(y, 100);
    }

    #[test]
    fn title_floats_above_top_right() {
        let size = ChromeSize {
            width: 76,
            height: 36,
        };
        assert_eq!(title_origin(&frame(), size), (622, 66));
    }

    #[test]
    fn handle_sits_inside_bottom_right() {
        let size = ChromeSize {
            width: 16,
            height: 16,
        };
        assert_eq!(handle_origin(&frame(), size), (676, 276));
    }

    #[test]
    fn placements_track_the_frame() {
        let size = ChromeSize {
            width: 16,
            height: 16,
        };
        let moved = WindowFrame {
            x: 400,
            y: 350,
            ..frame()
        };
        let (x0, y0) = handle_origin(&frame(), size);
        let (x1, y1) = handle_origin(&moved, size);
        assert_eq!((x1 - x0, y1 - y0), (300, 250));
    }
}
