//! Drag-to-move and drag-to-resize gesture state — pure math.
//!
//! Each gesture is press/move/release with no animation or inertia: press
//! records a reference point, every move is computed from that reference
//! (never incrementally), release clears the state. The command layer in
//! `lib.rs` owns one optional instance of each and applies the results to
//! the overlay window.

/// Window-body drag: repositions the overlay to pointer − offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDrag {
    offset_x: i32,
    offset_y: i32,
}

impl MoveDrag {
    /// Press: record the offset between the pointer and the window's
    /// top-left corner.
    pub fn begin(pointer: (i32, i32), window_origin: (i32, i32)) -> Self {
        Self {
            offset_x: pointer.0 - window_origin.0,
            offset_y: pointer.1 - window_origin.1,
        }
    }

    /// Move: the window origin that keeps the grab point under the
    /// pointer.
    pub fn window_origin(&self, pointer: (i32, i32)) -> (i32, i32) {
        (pointer.0 - self.offset_x, pointer.1 - self.offset_y)
    }
}

/// Corner-handle drag: grows the overlay by the pointer delta, clamped to
/// a minimum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    start_pointer: (i32, i32),
    start_size: (u32, u32),
}

impl ResizeDrag {
    /// Press: record the pointer position and the window's current size.
    pub fn begin(pointer: (i32, i32), window_size: (u32, u32)) -> Self {
        Self {
            start_pointer: pointer,
            start_size: window_size,
        }
    }

    /// Move: new window size for the current pointer position; never
    /// shrinks below `min_size`.
    pub fn window_size(&self, pointer: (i32, i32), min_size: (u32, u32)) -> (u32, u32) {
        let dx = pointer.0 - self.start_pointer.0;
        let dy = pointer.1 - self.start_pointer.1;
        let width = (self.start_size.0 as i32 + dx).max(min_size.0 as i32) as u32;
        let height = (self.start_size.1 as i32 + dy).max(min_size.1 as i32) as u32;
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: (u32, u32) = (220, 140);

    #[test]
    fn move_keeps_grab_point_under_pointer() {
        let drag = MoveDrag::begin((150, 130), (100, 100));
        assert_eq!(drag.window_origin((150, 130)), (100, 100));
        assert_eq!(drag.window_origin((300, 90)), (250, 60));
    }

    #[test]
    fn move_is_computed_from_press_not_incrementally() {
        let drag = MoveDrag::begin((10, 10), (0, 0));
        // Same pointer position twice yields the same origin.
        assert_eq!(drag.window_origin((55, 70)), drag.window_origin((55, 70)));
    }

    #[test]
    fn resize_grows_by_pointer_delta() {
        let drag = ResizeDrag::begin((700, 300), (600, 200));
        assert_eq!(drag.window_size((750, 340), MIN), (650, 240));
    }

    #[test]
    fn resize_clamps_to_minimum_size() {
        let drag = ResizeDrag::begin((700, 300), (600, 200));
        assert_eq!(drag.window_size((0, 0), MIN), MIN);
    }

    #[test]
    fn resize_allows_shrinking_down_to_minimum() {
        let drag = ResizeDrag::begin((700, 300), (600, 200));
        assert_eq!(drag.window_size((320, 280), MIN), (220, 180));
    }
}
