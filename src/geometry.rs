//! Device-independent geometry shared by the window manager and its
//! collaborators.
//!
//! Origins are signed so a proposed position can sit left of or above the
//! viewport before it is clamped; sizes are unsigned.

use crate::constants::{DEFAULT_TASKBAR_HEIGHT, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    pub fn delta_from(self, other: Point) -> Point {
        Point {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }

    pub fn offset(self, delta: Point) -> Point {
        Point {
            x: self.x.saturating_add(delta.x),
            y: self.y.saturating_add(delta.y),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Signed rectangle origin with unsigned size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn with_origin(self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..self
        }
    }

    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

/// The area windows live in, as reported by the presentation layer.
///
/// `taskbar_height` is carved off the bottom; windows are never clamped into
/// that strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub taskbar_height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            taskbar_height: DEFAULT_TASKBAR_HEIGHT,
        }
    }
}

impl Viewport {
    pub const fn new(width: u32, height: u32, taskbar_height: u32) -> Self {
        Self {
            width,
            height,
            taskbar_height,
        }
    }

    /// Height left over once the taskbar strip is reserved.
    pub fn usable_height(&self) -> u32 {
        self.height.saturating_sub(self.taskbar_height)
    }

    pub fn usable_area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.usable_height())
    }
}

/// Constrain `proposed` so it stays inside the usable part of `viewport`.
///
/// The origin is clamped to `[0, width - rect.width]` horizontally and
/// `[0, usable_height - rect.height]` vertically. Size is never changed; a
/// rectangle larger than the usable area is pinned to the top-left so its
/// header stays reachable.
pub fn clamp_to_viewport(proposed: Rect, viewport: Viewport) -> Rect {
    let max_x = (viewport.width as i64 - proposed.width as i64).max(0);
    let max_y = (viewport.usable_height() as i64 - proposed.height as i64).max(0);
    let x = (proposed.x as i64).clamp(0, max_x);
    let y = (proposed.y as i64).clamp(0, max_y);
    Rect {
        x: x as i32,
        y: y as i32,
        width: proposed.width,
        height: proposed.height,
    }
}

/// Center `size` in the full viewport, shrinking it first so it fits the
/// usable area, then run the result through [`clamp_to_viewport`].
pub fn centered_rect(size: Size, viewport: Viewport) -> Rect {
    let width = size.width.min(viewport.width);
    let height = size.height.min(viewport.usable_height());
    let x = (viewport.width - width) / 2;
    let y = viewport.height.saturating_sub(height) / 2;
    clamp_to_viewport(Rect::new(x as i32, y as i32, width, height), viewport)
}

/// Viewport-filling rectangle with `inset` kept free on every side of the
/// usable area.
pub fn maximized_rect(viewport: Viewport, inset: u32) -> Rect {
    let area = viewport.usable_area();
    let inset_x = inset.min(area.width / 2);
    let inset_y = inset.min(area.height / 2);
    Rect {
        x: inset_x as i32,
        y: inset_y as i32,
        width: area.width - inset_x * 2,
        height: area.height - inset_y * 2,
    }
}

pub fn rect_contains(rect: Rect, point: Point) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let px = point.x as i64;
    let py = point.y as i64;
    px >= rect.x as i64 && px < rect.right() && py >= rect.y as i64 && py < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_default_window_on_1024x768() {
        let viewport = Viewport::new(1024, 768, 40);
        let rect = centered_rect(Size::new(800, 600), viewport);
        assert_eq!(rect, Rect::new(112, 84, 800, 600));
    }

    #[test]
    fn centered_rect_shrinks_oversized_default() {
        let viewport = Viewport::new(640, 480, 40);
        let rect = centered_rect(Size::new(800, 600), viewport);
        assert_eq!(rect.width, 640);
        assert_eq!(rect.height, 440);
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 0);
    }

    #[test]
    fn clamp_blocks_negative_and_overflowing_origins() {
        let viewport = Viewport::new(1024, 768, 40);
        let clamped = clamp_to_viewport(Rect::new(12, -16, 800, 600), viewport);
        assert_eq!(clamped, Rect::new(12, 0, 800, 600));

        let clamped = clamp_to_viewport(Rect::new(900, 700, 800, 600), viewport);
        assert_eq!(clamped.origin(), Point::new(224, 128));
    }

    #[test]
    fn clamp_pins_oversized_rect_to_top_left() {
        let viewport = Viewport::new(100, 50, 10);
        let clamped = clamp_to_viewport(Rect::new(30, 30, 200, 80), viewport);
        assert_eq!(clamped.origin(), Point::new(0, 0));
        assert_eq!(clamped.size(), Size::new(200, 80));
    }

    #[test]
    fn maximized_rect_respects_inset_and_taskbar() {
        let viewport = Viewport::new(1024, 768, 40);
        assert_eq!(maximized_rect(viewport, 20), Rect::new(20, 20, 984, 688));
    }

    #[test]
    fn maximized_rect_on_tiny_viewport_never_underflows() {
        let viewport = Viewport::new(10, 12, 4);
        let rect = maximized_rect(viewport, 20);
        assert_eq!(rect, Rect::new(5, 4, 0, 0));
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(-2, 3, 4, 2);
        assert!(rect_contains(r, Point::new(-2, 3)));
        assert!(rect_contains(r, Point::new(1, 4)));
        assert!(!rect_contains(r, Point::new(2, 4)));
        assert!(!rect_contains(Rect::new(0, 0, 0, 5), Point::new(0, 0)));
    }
}
