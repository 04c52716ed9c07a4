//! Shared crate-wide constants.

use std::time::Duration;

/// Stacking value the allocator starts counting from.
///
/// Values at or below this are left to decorative and system layers
/// (wallpaper, desktop icons, the taskbar) so application windows always
/// stack above them.
pub const DEFAULT_Z_BASE: u64 = 1000;

/// Width of a freshly opened window before it is clamped to the viewport.
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;

/// Height of a freshly opened window before it is clamped to the viewport.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;

/// Gap kept between a maximized window and every edge of the usable area.
pub const DEFAULT_MAXIMIZE_INSET: u32 = 20;

/// Strip reserved at the bottom of the viewport for the taskbar.
pub const DEFAULT_TASKBAR_HEIGHT: u32 = 40;

pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 768;

/// How long a scheduled close waits before the window is actually hidden.
///
/// The presentation layer uses this window to play its fade-out.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_millis(300);
