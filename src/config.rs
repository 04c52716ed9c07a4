use std::time::Duration;

use crate::constants::{
    DEFAULT_CLOSE_DELAY, DEFAULT_MAXIMIZE_INSET, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    DEFAULT_Z_BASE,
};
use crate::geometry::{Size, Viewport};

/// Inputs the window manager takes from the surrounding application instead
/// of measuring rendered layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmConfig {
    /// Size given to a window the first time it opens (clamped to the
    /// viewport).
    pub default_size: Size,
    pub maximize_inset: u32,
    pub z_base: u64,
    /// Delay between `schedule_close` and the window actually hiding.
    pub close_delay: Duration,
    pub viewport: Viewport,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            default_size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            maximize_inset: DEFAULT_MAXIMIZE_INSET,
            z_base: DEFAULT_Z_BASE,
            close_delay: DEFAULT_CLOSE_DELAY,
            viewport: Viewport::default(),
        }
    }
}

impl WmConfig {
    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    pub fn with_maximize_inset(mut self, inset: u32) -> Self {
        self.maximize_inset = inset;
        self
    }

    pub fn with_z_base(mut self, base: u64) -> Self {
        self.z_base = base;
        self
    }

    pub fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}
