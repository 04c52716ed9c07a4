//! Window lifecycle, stacking and drag management for a simulated desktop.
//!
//! [`window::WindowManager`] is the core: it owns one record per window id and
//! keeps open/close/minimize/maximize, stacking order and pointer drags
//! consistent. It knows nothing about rendering; the [`desktop`] module is a
//! terminal presentation layer built on top of it.

pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod tracing_sub;
pub mod window;

pub use config::WmConfig;
pub use error::{WmError, WmResult};
pub use geometry::{Point, Rect, Size, Viewport};
pub use window::{WindowManager, WindowRecord};
