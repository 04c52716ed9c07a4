pub mod drag;
pub mod observer;
pub mod store;
pub mod z_order;

mod window_manager;

use crate::geometry::Rect;

pub use drag::{
    DragContext, DragController, DragOutcome, DragState, PointerButton, PointerEvent, PointerKind,
};
pub use observer::{WindowEvent, WindowObserver};
pub use store::WindowRecordStore;
pub use window_manager::WindowManager;
pub use z_order::ZOrderAllocator;

/// Display mode a window returns to when it is shown.
///
/// Kept apart from the `minimized` flag so a maximized window that gets
/// minimized comes back maximized, with its pre-maximize rectangle intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowMode {
    #[default]
    Normal,
    Maximized {
        saved: Rect,
    },
}

/// Flag view of a record as the presentation layer sees it.
///
/// `maximized` and `minimized` are never both set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowFlags {
    pub visible: bool,
    pub maximized: bool,
    pub minimized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    id: String,
    rect: Rect,
    z_index: u64,
    visible: bool,
    minimized: bool,
    mode: WindowMode,
    // bumped by open and close; guards deferred hides
    epoch: u64,
}

impl WindowRecord {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            rect: Rect::default(),
            z_index: 0,
            visible: false,
            minimized: false,
            mode: WindowMode::Normal,
            epoch: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Maximized as far as the user can see; a minimized window is never
    /// reported as maximized even when it will come back that way.
    pub fn is_maximized(&self) -> bool {
        !self.minimized && matches!(self.mode, WindowMode::Maximized { .. })
    }

    /// Pre-maximize rectangle, present exactly while [`is_maximized`] holds.
    ///
    /// [`is_maximized`]: WindowRecord::is_maximized
    pub fn saved_rect(&self) -> Option<Rect> {
        match self.mode {
            WindowMode::Maximized { saved } if !self.minimized => Some(saved),
            _ => None,
        }
    }

    pub fn flags(&self) -> WindowFlags {
        WindowFlags {
            visible: self.visible,
            maximized: self.is_maximized(),
            minimized: self.minimized,
        }
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    fn apply(&mut self, patch: &RecordPatch) {
        if let Some(rect) = patch.rect {
            self.rect = rect;
        }
        if let Some(z) = patch.z_index {
            self.z_index = z;
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(minimized) = patch.minimized {
            self.minimized = minimized;
        }
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if patch.bump_epoch {
            self.epoch = self.epoch.wrapping_add(1);
        }
    }
}

/// Partial update for [`WindowRecordStore::upsert`]. Unset fields are left
/// as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub rect: Option<Rect>,
    pub z_index: Option<u64>,
    pub visible: Option<bool>,
    pub minimized: Option<bool>,
    pub mode: Option<WindowMode>,
    pub(crate) bump_epoch: bool,
}

impl RecordPatch {
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    pub fn z_index(mut self, z: u64) -> Self {
        self.z_index = Some(z);
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn minimized(mut self, minimized: bool) -> Self {
        self.minimized = Some(minimized);
        self
    }

    pub fn mode(mut self, mode: WindowMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub(crate) fn transition(mut self) -> Self {
        self.bump_epoch = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_maximized_window_reports_neither_maximized_nor_saved_rect() {
        let mut record = WindowRecord::new("notes");
        let saved = Rect::new(112, 84, 800, 600);
        record.apply(
            &RecordPatch::default()
                .mode(WindowMode::Maximized { saved })
                .visible(true),
        );
        assert!(record.is_maximized());
        assert_eq!(record.saved_rect(), Some(saved));

        record.apply(&RecordPatch::default().visible(false).minimized(true));
        let flags = record.flags();
        assert!(flags.minimized);
        assert!(!flags.maximized);
        assert_eq!(record.saved_rect(), None);
        assert_eq!(record.mode(), WindowMode::Maximized { saved });
    }

    #[test]
    fn patch_leaves_unset_fields_alone() {
        let mut record = WindowRecord::new("calc");
        record.apply(&RecordPatch::default().rect(Rect::new(1, 2, 3, 4)).z_index(7));
        record.apply(&RecordPatch::default().visible(true));
        assert_eq!(record.rect(), Rect::new(1, 2, 3, 4));
        assert_eq!(record.z_index(), 7);
        assert!(record.is_visible());
        assert_eq!(record.epoch(), 0);
        record.apply(&RecordPatch::default().transition());
        assert_eq!(record.epoch(), 1);
    }
}
