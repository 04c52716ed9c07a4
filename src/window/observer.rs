use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::Rect;

/// State change the manager reports to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    VisibilityChanged { id: String, visible: bool },
    GeometryChanged { id: String, rect: Rect },
    /// `None` when no window is visible any more.
    FocusChanged { id: Option<String> },
}

impl WindowEvent {
    pub fn dispatch(&self, observer: &mut dyn WindowObserver) {
        match self {
            WindowEvent::VisibilityChanged { id, visible } => {
                observer.on_visibility_changed(id, *visible)
            }
            WindowEvent::GeometryChanged { id, rect } => observer.on_geometry_changed(id, *rect),
            WindowEvent::FocusChanged { id } => observer.on_focus_changed(id.as_deref()),
        }
    }
}

/// Callbacks into the presentation layer.
///
/// They run only after an operation has finished mutating state, so an
/// observer always sees a consistent manager.
pub trait WindowObserver {
    fn on_visibility_changed(&mut self, _id: &str, _visible: bool) {}
    fn on_geometry_changed(&mut self, _id: &str, _rect: Rect) {}
    fn on_focus_changed(&mut self, _id: Option<&str>) {}
}

/// Collects events for callers that prefer to drain them after the fact.
impl WindowObserver for Vec<WindowEvent> {
    fn on_visibility_changed(&mut self, id: &str, visible: bool) {
        self.push(WindowEvent::VisibilityChanged {
            id: id.to_string(),
            visible,
        });
    }

    fn on_geometry_changed(&mut self, id: &str, rect: Rect) {
        self.push(WindowEvent::GeometryChanged {
            id: id.to_string(),
            rect,
        });
    }

    fn on_focus_changed(&mut self, id: Option<&str>) {
        self.push(WindowEvent::FocusChanged {
            id: id.map(str::to_string),
        });
    }
}

/// Lets the caller keep a handle on an observer after handing it to the
/// manager.
impl<T: WindowObserver> WindowObserver for Rc<RefCell<T>> {
    fn on_visibility_changed(&mut self, id: &str, visible: bool) {
        self.borrow_mut().on_visibility_changed(id, visible);
    }

    fn on_geometry_changed(&mut self, id: &str, rect: Rect) {
        self.borrow_mut().on_geometry_changed(id, rect);
    }

    fn on_focus_changed(&mut self, id: Option<&str>) {
        self.borrow_mut().on_focus_changed(id);
    }
}
