//! Pointer-driven window dragging, decoupled from any concrete input API.
//!
//! Each window owns one [`DragController`]. Feeding it [`PointerEvent`]s
//! walks the `Idle -> Dragging -> Idle` machine:
//!
//! | state      | event          | next       | outcome                       |
//! |------------|----------------|------------|-------------------------------|
//! | `Idle`     | primary down   | `Dragging` | `Started` (if draggable)      |
//! | `Idle`     | anything else  | `Idle`     | `Ignored`                     |
//! | `Dragging` | move           | `Dragging` | `Moved(clamped rect)`         |
//! | `Dragging` | up (any button)| `Idle`     | `Ended`                       |
//! | `Dragging` | down           | `Dragging` | `Ignored`                     |

use crate::geometry::{Point, Rect, Viewport, clamp_to_viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down(PointerButton),
    Move,
    Up(PointerButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
        }
    }

    pub fn down(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Down(PointerButton::Primary), x, y)
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self::new(PointerKind::Up(PointerButton::Primary), x, y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        /// Pointer position when the drag began.
        start: Point,
        /// Pointer position at the previous move.
        last: Point,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Ignored,
    Started,
    Moved(Rect),
    Ended,
}

/// What the controller needs to know about its window for one event.
#[derive(Debug, Clone, Copy)]
pub struct DragContext {
    pub rect: Rect,
    pub viewport: Viewport,
    /// False for hidden and maximized windows.
    pub draggable: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn handle(&mut self, event: PointerEvent, ctx: DragContext) -> DragOutcome {
        match (self.state, event.kind) {
            (DragState::Idle, PointerKind::Down(PointerButton::Primary)) => {
                if !ctx.draggable {
                    return DragOutcome::Ignored;
                }
                self.state = DragState::Dragging {
                    start: event.position,
                    last: event.position,
                };
                DragOutcome::Started
            }
            (DragState::Idle, _) => DragOutcome::Ignored,
            (DragState::Dragging { start, last }, PointerKind::Move) => {
                let delta = event.position.delta_from(last);
                let proposed = ctx.rect.with_origin(ctx.rect.origin().offset(delta));
                let clamped = clamp_to_viewport(proposed, ctx.viewport);
                self.state = DragState::Dragging {
                    start,
                    last: event.position,
                };
                DragOutcome::Moved(clamped)
            }
            (DragState::Dragging { .. }, PointerKind::Up(PointerButton::Primary)) => {
                self.state = DragState::Idle;
                DragOutcome::Ended
            }
            (DragState::Dragging { .. }, PointerKind::Up(_) | PointerKind::Down(_)) => {
                DragOutcome::Ignored
            }
        }
    }

    /// Drop back to `Idle` without a pointer-up, e.g. when the window is
    /// hidden mid-drag. Returns whether a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = DragState::Idle;
        was_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(rect: Rect) -> DragContext {
        DragContext {
            rect,
            viewport: Viewport::new(1024, 768, 40),
            draggable: true,
        }
    }

    #[test]
    fn drag_up_and_left_clamps_to_top_edge() {
        let mut drag = DragController::new();
        let rect = Rect::new(112, 84, 800, 600);
        assert_eq!(
            drag.handle(PointerEvent::down(150, 150), ctx(rect)),
            DragOutcome::Started
        );
        assert_eq!(
            drag.handle(PointerEvent::moved(50, 50), ctx(rect)),
            DragOutcome::Moved(Rect::new(12, 0, 800, 600))
        );
        assert_eq!(
            drag.handle(PointerEvent::up(50, 50), ctx(rect)),
            DragOutcome::Ended
        );
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn moves_apply_incremental_deltas_from_current_origin() {
        let mut drag = DragController::new();
        let mut rect = Rect::new(100, 100, 200, 100);
        drag.handle(PointerEvent::down(110, 105), ctx(rect));
        for (x, y) in [(120, 115), (130, 125)] {
            match drag.handle(PointerEvent::moved(x, y), ctx(rect)) {
                DragOutcome::Moved(next) => rect = next,
                other => panic!("expected move, got {other:?}"),
            }
        }
        assert_eq!(rect.origin(), Point::new(120, 120));
        assert_eq!(
            drag.state(),
            DragState::Dragging {
                start: Point::new(110, 105),
                last: Point::new(130, 125),
            }
        );
    }

    #[test]
    fn secondary_button_and_non_draggable_never_start() {
        let mut drag = DragController::new();
        let rect = Rect::new(0, 0, 10, 10);
        let right = PointerEvent::new(PointerKind::Down(PointerButton::Secondary), 1, 1);
        assert_eq!(drag.handle(right, ctx(rect)), DragOutcome::Ignored);

        let locked = DragContext {
            draggable: false,
            ..ctx(rect)
        };
        assert_eq!(
            drag.handle(PointerEvent::down(1, 1), locked),
            DragOutcome::Ignored
        );
        assert!(!drag.is_dragging());
        assert_eq!(
            drag.handle(PointerEvent::moved(5, 5), ctx(rect)),
            DragOutcome::Ignored
        );
    }

    #[test]
    fn only_primary_release_ends_drag() {
        let mut drag = DragController::new();
        let rect = Rect::new(0, 0, 10, 10);
        drag.handle(PointerEvent::down(1, 1), ctx(rect));
        let right_up = PointerEvent::new(PointerKind::Up(PointerButton::Secondary), 1, 1);
        assert_eq!(drag.handle(right_up, ctx(rect)), DragOutcome::Ignored);
        assert!(drag.is_dragging());
        assert_eq!(
            drag.handle(PointerEvent::up(1, 1), ctx(rect)),
            DragOutcome::Ended
        );
    }

    #[test]
    fn cancel_reports_previous_state() {
        let mut drag = DragController::new();
        assert!(!drag.cancel());
        drag.handle(PointerEvent::down(1, 1), ctx(Rect::new(0, 0, 10, 10)));
        assert!(drag.cancel());
        assert!(!drag.is_dragging());
    }
}
