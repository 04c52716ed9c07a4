use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::window::{PointerButton, PointerEvent, PointerKind};

/// Translate a terminal mouse event into the manager's pointer vocabulary.
///
/// Scroll events have no pointer equivalent and yield `None`.
pub fn pointer_from_mouse(mouse: &MouseEvent) -> Option<PointerEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(button) => PointerKind::Down(pointer_button(button)),
        MouseEventKind::Up(button) => PointerKind::Up(pointer_button(button)),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => PointerKind::Move,
        _ => return None,
    };
    Some(PointerEvent::new(kind, mouse.column as i32, mouse.row as i32))
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
    }
}
