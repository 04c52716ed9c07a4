use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Clear, Widget};

/// What a press on a window's top row should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    None,
    Drag,
    Minimize,
    Maximize,
    Close,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeState {
    pub focused: bool,
    pub maximized: bool,
    /// A close has been scheduled and the window is fading out.
    pub closing: bool,
}

/// Draws window chrome and maps header presses back to actions.
///
/// `rect` is always the on-screen (clipped) rectangle so rendering and hit
/// testing agree on where the buttons are.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, buffer: &mut Buffer, rect: Rect, title: &str, chrome: ChromeState);
    fn hit_test(&self, rect: Rect, column: u16, row: u16) -> HeaderAction;
    fn content_area(&self, rect: Rect) -> Rect;
}

const BUTTON_WIDTH: u16 = 3;
// corners plus three buttons plus at least two title cells
const MIN_WIDTH_FOR_BUTTONS: u16 = 2 + BUTTON_WIDTH * 3 + 2;

#[derive(Debug, Default)]
pub struct ClassicDecorator;

impl ClassicDecorator {
    fn button_x(rect: Rect, action: HeaderAction) -> Option<u16> {
        if rect.width < MIN_WIDTH_FOR_BUTTONS {
            return None;
        }
        let right = rect.right().saturating_sub(1);
        let slot = match action {
            HeaderAction::Close => 1,
            HeaderAction::Maximize => 2,
            HeaderAction::Minimize => 3,
            HeaderAction::Drag | HeaderAction::None => return None,
        };
        Some(right.saturating_sub(BUTTON_WIDTH * slot))
    }
}

impl WindowDecorator for ClassicDecorator {
    fn render_window(&self, buffer: &mut Buffer, rect: Rect, title: &str, chrome: ChromeState) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        Clear.render(rect, buffer);

        let mut border_style = if chrome.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut header_style = if chrome.focused {
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        };
        if chrome.closing {
            border_style = border_style.add_modifier(Modifier::DIM);
            header_style = header_style.add_modifier(Modifier::DIM);
        }
        Block::bordered().border_style(border_style).render(rect, buffer);

        let right = rect.right().saturating_sub(1);
        for x in rect.x.saturating_add(1)..right {
            if let Some(cell) = buffer.cell_mut((x, rect.y)) {
                cell.set_symbol(" ");
                cell.set_style(header_style);
            }
        }

        let title_limit = match Self::button_x(rect, HeaderAction::Minimize) {
            Some(min_x) => min_x.saturating_sub(rect.x.saturating_add(1)),
            None => rect.width.saturating_sub(2),
        };
        buffer.set_stringn(
            rect.x.saturating_add(1),
            rect.y,
            format!(" {title}"),
            title_limit as usize,
            header_style,
        );

        let maximize_label = if chrome.maximized { "[▣]" } else { "[□]" };
        for (action, label) in [
            (HeaderAction::Minimize, "[_]"),
            (HeaderAction::Maximize, maximize_label),
            (HeaderAction::Close, "[x]"),
        ] {
            if let Some(x) = Self::button_x(rect, action) {
                buffer.set_string(x, rect.y, label, header_style);
            }
        }
    }

    fn hit_test(&self, rect: Rect, column: u16, row: u16) -> HeaderAction {
        if rect.width < 2 || row != rect.y {
            return HeaderAction::None;
        }
        if column < rect.x || column >= rect.right() {
            return HeaderAction::None;
        }
        for action in [
            HeaderAction::Close,
            HeaderAction::Maximize,
            HeaderAction::Minimize,
        ] {
            if let Some(x) = Self::button_x(rect, action)
                && column >= x
                && column < x.saturating_add(BUTTON_WIDTH)
            {
                return action;
            }
        }
        HeaderAction::Drag
    }

    fn content_area(&self, rect: Rect) -> Rect {
        Rect {
            x: rect.x.saturating_add(1),
            y: rect.y.saturating_add(1),
            width: rect.width.saturating_sub(2),
            height: rect.height.saturating_sub(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_buttons_sit_left_of_the_corner() {
        let deco = ClassicDecorator;
        let rect = Rect::new(10, 5, 30, 8);
        // right corner at x = 39
        assert_eq!(deco.hit_test(rect, 37, 5), HeaderAction::Close);
        assert_eq!(deco.hit_test(rect, 34, 5), HeaderAction::Maximize);
        assert_eq!(deco.hit_test(rect, 30, 5), HeaderAction::Minimize);
        assert_eq!(deco.hit_test(rect, 15, 5), HeaderAction::Drag);
        assert_eq!(deco.hit_test(rect, 15, 6), HeaderAction::None);
        assert_eq!(deco.hit_test(rect, 40, 5), HeaderAction::None);
    }

    #[test]
    fn narrow_windows_only_drag() {
        let deco = ClassicDecorator;
        let rect = Rect::new(0, 0, 8, 4);
        assert_eq!(deco.hit_test(rect, 6, 0), HeaderAction::Drag);
    }

    #[test]
    fn render_places_title_and_buttons() {
        let deco = ClassicDecorator;
        let rect = Rect::new(0, 0, 24, 5);
        let mut buffer = Buffer::empty(rect);
        deco.render_window(
            &mut buffer,
            rect,
            "Notes",
            ChromeState {
                focused: true,
                ..Default::default()
            },
        );
        let header: String = (0..rect.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(header.contains("Notes"));
        assert!(header.ends_with("[_][□][x]┐"));
        assert_eq!(deco.content_area(rect), Rect::new(1, 1, 22, 3));
    }
}
