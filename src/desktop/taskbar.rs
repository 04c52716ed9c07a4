use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

use crate::geometry::{Point, rect_contains};

const START_LABEL: &str = " ☰ Start ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskbarEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    /// Open or minimized; drives the "active" indicator.
    pub active: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskbarHit {
    Start,
    App(String),
}

#[derive(Debug, Clone)]
struct EntryHit {
    id: String,
    rect: Rect,
}

/// Bottom strip with a start button, one button per registered app and a
/// status line.
///
/// Hit regions are rebuilt on every render.
#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    start: Option<Rect>,
    entries: Vec<EntryHit>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `area` into the desktop above and a bar of `height` rows below.
    pub fn split_area(&mut self, area: Rect, height: u16) -> (Rect, Rect) {
        let bar_h = height.min(area.height);
        let desktop = Rect {
            height: area.height - bar_h,
            ..area
        };
        let bar = Rect {
            x: area.x,
            y: area.y.saturating_add(area.height - bar_h),
            width: area.width,
            height: bar_h,
        };
        self.area = bar;
        (desktop, bar)
    }

    pub fn render(&mut self, buffer: &mut Buffer, entries: &[TaskbarEntry<'_>], status: &str) {
        self.start = None;
        self.entries.clear();
        let bounds = self.area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default().bg(Color::DarkGray).fg(Color::White);
        for y in bounds.y..bounds.bottom() {
            for x in bounds.x..bounds.right() {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(base);
                }
            }
        }

        let row = bounds.y;
        let end = bounds.right();
        let mut x = bounds.x;
        let start_style = base.add_modifier(Modifier::BOLD);
        let (after, _) = buffer.set_stringn(x, row, START_LABEL, (end - x) as usize, start_style);
        self.start = Some(Rect::new(x, row, after - x, 1));
        x = after.saturating_add(1);

        for entry in entries {
            if x >= end {
                break;
            }
            let marker = if entry.active { "•" } else { " " };
            let label = format!(" {marker}{} ", entry.title);
            let style = if entry.focused {
                base.bg(Color::Blue).add_modifier(Modifier::BOLD)
            } else if entry.active {
                base.add_modifier(Modifier::UNDERLINED)
            } else {
                base
            };
            let (after, _) = buffer.set_stringn(x, row, &label, (end - x) as usize, style);
            self.entries.push(EntryHit {
                id: entry.id.to_string(),
                rect: Rect::new(x, row, after - x, 1),
            });
            x = after.saturating_add(1);
        }

        let status_width = status.chars().count() as u16;
        if status_width > 0 && x.saturating_add(status_width) < end {
            let status_x = end - status_width - 1;
            buffer.set_string(status_x, row, status, base.fg(Color::Gray));
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<TaskbarHit> {
        let point = Point::new(column as i32, row as i32);
        if self.start.is_some_and(|rect| contains(rect, point)) {
            return Some(TaskbarHit::Start);
        }
        self.entries
            .iter()
            .find(|hit| contains(hit.rect, point))
            .map(|hit| TaskbarHit::App(hit.id.clone()))
    }

    /// Where the button for `id` was drawn on the last render.
    pub fn entry_rect(&self, id: &str) -> Option<Rect> {
        self.entries.iter().find(|hit| hit.id == id).map(|hit| hit.rect)
    }
}

fn contains(rect: Rect, point: Point) -> bool {
    rect_contains(rect.into(), point)
}
