//! Terminal rendition of the simulated desktop.
//!
//! This is the collaborator the window manager talks to: it owns the app
//! registry, draws chrome and the taskbar, and turns terminal input into
//! manager calls. One terminal cell is one geometry unit.

pub mod decorator;
pub mod input;
pub mod taskbar;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEvent};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::config::WmConfig;
use crate::geometry::{self, Viewport};
use crate::window::{PointerButton, PointerKind, WindowManager, WindowObserver};

use decorator::{ChromeState, ClassicDecorator, HeaderAction, WindowDecorator};
use input::pointer_from_mouse;
use taskbar::{Taskbar, TaskbarEntry, TaskbarHit};

pub const TASKBAR_ROWS: u16 = 1;

const DOUBLE_CLICK: Duration = Duration::from_millis(500);

impl From<Rect> for geometry::Rect {
    fn from(rect: Rect) -> Self {
        geometry::Rect::new(
            rect.x as i32,
            rect.y as i32,
            rect.width as u32,
            rect.height as u32,
        )
    }
}

/// Part of a window rectangle that lands inside `bounds`, in cells.
pub fn screen_rect(rect: geometry::Rect, bounds: Rect) -> Option<Rect> {
    let x0 = (rect.x as i64).max(bounds.x as i64);
    let y0 = (rect.y as i64).max(bounds.y as i64);
    let x1 = rect.right().min(bounds.right() as i64);
    let y1 = rect.bottom().min(bounds.bottom() as i64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect {
        x: x0 as u16,
        y: y0 as u16,
        width: (x1 - x0) as u16,
        height: (y1 - y0) as u16,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl AppEntry {
    pub fn new(id: &str, title: &str, body: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

pub fn default_apps() -> Vec<AppEntry> {
    vec![
        AppEntry::new("notes", "Notes", "Jot something down. Notes are not saved."),
        AppEntry::new(
            "calculator",
            "Calculator",
            "A pocket calculator would live here.",
        ),
        AppEntry::new("video", "Video", "An embedded video player would live here."),
        AppEntry::new(
            "article",
            "Article",
            "Fetched articles would be rendered here.",
        ),
    ]
}

/// Last thing the window manager reported, shown in the taskbar.
#[derive(Debug, Default)]
pub struct StatusLine {
    text: String,
}

impl StatusLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl WindowObserver for StatusLine {
    fn on_visibility_changed(&mut self, id: &str, visible: bool) {
        self.text = if visible {
            format!("{id} opened")
        } else {
            format!("{id} hidden")
        };
    }

    fn on_focus_changed(&mut self, id: Option<&str>) {
        if let Some(id) = id {
            self.text = format!("{id} focused");
        }
    }
}

pub struct Desktop {
    windows: WindowManager,
    apps: Vec<AppEntry>,
    taskbar: Taskbar,
    decorator: Box<dyn WindowDecorator>,
    status: Rc<RefCell<StatusLine>>,
    last_header_click: Option<(String, Instant)>,
}

impl Desktop {
    pub fn new(config: WmConfig, apps: Vec<AppEntry>) -> Self {
        let mut windows = WindowManager::new(config);
        let status = Rc::new(RefCell::new(StatusLine::default()));
        windows.add_observer(Box::new(status.clone()));
        Self {
            windows,
            apps,
            taskbar: Taskbar::new(),
            decorator: Box::new(ClassicDecorator),
            status,
            last_header_click: None,
        }
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn status(&self) -> String {
        self.status.borrow().text().to_string()
    }

    /// Feed the terminal size to the manager as its viewport.
    pub fn sync_viewport(&mut self, area: Rect) {
        self.windows.set_viewport(Viewport::new(
            area.width as u32,
            area.height as u32,
            TASKBAR_ROWS as u32,
        ));
    }

    pub fn open_nth(&mut self, index: usize) {
        if let Some(app) = self.apps.get(index) {
            self.windows.open(&app.id);
        }
    }

    /// Apply due deferred closes and report when the next one is due.
    pub fn tick(&mut self, now: Instant) -> Option<Instant> {
        self.windows.poll_deferred(now);
        self.windows.next_deadline()
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key.code, now),
            Event::Resize(width, height) => {
                self.sync_viewport(Rect::new(0, 0, *width, *height));
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, code: KeyCode, now: Instant) -> bool {
        let focused = self.windows.focused().map(str::to_string);
        match (code, focused) {
            (KeyCode::Char(c @ '1'..='9'), _) => {
                self.open_nth(c as usize - '1' as usize);
                true
            }
            (KeyCode::Char('m'), Some(id)) => {
                self.windows.minimize(&id);
                true
            }
            (KeyCode::Char('x'), Some(id)) => {
                self.windows.toggle_maximize(&id);
                true
            }
            (KeyCode::Char('w'), Some(id)) => {
                self.windows.schedule_close(&id, now);
                true
            }
            (KeyCode::Tab, Some(_)) => {
                // raise the window at the back of the stack
                let back = self
                    .windows
                    .stacking_order()
                    .first()
                    .map(|record| record.id().to_string());
                if let Some(id) = back {
                    self.windows.bring_to_front(&id);
                }
                true
            }
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) -> bool {
        let Some(pointer) = pointer_from_mouse(mouse) else {
            return false;
        };
        let PointerKind::Down(button) = pointer.kind else {
            return self.windows.handle_global_pointer(pointer);
        };

        if let Some(hit) = self.taskbar.hit_test(mouse.column, mouse.row) {
            match hit {
                TaskbarHit::Start => self.status.borrow_mut().set("start menu is not available"),
                TaskbarHit::App(id) => self.windows.open(&id),
            }
            return true;
        }

        let Some((id, screen)) = self.window_at(mouse.column, mouse.row) else {
            return false;
        };
        self.windows.bring_to_front(&id);
        if button != PointerButton::Primary {
            return true;
        }

        let action = self.decorator.hit_test(screen, mouse.column, mouse.row);
        if action != HeaderAction::Drag {
            self.last_header_click = None;
        }
        match action {
            HeaderAction::Close => self.windows.schedule_close(&id, now),
            HeaderAction::Minimize => self.windows.minimize(&id),
            HeaderAction::Maximize => self.windows.toggle_maximize(&id),
            HeaderAction::Drag => {
                if let Some((prev_id, prev)) = self.last_header_click.take()
                    && prev_id == id
                    && now.duration_since(prev) <= DOUBLE_CLICK
                {
                    self.windows.toggle_maximize(&id);
                } else {
                    self.last_header_click = Some((id.clone(), now));
                    self.windows.handle_pointer(&id, pointer);
                }
            }
            HeaderAction::None => {}
        }
        true
    }

    fn desktop_bounds(&self) -> Rect {
        let viewport = self.windows.viewport();
        Rect::new(
            0,
            0,
            viewport.width.min(u16::MAX as u32) as u16,
            viewport.usable_height().min(u16::MAX as u32) as u16,
        )
    }

    // topmost visible window under the cell, with its on-screen rectangle
    fn window_at(&self, column: u16, row: u16) -> Option<(String, Rect)> {
        let bounds = self.desktop_bounds();
        let point = geometry::Point::new(column as i32, row as i32);
        self.windows
            .stacking_order()
            .into_iter()
            .rev()
            .filter_map(|record| {
                screen_rect(record.rect(), bounds).map(|screen| (record.id(), screen))
            })
            .find(|(_, screen)| geometry::rect_contains((*screen).into(), point))
            .map(|(id, screen)| (id.to_string(), screen))
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.render_to(frame.buffer_mut(), area);
    }

    pub fn render_to(&mut self, buffer: &mut Buffer, area: Rect) {
        let (desktop, _) = self.taskbar.split_area(area, TASKBAR_ROWS);
        Block::default()
            .style(Style::default().bg(Color::Indexed(24)))
            .render(desktop, buffer);

        let bounds = desktop.intersection(self.desktop_bounds());
        let focused = self.windows.focused();
        for record in self.windows.stacking_order() {
            let Some(screen) = screen_rect(record.rect(), bounds) else {
                continue;
            };
            let app = self.apps.iter().find(|app| app.id == record.id());
            let title = app.map_or(record.id(), |app| app.title.as_str());
            let chrome = ChromeState {
                focused: focused == Some(record.id()),
                maximized: record.is_maximized(),
                closing: self.windows.is_closing(record.id()),
            };
            self.decorator.render_window(buffer, screen, title, chrome);

            let content = self.decorator.content_area(screen);
            let rect = record.rect();
            let text = format!(
                "{}\n\n{}x{} at ({}, {}), z {}",
                app.map_or("", |app| app.body.as_str()),
                rect.width,
                rect.height,
                rect.x,
                rect.y,
                record.z_index()
            );
            Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .render(content, buffer);
        }

        let entries: Vec<TaskbarEntry<'_>> = self
            .apps
            .iter()
            .map(|app| {
                let record = self.windows.get_record(&app.id);
                TaskbarEntry {
                    id: &app.id,
                    title: &app.title,
                    active: record.is_some_and(|r| r.is_visible() || r.is_minimized()),
                    focused: focused == Some(app.id.as_str()),
                }
            })
            .collect();
        let status = self.status.borrow();
        self.taskbar.render(buffer, &entries, status.text());
    }
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("windows", &self.windows)
            .field("apps", &self.apps)
            .field("taskbar", &self.taskbar)
            .finish()
    }
}
