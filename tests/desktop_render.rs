use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use desk_wm::WmConfig;
use desk_wm::desktop::{Desktop, default_apps};
use desk_wm::geometry::Size;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

fn desktop() -> Desktop {
    let config = WmConfig::default()
        .with_default_size(Size::new(40, 10))
        .with_maximize_inset(1)
        .with_close_delay(Duration::from_millis(300));
    let mut desktop = Desktop::new(config, default_apps());
    desktop.sync_viewport(Rect::new(0, 0, 80, 24));
    desktop
}

fn press(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

#[test]
fn opened_window_is_drawn_above_taskbar() {
    let mut desk = desktop();
    desk.handle_event(&press('1'), Instant::now());

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| desk.render(frame)).unwrap();
    let buffer = terminal.backend().buffer().clone();

    // 40x10 centered in 80x24 lands at (20, 7)
    let header = row_text(&buffer, 7);
    assert!(header.contains("Notes"), "header row: {header:?}");
    assert!(header.contains("[x]"));

    let bar = row_text(&buffer, 23);
    assert!(bar.contains("Start"));
    assert!(bar.contains("Calculator"));
    assert!(bar.contains("notes focused"));
}

#[test]
fn closed_window_disappears_after_fade() {
    let mut desk = desktop();
    let t0 = Instant::now();
    desk.handle_event(&press('2'), t0);
    desk.handle_event(&press('w'), t0);
    assert!(desk.windows().is_closing("calculator"));

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    assert!(desk.tick(t0 + Duration::from_millis(100)).is_some());
    terminal.draw(|frame| desk.render(frame)).unwrap();
    assert!(row_text(terminal.backend().buffer(), 7).contains("Calculator"));

    assert_eq!(desk.tick(t0 + Duration::from_millis(300)), None);
    terminal.draw(|frame| desk.render(frame)).unwrap();
    assert!(!row_text(terminal.backend().buffer(), 7).contains("Calculator"));
    assert_eq!(desk.status(), "calculator hidden");
}

#[test]
fn resize_refits_maximized_window() {
    let mut desk = desktop();
    let now = Instant::now();
    desk.handle_event(&press('1'), now);
    desk.handle_event(&press('x'), now);
    desk.handle_event(&Event::Resize(60, 20), now);
    let record = desk.windows().get_record("notes").expect("notes");
    assert_eq!(record.rect(), desk_wm::Rect::new(1, 1, 58, 17));
}
