use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyModifiers};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use desk_wm::WmConfig;
use desk_wm::desktop::{Desktop, default_apps};
use desk_wm::drivers::InputDriver;
use desk_wm::drivers::console::ConsoleDriver;
use desk_wm::event_loop::{ControlFlow, EventLoop};
use desk_wm::geometry::Size;
use desk_wm::tracing_sub::{self, LogTarget};

#[derive(Parser, Debug)]
#[command(
    name = "desk-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "A toy desktop with draggable, stackable windows in the terminal",
    after_help = indoc::indoc! {"
        Keys:
          1-9       open an app
          m / x / w minimize, maximize or close the focused window
          Tab       raise the window at the back
          q, Ctrl+C quit
    "}
)]
struct Cli {
    /// Width of a newly opened window, in cells.
    #[arg(long, value_name = "CELLS", default_value_t = 48)]
    window_width: u32,

    /// Height of a newly opened window, in cells.
    #[arg(long, value_name = "CELLS", default_value_t = 14)]
    window_height: u32,

    /// Gap around maximized windows.
    #[arg(long, value_name = "CELLS", default_value_t = 1)]
    inset: u32,

    /// First stacking value handed out is one above this.
    #[arg(long, value_name = "Z", default_value_t = desk_wm::constants::DEFAULT_Z_BASE)]
    z_base: u64,

    /// Delay between clicking close and the window disappearing.
    #[arg(long, value_name = "MS", default_value_t = 300)]
    close_delay_ms: u64,

    /// Append debug logs to this file instead of discarding them.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> WmConfig {
        WmConfig::default()
            .with_default_size(Size::new(self.window_width, self.window_height))
            .with_maximize_inset(self.inset)
            .with_z_base(self.z_base)
            .with_close_delay(Duration::from_millis(self.close_delay_ms))
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let target = match &cli.log_file {
        Some(path) => tracing_sub::open_log_file(path)?,
        None => LogTarget::Discard,
    };
    tracing_sub::init_default(target);

    let mut desktop = Desktop::new(cli.config(), default_apps());

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut driver = ConsoleDriver::new();
    let result = driver
        .set_mouse_capture(true)
        .and_then(|_| run(&mut terminal, &mut driver, &mut desktop));

    let _ = driver.set_mouse_capture(false);
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    driver: &mut ConsoleDriver,
    desktop: &mut Desktop,
) -> io::Result<()> {
    let area = terminal.size()?;
    desktop.sync_viewport(ratatui::layout::Rect::new(0, 0, area.width, area.height));
    tracing::info!(width = area.width, height = area.height, "desktop started");

    let mut event_loop = EventLoop::new(driver, Duration::from_millis(100));
    event_loop.run(|_, event| {
        let now = Instant::now();
        let Some(event) = event else {
            let deadline = desktop.tick(now);
            terminal.draw(|frame| desktop.render(frame))?;
            return Ok(match deadline {
                Some(at) => ControlFlow::WaitUntil(at),
                None => ControlFlow::Continue,
            });
        };
        if is_quit(&event) {
            return Ok(ControlFlow::Quit);
        }
        desktop.handle_event(&event, now);
        Ok(ControlFlow::Continue)
    })
}

fn is_quit(event: &Event) -> bool {
    match event {
        Event::Key(key) => {
            key.code == KeyCode::Char('q')
                || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        }
        _ => false,
    }
}
