use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    /// Keep going, but wake no later than this instant even without input.
    WaitUntil(Instant),
    Quit,
}

/// Drives the UI thread: polls the input driver and hands every event to a
/// handler closure.
///
/// The handler is called with `None` once per iteration before polling, which
/// is where callers redraw and apply timers. Deferred work such as a pending
/// window close is expressed by returning [`ControlFlow::WaitUntil`], which
/// shortens the next poll so the deadline is not overslept.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// How long the next poll may block.
    fn timeout(&self, deadline: Option<Instant>, now: Instant) -> Duration {
        match deadline {
            Some(at) => at.saturating_duration_since(now).min(self.poll_interval),
            None => self.poll_interval,
        }
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            let deadline = match handler(&mut self.driver, None)? {
                ControlFlow::Quit => return Ok(()),
                ControlFlow::WaitUntil(at) => Some(at),
                ControlFlow::Continue => None,
            };

            let timeout = self.timeout(deadline, Instant::now());
            if self.driver.poll(timeout)? {
                // drain bursts (drags) before the next redraw
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ScriptedDriver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn timeout_never_exceeds_interval_or_deadline() {
        let event_loop = EventLoop::new(ScriptedDriver::default(), Duration::from_millis(50));
        let now = Instant::now();
        assert_eq!(event_loop.timeout(None, now), Duration::from_millis(50));
        assert_eq!(
            event_loop.timeout(Some(now + Duration::from_millis(10)), now),
            Duration::from_millis(10)
        );
        assert_eq!(
            event_loop.timeout(Some(now + Duration::from_secs(5)), now),
            Duration::from_millis(50)
        );
        assert_eq!(event_loop.timeout(Some(now), now + Duration::from_millis(1)), Duration::ZERO);
    }

    #[test]
    fn events_are_drained_between_ticks() {
        let driver = ScriptedDriver::new([key('a'), key('b'), key('q')]);
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        let mut seen = Vec::new();
        let mut ticks = 0;
        event_loop
            .run(|_, event| match event {
                None => {
                    ticks += 1;
                    Ok(ControlFlow::Continue)
                }
                Some(Event::Key(key)) if key.code == KeyCode::Char('q') => Ok(ControlFlow::Quit),
                Some(event) => {
                    seen.push(event);
                    Ok(ControlFlow::Continue)
                }
            })
            .unwrap();
        assert_eq!(seen, vec![key('a'), key('b')]);
        assert_eq!(ticks, 1);
        assert_eq!(event_loop.into_driver().remaining(), 0);
    }

    #[test]
    fn tick_handler_can_quit() {
        let mut event_loop = EventLoop::new(ScriptedDriver::default(), Duration::ZERO);
        let mut ticks = 0;
        event_loop
            .run(|_, _| {
                ticks += 1;
                if ticks == 3 {
                    Ok(ControlFlow::Quit)
                } else {
                    Ok(ControlFlow::WaitUntil(Instant::now()))
                }
            })
            .unwrap();
        assert_eq!(ticks, 3);
        assert_eq!(event_loop.driver().polls(), 2);
    }
}
