//! Terminal event pump

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Terminal resized, forces a redraw
    Resize,
    /// No input within the tick interval
    Tick,
}

enum Step {
    Send(Event),
    Skip,
    Stop,
}

/// Turns one poll into an event.
///
/// A terminal error stops the pump, which drops the sender and ends the
/// board's event loop with an error.
fn next_step(
    polled: io::Result<bool>,
    read: impl FnOnce() -> io::Result<CrosstermEvent>,
) -> Step {
    match polled {
        Ok(false) => Step::Send(Event::Tick),
        Ok(true) => match read() {
            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => Step::Send(Event::Key(key)),
            Ok(CrosstermEvent::Resize(_, _)) => Step::Send(Event::Resize),
            Ok(_) => Step::Skip,
            Err(_) => Step::Stop,
        },
        Err(_) => Step::Stop,
    }
}

/// Reads terminal events on a background thread
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Create a handler that ticks every `tick_rate_ms` without input
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let event = match next_step(event::poll(tick_rate), event::read) {
                Step::Send(event) => event,
                Step::Skip => continue,
                Step::Stop => break,
            };

            // Receiver gone means the board closed
            if tx.send(event).is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
