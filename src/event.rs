use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

pub enum AppEvent {
    Key(KeyEvent),
    /// Bracketed paste, delivered as one string.
    Paste(String),
    Tick,
    Resize,
}

/// Reads terminal events on a background thread and forwards them over a channel.
/// A tick is sent whenever `tick_rate` passes without input.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let app_event = match event::poll(tick_rate) {
                    Ok(true) => match event::read() {
                        Ok(Event::Key(key)) => AppEvent::Key(key),
                        Ok(Event::Paste(text)) => AppEvent::Paste(text),
                        Ok(Event::Resize(..)) => AppEvent::Resize,
                        Ok(_) => continue,
                        Err(err) => {
                            tracing::error!(error = %err, "terminal read failed");
                            return;
                        }
                    },
                    Ok(false) => AppEvent::Tick,
                    Err(err) => {
                        tracing::error!(error = %err, "terminal poll failed");
                        return;
                    }
                };
                if tx.send(app_event).is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    /// Blocks until the next event. Fails once the reader thread has stopped.
    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
