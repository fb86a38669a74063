//! Terminal event pump.
//!
//! Key presses and resizes come from crossterm's async stream; Tick and
//! Render are produced locally, so toast expiry, throbber animation, and
//! redraws all arrive on the same channel as user input.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Cadence for toast expiry and throbber animation (4 Hz).
const TICK_INTERVAL: Duration = Duration::from_millis(250);
/// Redraw cadence (~30 FPS).
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    Render,
}

/// Merges terminal input with the tick and render timers in a background
/// task. Dropping the pump stops the task.
pub struct EventPump {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventPump {
    pub fn start() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(tx, cancel.clone()));
        Self { rx, cancel }
    }

    /// Receive the next event. Returns `None` once the pump has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventPump {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump(tx: mpsc::UnboundedSender<Event>, cancel: CancellationToken) {
    let mut input = EventStream::new();
    let mut ticks = tokio::time::interval(TICK_INTERVAL);
    let mut frames = tokio::time::interval(RENDER_INTERVAL);

    // Don't burst ticks if we fall behind
    ticks.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,

            _ = ticks.tick() => Event::Tick,

            _ = frames.tick() => Event::Render,

            Some(Ok(raw)) = input.next() => match translate(raw) {
                Some(event) => event,
                None => continue,
            },
        };

        // If the receiver is dropped, stop.
        if tx.send(event).is_err() {
            break;
        }
    }
}

/// Key presses and resizes are the only terminal input this UI reacts to;
/// key release/repeat, mouse, focus, and paste events are dropped here.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn key_press_and_resize_pass_through() {
        let press = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(
            translate(CrosstermEvent::Key(press)),
            Some(Event::Key(_))
        ));
        assert!(matches!(
            translate(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        ));
    }

    #[test]
    fn key_release_and_focus_are_dropped() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert!(translate(CrosstermEvent::Key(release)).is_none());
        assert!(translate(CrosstermEvent::FocusGained).is_none());
    }
}
