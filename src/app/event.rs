//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the frame loop never blocks on input.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal lost focus; the pointer is gone as far as we can tell.
    FocusLost,
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        // Poll with a timeout so a dropped receiver is noticed even when
        // the terminal is idle.
        let has_event = event::poll(poll_interval).unwrap_or(false);
        if !has_event {
            if tx.is_closed() {
                break;
            }
            continue;
        }
        let Ok(ev) = event::read() else {
            continue;
        };
        let app_event = match ev {
            CtEvent::Key(k) => AppEvent::Key(k),
            CtEvent::Mouse(m) => AppEvent::Mouse(m),
            CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
            CtEvent::FocusLost => AppEvent::FocusLost,
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
