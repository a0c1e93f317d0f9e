use super::Event;
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Listen for keyboard input events with graceful shutdown support
pub async fn listen(tx: mpsc::Sender<Event>, cancel: CancellationToken) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!("Input listener cancelled");
                break;
            }
            () = tokio::time::sleep(Duration::from_millis(20)) => {
                // Drain everything queued so fast typing doesn't lag behind
                while event::poll(Duration::ZERO).unwrap_or(false) {
                    match event::read() {
                        // Windows reports releases too; dialogs only care about presses
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if tx.send(Event::Key(key)).await.is_err() {
                                return;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to read terminal event");
                            break;
                        }
                    }
                }
            }
        }
    }
}
