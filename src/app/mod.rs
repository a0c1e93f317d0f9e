//! Application state and logic
//!
//! This module contains the main `App` struct. Keyboard handling and the
//! dialog producers are in sub-modules.
//!
//! The app is the composition root of the dialog service: it creates the
//! one [`DialogController`], hands the close capability to its
//! [`DialogPresenter`], and gives producers a [`DialogHandle`] clone.

mod keyboard;
mod producers;

use crate::action::Action;
use crate::config::DialogSettings;
use crate::dialog::{DialogController, DialogHandle, DialogPresenter};
use crate::event::Event;
use crate::state::AppState;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long a footer status message stays visible
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Application state and logic
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    /// Dirty flag: true if UI needs re-render (render-on-change optimization)
    pub needs_render: bool,
    /// Status message to display in footer (message, timestamp)
    pub status_message: Option<(String, Instant)>,
    /// Dialog layout and policy settings
    pub dialog_settings: DialogSettings,
    /// Producer entry point for the shared dialog
    pub dialogs: DialogHandle,
    /// Presentation side of the shared dialog
    pub presenter: DialogPresenter,
    /// Confirm callbacks post here; unbounded so a confirm is never dropped
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(state: AppState, dialog_settings: DialogSettings) -> Self {
        let controller = DialogController::new(
            dialog_settings.merge_policy,
            dialog_settings.default_title.clone(),
        );
        let dialogs = controller.handle();
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        tracing::info!(
            policy = ?controller.policy(),
            "Dialog controller created"
        );

        Self {
            state,
            should_quit: false,
            needs_render: true, // Always render first frame
            status_message: None,
            dialog_settings,
            dialogs,
            presenter: DialogPresenter::new(controller),
            action_tx,
            action_rx,
        }
    }

    /// Show a status message in the footer (clears after 5 seconds)
    pub fn show_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
        self.needs_render = true;
    }

    /// Handle incoming events
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
        }
        self.needs_render = true;
        self.drain_actions();
        self.sync_dialog();
    }

    /// Apply everything confirm callbacks have posted so far
    fn drain_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.apply(action);
        }
    }

    /// Mount or unmount the dialog to match the controller
    fn sync_dialog(&mut self) {
        if self.presenter.sync() {
            self.needs_render = true;
        }
    }

    /// Apply an action posted by a dialog callback
    fn apply(&mut self, action: Action) {
        tracing::debug!(?action, "Applying action");
        match action {
            Action::Rename { id, title } => {
                if self.state.rename(id, &title) {
                    self.show_status(&format!("Renamed to \"{title}\""));
                } else {
                    self.show_status("Note no longer exists");
                }
            }
            Action::Create { title, body } => {
                let title = if title.trim().is_empty() {
                    "Untitled".to_string()
                } else {
                    title
                };
                if self.state.add(&title, &body).is_some() {
                    self.state.selected = self.state.notes.len() - 1;
                    self.show_status(&format!("Created \"{title}\""));
                } else {
                    self.show_status("Note list is full");
                }
            }
            Action::Delete { id } => {
                if self.state.remove(id) {
                    self.show_status("Note deleted");
                }
            }
        }
    }

    /// Tick for triggering re-renders
    pub fn tick(&mut self) {
        if self
            .status_message
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= STATUS_TTL)
        {
            self.status_message = None;
        }
        self.drain_actions();
        self.sync_dialog();
        self.needs_render = true;
    }

    /// Called after render to reset dirty flag
    pub fn rendered(&mut self) {
        self.needs_render = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app() -> App {
        App::new(AppState::with_samples(), DialogSettings::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(key(code));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_rename_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.presenter.is_shown());

        let view = app.presenter.view().unwrap();
        assert_eq!(view.title, "Rename");
        assert_eq!(view.fields.len(), 1);

        type_text(&mut app, "report2");
        press(&mut app, KeyCode::Enter);
        assert!(!app.presenter.is_shown());
        assert_eq!(app.state.notes[0].title, "report2");
    }

    #[test]
    fn test_rename_without_typing_changes_nothing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Enter);
        assert!(!app.presenter.is_shown());
        assert_eq!(app.state.notes[0].title, "Quarterly report");
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_confirm_applies_while_key_queue_is_full() {
        // A backlog of keys the main loop has not read yet
        let (event_tx, mut event_rx) = mpsc::channel(2);
        event_tx.try_send(key(KeyCode::Char('j'))).unwrap();
        event_tx.try_send(key(KeyCode::Char('j'))).unwrap();
        assert!(event_tx.try_send(key(KeyCode::Char('j'))).is_err());

        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "new");
        press(&mut app, KeyCode::Enter);

        assert!(!app.presenter.is_shown());
        assert_eq!(app.state.notes.len(), 4);
        assert_eq!(app.state.notes[3].title, "new");

        // The queued keys are still there for the loop to process
        let mut pending = 0;
        while event_rx.try_recv().is_ok() {
            pending += 1;
        }
        assert_eq!(pending, 2);
    }

    #[test]
    fn test_keys_go_to_dialog_while_shown() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "qj");
        assert!(!app.should_quit);
        assert_eq!(app.state.selected, 0);
        assert_eq!(app.presenter.view().unwrap().fields[0].value, "qj");
    }

    #[test]
    fn test_new_note_flow_collects_both_fields() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Trip");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Pack light");
        press(&mut app, KeyCode::Enter);

        let note = app.state.selected_note().unwrap();
        assert_eq!(note.title, "Trip");
        assert_eq!(note.body, "Pack light");
        assert_eq!(app.state.notes.len(), 4);
    }

    #[test]
    fn test_delete_flow_and_cancel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        let view = app.presenter.view().unwrap();
        assert!(view.fields.is_empty());
        assert!(view.description.is_some());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.notes.len(), 3);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.notes.len(), 2);
    }

    #[test]
    fn test_info_dialog_has_no_confirm() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        assert!(!app.presenter.view().unwrap().show_confirm);

        press(&mut app, KeyCode::Enter);
        assert!(app.presenter.is_shown());
        press(&mut app, KeyCode::Esc);
        assert!(!app.presenter.is_shown());
        assert_eq!(app.state.notes.len(), 3);
    }

    #[test]
    fn test_stale_values_do_not_reach_next_dialog() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        type_text(&mut app, "half typed");
        press(&mut app, KeyCode::Esc);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.presenter.view().unwrap().fields[0].value, "");
    }

    #[test]
    fn test_ctrl_c_quits_with_dialog_open() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit);
    }

    #[test]
    fn test_producers_without_selection_show_status() {
        let mut app = App::new(AppState::new(), DialogSettings::default());
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.presenter.is_shown());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_create_with_blank_title_uses_untitled() {
        let mut app = app();
        app.apply(Action::Create {
            title: "  ".to_string(),
            body: String::new(),
        });
        assert_eq!(app.state.notes.last().unwrap().title, "Untitled");
    }
}
