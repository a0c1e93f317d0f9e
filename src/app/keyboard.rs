//! Keyboard input handling

use super::{producers, App};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Handle Ctrl+C always
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // An open dialog owns the keyboard
        if self.presenter.is_shown() {
            self.presenter.handle_key(key);
            return;
        }

        self.handle_key_normal(key);
    }

    /// Handle keyboard input with no dialog showing
    fn handle_key_normal(&mut self, key: KeyEvent) {
        let tx = self.action_tx.clone();
        let result = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Ok(())
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select_next();
                Ok(())
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select_previous();
                Ok(())
            }
            KeyCode::Char('?') => producers::open_help(&self.dialogs),
            KeyCode::Char('n') => producers::open_new_note(&self.dialogs, tx),
            KeyCode::Char('r') | KeyCode::Char('d') | KeyCode::Char('i') | KeyCode::Enter => {
                let Some(note) = self.state.selected_note() else {
                    self.show_status("No note selected");
                    return;
                };
                match key.code {
                    KeyCode::Char('r') => producers::open_rename(&self.dialogs, note, tx),
                    KeyCode::Char('d') => producers::open_delete(&self.dialogs, note, tx),
                    _ => producers::open_info(&self.dialogs, note),
                }
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            tracing::error!(error = %e, "Failed to open dialog");
            self.show_status(&format!("Dialog error: {e}"));
        }
    }
}
