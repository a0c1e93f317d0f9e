//! Dialog presenter
//!
//! Turns the controller's active config into a [`DialogView`] and owns the
//! [`FieldValues`] of the dialog currently on screen.
//!
//! Two states: Hidden (nothing mounted) and Shown (mounted with its own
//! field values). `sync()` runs once per render pass and mounts a fresh
//! dialog whenever the controller became visible, so values typed into a
//! previous dialog never leak into the next one.

use super::{DialogConfig, DialogController, FieldValues, MergePolicy};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Per-showing state, dropped on unmount
#[derive(Debug, Default)]
struct Mounted {
    values: FieldValues,
    focused: usize,
}

/// One labeled input as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub focused: bool,
}

/// Everything the renderer needs to draw the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
    /// `None` when the config's description is empty
    pub description: Option<String>,
    pub fields: Vec<FieldView>,
    pub show_confirm: bool,
}

/// Presentation side of the dialog service
pub struct DialogPresenter {
    controller: DialogController,
    mounted: Option<Mounted>,
}

impl DialogPresenter {
    pub fn new(controller: DialogController) -> Self {
        Self {
            controller,
            mounted: None,
        }
    }

    pub fn policy(&self) -> MergePolicy {
        self.controller.policy()
    }

    /// Whether the controller currently wants a dialog on screen
    ///
    /// Differs from [`Self::is_shown`] between an `open` and the next `sync`.
    pub fn is_visible(&self) -> bool {
        self.controller.is_visible()
    }

    pub fn is_shown(&self) -> bool {
        self.mounted.is_some()
    }

    /// Reconcile with the controller before rendering
    ///
    /// Returns true if the presenter changed state.
    pub fn sync(&mut self) -> bool {
        match (self.controller.is_visible(), self.mounted.is_some()) {
            (true, false) => {
                self.mounted = Some(Mounted::default());
                tracing::debug!("Dialog presenter mounted");
                true
            }
            (false, true) => {
                self.mounted = None;
                tracing::debug!("Dialog presenter unmounted");
                true
            }
            (true, true) => {
                // A producer may have swapped inputs while we were showing
                let config = self.controller.active_config();
                if let (Some(config), Some(mounted)) = (config, self.mounted.as_mut()) {
                    Self::reconcile(&config, mounted);
                }
                false
            }
            (false, false) => false,
        }
    }

    /// Drop values for inputs the config no longer has and clamp focus
    fn reconcile(config: &DialogConfig, mounted: &mut Mounted) {
        let before = mounted.values.len();
        mounted
            .values
            .retain(|name| config.inputs().iter().any(|i| i.name() == name));
        if mounted.values.len() != before {
            tracing::debug!(
                dropped = before - mounted.values.len(),
                "Dropped values for inputs no longer shown"
            );
        }
        mounted.focused = mounted
            .focused
            .min(config.inputs().len().saturating_sub(1));
    }

    /// Store the full text of one input after a keystroke
    pub fn set_field(&mut self, name: &str, text: impl Into<String>) {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        let known = self
            .controller
            .active_config()
            .is_some_and(|c| c.inputs().iter().any(|i| i.name() == name));
        if !known {
            tracing::debug!(name, "Ignored edit for unknown dialog input");
            return;
        }
        mounted.values.set(name, text);
    }

    /// Close without invoking the callback
    pub fn cancel(&mut self) {
        if self.mounted.take().is_none() {
            return;
        }
        tracing::debug!("Dialog cancelled");
        self.controller.close();
    }

    /// Invoke the callback with the entered values, then close
    ///
    /// Returns false (and does nothing) when no confirm control is shown.
    pub fn confirm(&mut self) -> bool {
        if self.mounted.is_none() {
            return false;
        }
        let Some(config) = self.controller.active_config() else {
            return false;
        };
        let Some(callback) = config.on_confirm().cloned() else {
            return false;
        };
        let Some(mut mounted) = self.mounted.take() else {
            return false;
        };
        // An open since the last sync may have changed the inputs
        Self::reconcile(&config, &mut mounted);

        tracing::debug!(
            fields = mounted.values.len(),
            untouched = mounted.values.is_empty(),
            "Dialog confirmed"
        );
        tracing::trace!(
            values = %serde_json::to_string(&mounted.values).unwrap_or_default(),
            "Confirmed field values"
        );
        callback.call(&mounted.values);
        self.controller.close();
        true
    }

    /// Route a key press to the mounted dialog
    ///
    /// Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        let Some(config) = self.controller.active_config() else {
            return false;
        };
        let Some(mounted) = self.mounted.as_mut() else {
            return false;
        };
        let count = config.inputs().len();

        match key.code {
            KeyCode::Esc => self.cancel(),
            KeyCode::Enter => {
                self.confirm();
            }
            KeyCode::Tab | KeyCode::Down if count > 0 => {
                mounted.focused = (mounted.focused + 1) % count;
            }
            KeyCode::BackTab | KeyCode::Up if count > 0 => {
                mounted.focused = (mounted.focused + count - 1) % count;
            }
            KeyCode::Backspace => {
                if let Some((name, mut text)) = Self::focused_text(&config, mounted) {
                    text.pop();
                    self.set_field(&name, text);
                }
            }
            KeyCode::Char(c) => {
                if let Some((name, mut text)) = Self::focused_text(&config, mounted) {
                    text.push(c);
                    self.set_field(&name, text);
                }
            }
            _ => {}
        }
        true
    }

    fn focused_text(config: &DialogConfig, mounted: &Mounted) -> Option<(String, String)> {
        let input = config.inputs().get(mounted.focused)?;
        let text = mounted.values.get(input.name()).unwrap_or_default();
        Some((input.name().to_string(), text.to_string()))
    }

    /// Render model for the mounted dialog
    pub fn view(&self) -> Option<DialogView> {
        let mounted = self.mounted.as_ref()?;
        let config = self.controller.active_config()?;

        let fields = config
            .inputs()
            .iter()
            .enumerate()
            .map(|(i, input)| FieldView {
                label: input.label().to_string(),
                placeholder: input.placeholder().unwrap_or_default().to_string(),
                value: mounted
                    .values
                    .get(input.name())
                    .unwrap_or_default()
                    .to_string(),
                focused: i == mounted.focused,
            })
            .collect();

        Some(DialogView {
            title: config.title().to_string(),
            description: (!config.description().is_empty())
                .then(|| config.description().to_string()),
            fields,
            show_confirm: config.has_confirm(),
        })
    }
}
