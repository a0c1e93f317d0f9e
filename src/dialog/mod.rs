//! Shared dialog service
//!
//! Any part of the application can request a modal dialog by handing a
//! [`DialogPatch`] to a [`DialogHandle`]. The [`DialogController`] owns the one
//! [`DialogVisibilityState`] and the [`DialogPresenter`] turns it into UI,
//! collecting per-field text until the user confirms or cancels.
//!
//! # Flow
//!
//! 1. A producer calls [`DialogHandle::open`]
//! 2. The controller folds the patch into the active config and sets `visible`
//! 3. On the next render pass the presenter mounts with empty [`FieldValues`]
//! 4. Keystrokes update the presenter's field values only
//! 5. Confirm forwards the values to the config's callback, then closes;
//!    cancel just closes

pub mod controller;
pub mod presenter;

pub use controller::{DialogController, DialogHandle};
pub use presenter::{DialogPresenter, DialogView, FieldView};

use crate::errors::{DialogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::rc::Rc;

/// Title used by the inert startup config
pub const DEFAULT_TITLE: &str = "Dialog";

/// Values typed into a dialog's inputs, keyed by input name
///
/// Only inputs the user actually edited have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, String>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text entered for `name`, if the field was edited
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Replace the value stored for `name`
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep only the entries whose name passes `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|name, _| keep(name));
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A labeled text input inside a dialog
///
/// `name` is the key the input's value is stored under and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    name: String,
    label: String,
    placeholder: Option<String>,
}

impl InputSpec {
    /// Create an input, rejecting empty or whitespace-only names
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let label = label.into();
        if name.trim().is_empty() {
            tracing::warn!(label = %label, "Rejected input spec without a name");
            return Err(DialogError::EmptyInputName { label });
        }
        Ok(Self {
            name,
            label,
            placeholder: None,
        })
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }
}

/// Callback invoked with the collected field values when the user confirms
#[derive(Clone)]
pub struct ConfirmCallback(Rc<dyn Fn(&FieldValues)>);

impl ConfirmCallback {
    pub fn new(f: impl Fn(&FieldValues) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, values: &FieldValues) {
        (self.0)(values);
    }

    /// True if both handles point at the same closure
    #[cfg(test)]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ConfirmCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfirmCallback(..)")
    }
}

/// Full description of one dialog
#[derive(Debug, Clone)]
pub struct DialogConfig {
    title: String,
    description: String,
    inputs: Vec<InputSpec>,
    on_confirm: Option<ConfirmCallback>,
}

impl DialogConfig {
    /// Inert config: given title, nothing else
    pub fn inert(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            inputs: Vec::new(),
            on_confirm: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    pub fn on_confirm(&self) -> Option<&ConfirmCallback> {
        self.on_confirm.as_ref()
    }

    /// Whether a confirm control should be offered
    pub fn has_confirm(&self) -> bool {
        self.on_confirm.is_some()
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self::inert(DEFAULT_TITLE)
    }
}

/// Partial dialog config handed to [`DialogHandle::open`]
///
/// Fields left unset keep their base value (see [`MergePolicy`]). The
/// callback has three states: set, explicitly cleared, or untouched.
#[derive(Debug, Clone, Default)]
pub struct DialogPatch {
    title: Option<String>,
    description: Option<String>,
    inputs: Option<Vec<InputSpec>>,
    on_confirm: Option<Option<ConfirmCallback>>,
}

impl DialogPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the dialog's inputs, rejecting duplicate names
    pub fn inputs(mut self, inputs: Vec<InputSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for input in &inputs {
            if !seen.insert(input.name()) {
                tracing::warn!(name = input.name(), "Rejected dialog with duplicate input name");
                return Err(DialogError::DuplicateInputName(input.name().to_string()));
            }
        }
        self.inputs = Some(inputs);
        Ok(self)
    }

    #[must_use]
    pub fn on_confirm(mut self, f: impl Fn(&FieldValues) + 'static) -> Self {
        self.on_confirm = Some(Some(ConfirmCallback::new(f)));
        self
    }

    /// Remove any callback from the base config
    #[must_use]
    pub fn without_confirm(mut self) -> Self {
        self.on_confirm = Some(None);
        self
    }

    /// Shallow-merge this patch over `base`
    pub fn apply_to(self, base: DialogConfig) -> DialogConfig {
        DialogConfig {
            title: self.title.unwrap_or(base.title),
            description: self.description.unwrap_or(base.description),
            inputs: self.inputs.unwrap_or(base.inputs),
            on_confirm: self.on_confirm.unwrap_or(base.on_confirm),
        }
    }
}

/// What a new config is merged over when a dialog opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Start from the inert default config on every open
    #[default]
    Reset,
    /// Start from whatever config the previous open left behind
    Merge,
}

/// The single shared dialog state
#[derive(Debug, Clone)]
pub struct DialogVisibilityState {
    pub visible: bool,
    pub config: DialogConfig,
}

impl DialogVisibilityState {
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            visible: false,
            config: DialogConfig::inert(default_title),
        }
    }
}
