//! Dialog controller and producer handle
//!
//! The controller is created once at startup and owns the only
//! [`DialogVisibilityState`]. Producers get a cloneable [`DialogHandle`]
//! that can only `open`; the close capability stays with whoever holds the
//! controller itself (the presenter).
//!
//! Everything runs on the UI event loop thread, so the state lives in an
//! `Rc<RefCell<..>>` and no borrow is held across a call into user code.

use super::{DialogConfig, DialogPatch, DialogVisibilityState, MergePolicy};
use std::cell::RefCell;
use std::rc::Rc;

struct Shared {
    state: RefCell<DialogVisibilityState>,
    policy: MergePolicy,
    default_title: String,
}

impl Shared {
    fn open(&self, patch: DialogPatch) {
        let mut state = self.state.borrow_mut();
        let base = match self.policy {
            MergePolicy::Reset => DialogConfig::inert(self.default_title.clone()),
            MergePolicy::Merge => state.config.clone(),
        };
        state.config = patch.apply_to(base);
        let was_visible = std::mem::replace(&mut state.visible, true);

        tracing::debug!(
            title = state.config.title(),
            inputs = state.config.inputs().len(),
            has_confirm = state.config.has_confirm(),
            policy = ?self.policy,
            replaced_visible = was_visible,
            "Dialog opened"
        );
    }
}

/// Owner of the shared dialog state
pub struct DialogController {
    shared: Rc<Shared>,
}

impl DialogController {
    pub fn new(policy: MergePolicy, default_title: impl Into<String>) -> Self {
        let default_title = default_title.into();
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(DialogVisibilityState::new(default_title.clone())),
                policy,
                default_title,
            }),
        }
    }

    /// Producer-facing handle; all clones share this controller's state
    pub fn handle(&self) -> DialogHandle {
        DialogHandle {
            shared: Rc::clone(&self.shared),
        }
    }

    pub fn policy(&self) -> MergePolicy {
        self.shared.policy
    }

    pub fn is_visible(&self) -> bool {
        self.shared.state.borrow().visible
    }

    /// Active config, or `None` while hidden
    ///
    /// A hidden dialog may still carry its last config; it is never handed out.
    pub fn active_config(&self) -> Option<DialogConfig> {
        let state = self.shared.state.borrow();
        state.visible.then(|| state.config.clone())
    }

    /// Copy of the raw shared state, stale config included
    #[cfg(test)]
    pub fn snapshot(&self) -> DialogVisibilityState {
        self.shared.state.borrow().clone()
    }

    /// Hide the dialog, keeping its config until the next open
    pub fn close(&self) {
        let mut state = self.shared.state.borrow_mut();
        if !state.visible {
            tracing::trace!("Close on hidden dialog ignored");
            return;
        }
        state.visible = false;
        tracing::debug!(title = state.config.title(), "Dialog closed");
    }
}

/// Cloneable entry point through which producers open dialogs
#[derive(Clone)]
pub struct DialogHandle {
    shared: Rc<Shared>,
}

impl DialogHandle {
    /// Show a dialog described by `patch`
    ///
    /// Fields missing from `patch` come from the inert default config or the
    /// previous config, depending on the controller's [`MergePolicy`].
    pub fn open(&self, patch: DialogPatch) {
        self.shared.open(patch);
    }
}
