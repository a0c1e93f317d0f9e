//! Dialog producers
//!
//! Each function describes one dialog and hands it to the shared
//! [`DialogHandle`]. Every producer sets all four fields so the dialogs
//! look the same under either merge policy.

use crate::action::Action;
use crate::dialog::{DialogHandle, DialogPatch, FieldValues, InputSpec};
use crate::errors::Result;
use crate::state::Note;
use tokio::sync::mpsc;

/// Build a closure that posts actions back to the app
fn poster(tx: mpsc::UnboundedSender<Action>) -> impl Fn(Action) + 'static {
    move |action| {
        if let Err(e) = tx.send(action) {
            tracing::error!(action = ?e.0, "App is gone, dropping dialog action");
        }
    }
}

/// Trimmed value of `name`, if the user typed anything
fn entered(values: &FieldValues, name: &str) -> Option<String> {
    values
        .get(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

pub fn open_rename(
    dialogs: &DialogHandle,
    note: &Note,
    tx: mpsc::UnboundedSender<Action>,
) -> Result<()> {
    let id = note.id;
    let post = poster(tx);
    let patch = DialogPatch::new()
        .title("Rename")
        .description(format!("Current name: {}", note.title))
        .inputs(vec![
            InputSpec::new("newName", "New name")?.with_placeholder(note.title.clone())
        ])?
        .on_confirm(move |values| {
            if let Some(title) = entered(values, "newName") {
                post(Action::Rename { id, title });
            }
        });
    dialogs.open(patch);
    Ok(())
}

pub fn open_new_note(dialogs: &DialogHandle, tx: mpsc::UnboundedSender<Action>) -> Result<()> {
    let post = poster(tx);
    let patch = DialogPatch::new()
        .title("New note")
        .description("")
        .inputs(vec![
            InputSpec::new("title", "Title")?.with_placeholder("e.g. Groceries"),
            InputSpec::new("body", "Body")?.with_placeholder("optional"),
        ])?
        .on_confirm(move |values| {
            post(Action::Create {
                title: entered(values, "title").unwrap_or_default(),
                body: values.get("body").unwrap_or_default().to_string(),
            });
        });
    dialogs.open(patch);
    Ok(())
}

pub fn open_delete(
    dialogs: &DialogHandle,
    note: &Note,
    tx: mpsc::UnboundedSender<Action>,
) -> Result<()> {
    let id = note.id;
    let post = poster(tx);
    let patch = DialogPatch::new()
        .title("Delete?")
        .description(format!(
            "\"{}\" will be removed. This cannot be undone.",
            note.title
        ))
        .inputs(Vec::new())?
        .on_confirm(move |_| post(Action::Delete { id }));
    dialogs.open(patch);
    Ok(())
}

/// Read-only dialog: cancel is the only way out
pub fn open_info(dialogs: &DialogHandle, note: &Note) -> Result<()> {
    let body = if note.body.is_empty() {
        "(empty)"
    } else {
        note.body.as_str()
    };
    let patch = DialogPatch::new()
        .title(note.title.clone())
        .description(format!("Created {}\n\n{}", note.created_display(), body))
        .inputs(Vec::new())?
        .without_confirm();
    dialogs.open(patch);
    Ok(())
}

pub fn open_help(dialogs: &DialogHandle) -> Result<()> {
    let patch = DialogPatch::new()
        .title("Keys")
        .description(
            "j/k  move      n  new note\n\
             r    rename    d  delete\n\
             i    details   q  quit\n\n\
             In a dialog: Tab next field, Enter confirm, Esc cancel",
        )
        .inputs(Vec::new())?
        .without_confirm();
    dialogs.open(patch);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{DialogController, MergePolicy, DEFAULT_TITLE};

    #[test]
    fn test_entered_trims_and_skips_blank() {
        let values: FieldValues = [("a", "  x "), ("b", "   ")].into_iter().collect();
        assert_eq!(entered(&values, "a").as_deref(), Some("x"));
        assert_eq!(entered(&values, "b"), None);
        assert_eq!(entered(&values, "missing"), None);
    }

    #[test]
    fn test_producers_clear_stale_fields_under_merge_policy() {
        let controller = DialogController::new(MergePolicy::Merge, DEFAULT_TITLE);
        let dialogs = controller.handle();
        let note = Note::new(7, "Plans", "");
        let (tx, _rx) = mpsc::unbounded_channel();

        open_rename(&dialogs, &note, tx).unwrap();
        open_info(&dialogs, &note).unwrap();

        let config = controller.active_config().unwrap();
        assert_eq!(config.title(), "Plans");
        assert!(config.inputs().is_empty());
        assert!(!config.has_confirm());
    }

    #[test]
    fn test_delete_confirm_posts_action() {
        let controller = DialogController::new(MergePolicy::Reset, DEFAULT_TITLE);
        let note = Note::new(3, "Old", "");
        let (tx, mut rx) = mpsc::unbounded_channel();
        open_delete(&controller.handle(), &note, tx).unwrap();

        let config = controller.active_config().unwrap();
        config.on_confirm().unwrap().call(&FieldValues::new());
        assert_eq!(rx.try_recv().unwrap(), Action::Delete { id: 3 });
    }

    #[test]
    fn test_confirm_after_app_dropped_is_harmless() {
        let controller = DialogController::new(MergePolicy::Reset, DEFAULT_TITLE);
        let note = Note::new(1, "Doomed", "");
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        open_delete(&controller.handle(), &note, tx).unwrap();

        let config = controller.active_config().unwrap();
        config.on_confirm().unwrap().call(&FieldValues::new());
    }
}
