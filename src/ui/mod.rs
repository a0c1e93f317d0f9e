//! UI rendering module for modal-relay
//!
//! The host screen is a header, a list of notes and a footer. The shared
//! dialog, when mounted, is drawn last so it sits on top of everything.

mod dialog;
mod helpers;

use crate::app::App;
use crate::config::colors;
use dialog::render_dialog;
use helpers::truncate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Main render function
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Notes
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_notes(f, chunks[1], app);
    render_footer(f, chunks[2], app);

    if let Some(view) = app.presenter.view() {
        render_dialog(f, &view, &app.dialog_settings);
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let policy = match app.presenter.policy() {
        crate::dialog::MergePolicy::Reset => "reset",
        crate::dialog::MergePolicy::Merge => "merge",
    };
    let title = format!(
        "modal-relay ({} notes) [dialogs: {}]",
        app.state.notes.len(),
        policy
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(colors::FG).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER))
                .border_type(BorderType::Rounded),
        );
    f.render_widget(header, area);
}

fn render_notes(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Notes ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BORDER))
        .border_type(BorderType::Rounded);

    if app.state.notes.is_empty() {
        let empty = Paragraph::new("No notes. Press n to create one.")
            .style(Style::default().fg(colors::DIM))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let title_width = usize::from(area.width.saturating_sub(14));
    let items: Vec<ListItem> = app
        .state
        .notes
        .iter()
        .enumerate()
        .map(|(i, note)| {
            let selected = i == app.state.selected;
            let style = if selected {
                Style::default()
                    .fg(colors::HIGHLIGHT)
                    .bg(colors::BG_LIGHT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::FG)
            };
            let marker = if selected { "▶ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(truncate(&note.title, title_width), style),
                Span::styled(
                    format!("  {}", note.created_display()),
                    Style::default().fg(colors::DIM),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer = if let Some((msg, _)) = &app.status_message {
        Paragraph::new(msg.as_str()).style(Style::default().fg(colors::DANGER))
    } else {
        Paragraph::new("j/k:move  n:new  r:rename  d:delete  i:details  ?:help  q:quit")
            .style(Style::default().fg(colors::DIM))
    };
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialogSettings;
    use crate::dialog::DialogPatch;
    use crate::state::AppState;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_host_screen_lists_notes() {
        let app = App::new(AppState::with_samples(), DialogSettings::default());
        let text = screen(&app);
        assert!(text.contains("Quarterly report"));
        assert!(text.contains("Groceries"));
        assert!(!text.contains("Cancel"));
    }

    #[test]
    fn test_dialog_drawn_only_after_mount() {
        let mut app = App::new(AppState::new(), DialogSettings::default());
        app.dialogs
            .open(DialogPatch::new().title("Delete?").description("Gone for good."));
        // Not mounted until the next sync
        assert!(!screen(&app).contains("Gone for good."));

        app.tick();
        let text = screen(&app);
        assert!(text.contains("Delete?"));
        assert!(text.contains("Gone for good."));
        assert!(text.contains("Cancel"));
        assert!(!text.contains("Confirm"));
    }
}
