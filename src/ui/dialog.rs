//! Shared dialog modal
//!
//! Draws a [`DialogView`] over whatever is on screen: the background is
//! dimmed, then a centered card shows the title, the description (if any),
//! one bordered box per input and the button row.

use crate::config::{colors, DialogSettings};
use crate::dialog::{DialogView, FieldView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::*,
    style::Modifier,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::helpers::{centered_rect, truncate, wrapped_height};

/// Rows taken by one bordered input box
const FIELD_HEIGHT: u16 = 3;

/// Render the mounted dialog on top of the current frame
pub fn render_dialog(f: &mut Frame, view: &DialogView, settings: &DialogSettings) {
    let screen = f.area();
    f.buffer_mut().set_style(
        screen,
        Style::default().fg(colors::DIM).add_modifier(Modifier::DIM),
    );

    let (width_percent, height_percent) = settings.card_percent();
    let card_width = percent_of(screen.width, width_percent);
    // Borders plus one row of margin on each side
    let inner_width = card_width.saturating_sub(4);

    let description_height = view
        .description
        .as_deref()
        .map_or(0, |d| wrapped_height(d, inner_width).saturating_add(1));
    let inputs_height = fields_height(view.fields.len());
    // Button row, one spacer row and the margin
    let needed = description_height
        .saturating_add(inputs_height)
        .saturating_add(2 + 4);
    let min_height = percent_of(screen.height, height_percent);
    let area = centered_rect(width_percent, needed.max(min_height), screen);

    let card = Block::default()
        .title(format!(" {} ", truncate(&view.title, usize::from(inner_width))))
        .title_style(
            Style::default()
                .fg(colors::HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HIGHLIGHT))
        .border_type(BorderType::Double)
        .style(Style::default().bg(colors::BG).fg(colors::FG));

    f.render_widget(Clear, area);
    f.render_widget(card, area);

    let mut constraints = Vec::with_capacity(view.fields.len() + 3);
    constraints.push(Constraint::Length(description_height));
    constraints.extend(view.fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(2)
        .split(area);

    if let Some(description) = &view.description {
        let paragraph = Paragraph::new(description.as_str())
            .style(Style::default().fg(colors::FG))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, chunks[0]);
    }

    for (i, field) in view.fields.iter().enumerate() {
        render_field(f, chunks[i + 1], field);
    }

    if let Some(button_area) = chunks.last() {
        render_buttons(f, *button_area, view.show_confirm);
    }
}

/// Rows needed for `count` input boxes, saturating at `u16::MAX`
fn fields_height(count: usize) -> u16 {
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    FIELD_HEIGHT.saturating_mul(count)
}

fn percent_of(total: u16, percent: u16) -> u16 {
    (u32::from(total) * u32::from(percent) / 100) as u16
}

fn render_field(f: &mut Frame, area: Rect, field: &FieldView) {
    let border_style = if field.focused {
        Style::default()
            .fg(colors::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::BORDER)
    };

    let (text, style) = if field.value.is_empty() && !field.focused {
        (
            field.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        let cursor = if field.focused { "▏" } else { "" };
        (
            format!("{}{}", field.value, cursor),
            Style::default().fg(colors::FG),
        )
    };

    let widget = Paragraph::new(text).style(style).block(
        Block::default()
            .title(format!(" {} ", field.label))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(widget, area);
}

fn render_buttons(f: &mut Frame, area: Rect, show_confirm: bool) {
    let mut spans = vec![Span::styled(
        " Cancel [Esc] ",
        Style::default().fg(colors::FG).bg(colors::BG_LIGHT),
    )];
    if show_confirm {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            " Confirm [Enter] ",
            Style::default()
                .fg(colors::BG)
                .bg(colors::CONFIRM)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let buttons = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    f.render_widget(buttons, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(view: &DialogView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| render_dialog(f, view, &DialogSettings::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn view(show_confirm: bool, description: Option<&str>, fields: Vec<FieldView>) -> DialogView {
        DialogView {
            title: "Rename".to_string(),
            description: description.map(String::from),
            fields,
            show_confirm,
        }
    }

    fn field(label: &str, value: &str, focused: bool) -> FieldView {
        FieldView {
            label: label.to_string(),
            placeholder: "type here".to_string(),
            value: value.to_string(),
            focused,
        }
    }

    #[test]
    fn test_confirm_button_only_with_callback() {
        let with = draw(&view(true, None, Vec::new()));
        assert!(with.contains("Cancel"));
        assert!(with.contains("Confirm"));

        let without = draw(&view(false, None, Vec::new()));
        assert!(without.contains("Cancel"));
        assert!(!without.contains("Confirm"));
    }

    #[test]
    fn test_title_description_and_fields_drawn() {
        let screen = draw(&view(
            true,
            Some("This cannot be undone."),
            vec![field("New name", "report2", true), field("Note", "", false)],
        ));
        assert!(screen.contains("Rename"));
        assert!(screen.contains("This cannot be undone."));
        assert!(screen.contains("New name"));
        assert!(screen.contains("report2"));
        // Unfocused empty field shows its placeholder
        assert!(screen.contains("type here"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        let v = view(true, Some("long description text"), vec![field("A", "", true)]);
        terminal
            .draw(|f| render_dialog(f, &v, &DialogSettings::default()))
            .unwrap();
    }

    #[test]
    fn test_fields_height_saturates() {
        assert_eq!(fields_height(0), 0);
        assert_eq!(fields_height(2), 6);
        // 70_000 would wrap to 4_464 as a u16
        assert_eq!(fields_height(70_000), u16::MAX);
        assert_eq!(fields_height(30_000), u16::MAX);
    }
}
