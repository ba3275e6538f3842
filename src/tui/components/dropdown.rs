//! Dropdown component: the selectable list for the focused field.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::loader::ListEntry;
use crate::tui::theme::*;

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Render the open dropdown for the active field.
pub fn render_dropdown(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = vec![];

    if let Some(dropdown) = &app.dropdown {
        let selection = app.form.value(app.active_field);
        let items = dropdown.loader.items();

        // Header: field title and the current selection. The selection label
        // falls back to the raw id until its item's page has loaded.
        let mut header = vec![Span::styled(
            format!("Pick {}", app.active_field.title().to_lowercase()),
            Style::new().fg(ACCENT_BLUE).bold(),
        )];
        if let Some(label) = selection.display_label(items) {
            header.push(Span::raw("  current: "));
            header.push(Span::styled(label.to_string(), Style::new().fg(ACCENT_GOLD)));
        }
        lines.push(Line::from(header));
        lines.push(Line::raw("")); // spacing

        // Rows inside the scroll window
        for (i, item) in items
            .iter()
            .enumerate()
            .skip(dropdown.offset)
            .take(dropdown.visible_rows)
        {
            let is_highlighted = i == dropdown.highlighted;
            let cursor = if is_highlighted { "> " } else { "  " };
            let mark = if selection.matches(item) { " ✓" } else { "" };

            lines.push(Line::from(vec![
                Span::raw(cursor),
                Span::styled(
                    item.label().to_string(),
                    if is_highlighted {
                        Style::new().fg(TEXT_WHITE).bold()
                    } else {
                        Style::new().fg(TEXT_WHITE)
                    },
                ),
                Span::styled(mark, Style::new().fg(ACCENT_MINT)),
            ]));
        }

        if items.is_empty() && !dropdown.loader.is_loading() {
            lines.push(Line::styled(
                "  (nothing to pick)",
                Style::new().fg(TEXT_DIM),
            ));
        }

        // Trailing status row: spinner while loading, retry hint on failure
        if dropdown.loader.is_loading() {
            let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{} loading more...", spinner),
                    Style::new().fg(TEXT_DIM),
                ),
            ]));
        } else if dropdown.loader.last_error().is_some() {
            lines.push(Line::styled(
                "  couldn't load more (press r to retry)",
                Style::new().fg(ACCENT_CORAL),
            ));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::new().fg(TEXT_WHITE));

    frame.render_widget(paragraph, area);
}
