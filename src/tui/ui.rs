//! Top-level layout: title, the four form fields, the dropdown, hotkeys.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, FieldKind, InputMode};

use super::components::render_dropdown;
use super::theme::*;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_layout = Layout::vertical([
        Constraint::Length(2),                        // Title + spacing
        Constraint::Length(FieldKind::ALL.len() as u16 + 1), // Form fields
        Constraint::Min(0),                           // Dropdown
        Constraint::Length(1),                        // Hotkeys
    ])
    .split(area);

    render_title(frame, main_layout[0]);
    render_form(frame, main_layout[1], app);

    if app.input_mode == InputMode::Dropdown {
        render_dropdown(frame, main_layout[2], app);
    }

    render_hotkeys(frame, main_layout[3], app);
}

fn render_title(frame: &mut Frame, area: ratatui::layout::Rect) {
    let line = Line::from(vec![
        Span::styled("lazypick", Style::new().fg(ACCENT_BLUE).bold()),
        Span::styled("  new service request", Style::new().fg(TEXT_DIM)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_form(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let mut lines: Vec<Line> = vec![];

    for field in FieldKind::ALL {
        let is_active = field == app.active_field && app.input_mode == InputMode::Normal;
        let cursor = if is_active { "> " } else { "  " };

        // A closed field only has the raw id to show; the label lives in the
        // dropdown's accumulated items while it is open.
        let value_text = app
            .form
            .value(field)
            .id()
            .map(str::to_string)
            .unwrap_or_else(|| "(none)".to_string());

        lines.push(Line::from(vec![
            Span::raw(cursor),
            Span::styled(
                format!("{:<18}", field.title()),
                if is_active {
                    Style::new().fg(TEXT_WHITE).bold()
                } else {
                    Style::new().fg(TEXT_WHITE)
                },
            ),
            Span::styled(
                value_text,
                if app.form.value(field).is_none() {
                    Style::new().fg(TEXT_DIM)
                } else {
                    Style::new().fg(ACCENT_GOLD)
                },
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_hotkeys(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let hint = match app.input_mode {
        InputMode::Normal => "↑/↓ field  enter open  backspace clear  q quit",
        InputMode::Dropdown => "↑/↓ move  enter choose  r refresh  x fail next fetch  esc close",
    };
    frame.render_widget(
        Paragraph::new(Line::styled(hint, Style::new().fg(TEXT_DIM))),
        area,
    );
}
