//! Keyboard event handling by input mode.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, InputMode};

use super::Action;

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    match app.input_mode {
        InputMode::Normal => handle_normal_mode(key),
        InputMode::Dropdown => handle_dropdown_mode(key),
    }
}

fn handle_normal_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => Action::NextField,
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => Action::PrevField,

        KeyCode::Enter | KeyCode::Char(' ') => Action::OpenDropdown,
        KeyCode::Backspace | KeyCode::Delete => Action::ClearField,

        _ => Action::None,
    }
}

fn handle_dropdown_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::CloseDropdown,

        KeyCode::Down | KeyCode::Char('j') => Action::DropdownNext,
        KeyCode::Up | KeyCode::Char('k') => Action::DropdownPrev,

        KeyCode::Enter => Action::ChooseHighlighted,
        KeyCode::Char('r') => Action::RefreshDropdown,
        KeyCode::Char('x') => Action::InjectFailure,

        _ => Action::None,
    }
}
