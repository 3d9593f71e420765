use crossterm::event::KeyCode;

use crate::view::Layer;

/// What a key press means to the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Select,
    ClearSelection,
    ToggleLayer(Layer),
    Export,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    EndSearch,
}

/// Translate a key. While searching, printable keys go to the query.
pub fn map_key(key: KeyCode, searching: bool) -> Option<KeyAction> {
    if searching {
        return match key {
            KeyCode::Esc | KeyCode::Enter => Some(KeyAction::EndSearch),
            KeyCode::Backspace => Some(KeyAction::SearchBackspace),
            KeyCode::Up => Some(KeyAction::MoveUp),
            KeyCode::Down => Some(KeyAction::MoveDown),
            KeyCode::Char(c) => Some(KeyAction::SearchInput(c)),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(KeyAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(KeyAction::MoveDown),
        KeyCode::PageUp => Some(KeyAction::PageUp),
        KeyCode::PageDown => Some(KeyAction::PageDown),
        KeyCode::Enter => Some(KeyAction::Select),
        KeyCode::Esc => Some(KeyAction::ClearSelection),
        KeyCode::Char('1') => Some(KeyAction::ToggleLayer(Layer::StormTrack)),
        KeyCode::Char('2') => Some(KeyAction::ToggleLayer(Layer::HealthFacilities)),
        KeyCode::Char('3') => Some(KeyAction::ToggleLayer(Layer::EducationFacilities)),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(KeyAction::Export),
        KeyCode::Char('/') => Some(KeyAction::StartSearch),
        _ => None,
    }
}
