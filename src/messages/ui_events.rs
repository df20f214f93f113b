//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::FormField;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Newline,
    Backspace,
    CursorLeft,
    CursorRight,

    // Request actions
    SendRequest,
    CycleMethod,

    // Output and history
    CopyOutput,
    CopyHistory,
    RecallHistory,

    // Popups and notices
    ToggleHelp,
    CloseHelp,
    DismissNotice,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Url,
    Authorization,
    Header,
    Body,
    Output,
    History,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Authorization,
            Panel::Authorization => Panel::Header,
            Panel::Header => Panel::Body,
            Panel::Body => Panel::Output,
            Panel::Output => Panel::History,
            Panel::History => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::History,
            Panel::Authorization => Panel::Url,
            Panel::Header => Panel::Authorization,
            Panel::Body => Panel::Header,
            Panel::Output => Panel::Body,
            Panel::History => Panel::Output,
        }
    }

    /// The form field edited in this panel, if any
    pub fn field(&self) -> Option<FormField> {
        match self {
            Panel::Url => Some(FormField::Url),
            Panel::Authorization => Some(FormField::Authorization),
            Panel::Header => Some(FormField::Header),
            Panel::Body => Some(FormField::Body),
            Panel::Output | Panel::History => None,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Esc => Some(UiEvent::DismissNotice),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::History => Some(UiEvent::RecallHistory),
                Panel::Output => None,
                _ => Some(UiEvent::StartEditing),
            },
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Char('y') => match active_panel {
                Panel::History => Some(UiEvent::CopyHistory),
                _ => Some(UiEvent::CopyOutput),
            },
            KeyCode::Char('r') if active_panel == Panel::History => Some(UiEvent::RecallHistory),
            KeyCode::Up => match active_panel {
                Panel::Output | Panel::History => Some(UiEvent::ScrollUp),
                _ => None,
            },
            KeyCode::Down => match active_panel {
                Panel::Output | Panel::History => Some(UiEvent::ScrollDown),
                _ => None,
            },
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::Enter => match active_panel.field() {
                Some(field) if field.is_multiline() => Some(UiEvent::Newline),
                Some(FormField::Url) => Some(UiEvent::SendRequest),
                _ => Some(UiEvent::StopEditing),
            },
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_panel_cycle_is_closed() {
        let mut panel = Panel::Url;
        for _ in 0..6 {
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Url);
        assert_eq!(Panel::Url.prev().next(), Panel::Url);
    }

    #[test]
    fn test_enter_inserts_newline_in_json_editors() {
        let ev = key_to_ui_event(press(KeyCode::Enter), Panel::Header, InputMode::Editing, false);
        assert_eq!(ev, Some(UiEvent::Newline));
        let ev = key_to_ui_event(press(KeyCode::Enter), Panel::Url, InputMode::Editing, false);
        assert_eq!(ev, Some(UiEvent::SendRequest));
        let ev = key_to_ui_event(press(KeyCode::Enter), Panel::Authorization, InputMode::Editing, false);
        assert_eq!(ev, Some(UiEvent::StopEditing));
    }

    #[test]
    fn test_history_panel_keys() {
        let ev = key_to_ui_event(press(KeyCode::Char('y')), Panel::History, InputMode::Normal, false);
        assert_eq!(ev, Some(UiEvent::CopyHistory));
        let ev = key_to_ui_event(press(KeyCode::Enter), Panel::History, InputMode::Normal, false);
        assert_eq!(ev, Some(UiEvent::RecallHistory));
        let ev = key_to_ui_event(press(KeyCode::Char('y')), Panel::Body, InputMode::Normal, false);
        assert_eq!(ev, Some(UiEvent::CopyOutput));
    }

    #[test]
    fn test_help_swallows_keys() {
        let ev = key_to_ui_event(press(KeyCode::Char('s')), Panel::Url, InputMode::Normal, true);
        assert_eq!(ev, Some(UiEvent::CloseHelp));
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(key, Panel::Body, InputMode::Editing, false), Some(UiEvent::Quit));
    }
}
