//! Key event handlers for each tab and for edit mode

use crate::config::StartTab;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Convert key events to messages based on current tab / mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }
    if state.is_editing() {
        return handle_key_editing(state, key);
    }
    if state.show_help {
        return match key {
            InputKey::Char('?' | 'q') | InputKey::Esc | InputKey::Enter => {
                Some(Message::ToggleHelp)
            }
            _ => None,
        };
    }

    if let Some(msg) = handle_key_global(key) {
        return Some(msg);
    }

    match state.tab {
        StartTab::Components => handle_key_components(key),
        StartTab::Extensions | StartTab::Values => None,
    }
}

/// Keys that mean the same thing on every tab
fn handle_key_global(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        InputKey::Char('?') => Some(Message::ToggleHelp),

        InputKey::Tab => Some(Message::NextTab),
        InputKey::BackTab => Some(Message::PreviousTab),
        InputKey::Char('1') => Some(Message::ShowTab(StartTab::Components)),
        InputKey::Char('2') => Some(Message::ShowTab(StartTab::Extensions)),
        InputKey::Char('3') => Some(Message::ShowTab(StartTab::Values)),

        InputKey::Char('j') | InputKey::Down => Some(Message::SelectNext),
        InputKey::Char('k') | InputKey::Up => Some(Message::SelectPrevious),
        InputKey::Char('g') | InputKey::Home => Some(Message::SelectFirst),
        InputKey::Char('G') | InputKey::End => Some(Message::SelectLast),
        InputKey::PageDown => Some(Message::PageDown),
        InputKey::PageUp => Some(Message::PageUp),

        InputKey::Char('r') => Some(Message::Refresh),
        _ => None,
    }
}

fn handle_key_components(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Char(' ') => Some(Message::Activate),
        InputKey::Char('h') | InputKey::Left => Some(Message::Adjust(-1)),
        InputKey::Char('l') | InputKey::Right => Some(Message::Adjust(1)),
        InputKey::Char('H') => Some(Message::Adjust(-10)),
        InputKey::Char('L') => Some(Message::Adjust(10)),
        InputKey::Char('e') => Some(Message::ExpandAll),
        InputKey::Char('c') => Some(Message::CollapseAll),
        InputKey::Char('v') => Some(Message::SyncSelected),
        InputKey::Char('X') => Some(Message::ClearLayer),
        _ => None,
    }
}

/// Text box / number entry
fn handle_key_editing(state: &AppState, key: InputKey) -> Option<Message> {
    let buffer = state
        .layer
        .editing
        .as_ref()
        .map(|e| e.buffer.as_str())
        .unwrap_or_default();

    match key {
        InputKey::Enter => Some(Message::CommitEdit),
        InputKey::Esc => Some(Message::CancelEdit),
        InputKey::Backspace => {
            let mut text = buffer.to_string();
            text.pop();
            Some(Message::EditInput { text })
        }
        InputKey::CharCtrl('u') => Some(Message::EditInput {
            text: String::new(),
        }),
        key => key.printable().map(|c| Message::EditInput {
            text: format!("{buffer}{c}"),
        }),
    }
}
