use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusLeft,
    FocusRight,
    MoveUp,
    MoveDown,
    NextCard,
    PrevCard,
    FirstCard,
    LastCard,
    Select,     // Enter: open the centred card
    Flip,       // 'f': flip the opened card
    StartFilter,
    Reload,
    ToggleHelp,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Filter input captures all printable keys
    if app.mode == Mode::Filter {
        return handle_input_mode(key);
    }

    if app.mode == Mode::Help {
        // Any key closes the help overlay
        return Action::ExitMode;
    }

    let binding = KeyBinding::new(key.code, key.modifiers);
    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Handle key events while editing the deck filter
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_uses_keymap() {
        let app = App::for_tests();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('n')), &app, &keymap),
            Action::NextCard
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &app, &keymap),
            Action::Quit
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z')), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_filter_mode_captures_text() {
        let mut app = App::for_tests();
        app.mode = Mode::Filter;
        let keymap = Keymap::default();
        // 'n' types into the filter instead of advancing the carousel
        assert_eq!(
            handle_key_event(key(KeyCode::Char('n')), &app, &keymap),
            Action::InputChar('n')
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc), &app, &keymap),
            Action::Cancel
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), &app, &keymap),
            Action::Confirm
        );
    }

    #[test]
    fn test_help_mode_any_key_exits() {
        let mut app = App::for_tests();
        app.mode = Mode::Help;
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x')), &app, &keymap),
            Action::ExitMode
        );
    }
}
