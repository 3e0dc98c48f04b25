//! Keyboard event handling.

use crate::selector::{Selection, Selector};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Handle a key event. Returns the outcome once the prompt is done.
pub fn handle_key(selector: &mut Selector, key: KeyEvent) -> Option<Selection> {
    // Ignore release/repeat reports on platforms that send them.
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C to cancel
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Selection::Cancelled);
    }

    match key.code {
        KeyCode::Esc => Some(Selection::Cancelled),
        KeyCode::Enter => selector.commit(),
        KeyCode::Up => {
            selector.move_up();
            None
        }
        KeyCode::Down => {
            selector.move_down();
            None
        }
        KeyCode::Backspace => {
            selector.pop_char();
            None
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            selector.push_char(c);
            None
        }
        _ => None,
    }
}
