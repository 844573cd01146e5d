//! Platform-independent key representation and keyboard mapping

use serde::{Deserialize, Serialize};

use crate::event::{CursorMove, InputEvent, KeyAction};
use crate::function::Constant;
use crate::symbol::{is_binary_operator, normalize_char};

/// Platform-independent key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Printable
    Char(char),

    // Navigation
    Left,
    Right,
    Home,
    End,

    // Special keys
    Enter,
    Backspace,
    Delete,
    Escape,
}

impl Key {
    /// Convert an ASCII byte to a key
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x1B => Some(Key::Escape),
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            ch if (0x20..0x7F).contains(&ch) => Some(Key::Char(ch as char)),
            _ => None,
        }
    }

    /// Keyboard mapping.
    ///
    /// `cursor` is the current cursor position, used by `Delete`. Keys with no
    /// meaning return `None`.
    pub fn action(&self, cursor: usize) -> Option<KeyAction> {
        let event = match self {
            Key::Enter => return Some(KeyAction::Evaluate),
            Key::Escape => InputEvent::Clear,
            Key::Backspace => InputEvent::Backspace,
            Key::Delete => InputEvent::DeleteAt {
                start: cursor,
                end: cursor + 1,
            },
            Key::Left => InputEvent::MoveCursor(CursorMove::Left),
            Key::Right => InputEvent::MoveCursor(CursorMove::Right),
            Key::Home => InputEvent::MoveCursor(CursorMove::Home),
            Key::End => InputEvent::MoveCursor(CursorMove::End),
            Key::Char(ch) => match normalize_char(*ch) {
                '=' => return Some(KeyAction::Evaluate),
                '.' => InputEvent::Point,
                '%' => InputEvent::Percent,
                '(' | ')' => InputEvent::Bracket,
                c if c.is_ascii_digit() => InputEvent::Digit(c),
                c if Constant::from_symbol(c).is_some() => InputEvent::Digit(c),
                c if is_binary_operator(c) => InputEvent::Operator(c),
                _ => return None,
            },
        };
        Some(KeyAction::Edit(event))
    }
}
