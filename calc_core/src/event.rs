//! Input events
//!
//! One event is one logical keypad press. Evaluation is not an event: it is
//! a read of the state, see [`crate::eval::evaluate`].

use serde::{Deserialize, Serialize};

use crate::function::{Constant, ScientificFunction};
use crate::symbol::{is_binary_operator, normalize};

/// Cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorMove {
    Left,
    Right,
    Home,
    End,
}

/// A single editing event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// `0-9`, or a constant symbol (`π`, `e`)
    Digit(char),
    /// Binary operator, any glyph accepted by the normalizer
    Operator(char),
    Point,
    /// Postfix percent
    Percent,
    Clear,
    Backspace,
    /// Delete the char range `start..end`
    DeleteAt { start: usize, end: usize },
    SignToggle,
    /// Combined bracket key: opens, then closes
    Bracket,
    FunctionWrap(ScientificFunction),
    ModeToggle,
    MoveCursor(CursorMove),
}

/// What a key or button asks of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    Edit(InputEvent),
    Evaluate,
}

impl KeyAction {
    /// Resolve a keypad button label.
    ///
    /// Labels follow the keypad faces: `C`, `()`, `%`, `÷`, `×`, `−`, `+`,
    /// `+/−`, `.`, `=`, `⌫`, digits, constants and scientific keys.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let edit = match label {
            "=" => return Some(KeyAction::Evaluate),
            "C" => InputEvent::Clear,
            "()" => InputEvent::Bracket,
            "%" => InputEvent::Percent,
            "." => InputEvent::Point,
            "+/−" | "+/-" | "±" => InputEvent::SignToggle,
            "⌫" => InputEvent::Backspace,
            _ => {
                if let Some(function) = ScientificFunction::from_label(label) {
                    InputEvent::FunctionWrap(function)
                } else {
                    let mut chars = normalize(label).chars();
                    let ch = chars.next()?;
                    if chars.next().is_some() {
                        return None;
                    }
                    if ch.is_ascii_digit() || Constant::from_symbol(ch).is_some() {
                        InputEvent::Digit(ch)
                    } else if is_binary_operator(ch) {
                        InputEvent::Operator(ch)
                    } else {
                        return None;
                    }
                }
            }
        };
        Some(KeyAction::Edit(edit))
    }
}
