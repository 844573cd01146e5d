//! Calculator modes and keypad layouts

use serde::{Deserialize, Serialize};

use crate::event::InputEvent;
use crate::function::Constant;

/// Calculator mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Digits, arithmetic, brackets, sign toggle
    Basic,
    /// Function keys and constants
    Scientific,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Basic => "BASIC",
            Mode::Scientific => "SCIENTIFIC",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Mode::Basic => Mode::Scientific,
            Mode::Scientific => Mode::Basic,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(Mode::Basic),
            "scientific" | "sci" => Some(Mode::Scientific),
            _ => None,
        }
    }
}

/// Symbol sets per mode.
///
/// Keys that live on the shared keyboard (digits, operators, point, percent,
/// clear, backspace, delete, cursor moves, mode switch) are legal in every
/// mode. Constants, function keys, the bracket key and the sign toggle are
/// legal only when the active mode's set shows their label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadLayout {
    pub name: &'static str,
    pub basic: &'static [&'static str],
    pub scientific: &'static [&'static str],
}

pub const CLASSIC_LAYOUT: KeypadLayout = KeypadLayout {
    name: "classic",
    basic: &[
        "C", "()", "%", "÷", "7", "8", "9", "×", "4", "5", "6", "−", "1", "2", "3", "+", "+/−",
        "0", ".", "=",
    ],
    scientific: &[
        "sin", "cos", "tan", "ln", "log", "√", "π", "e", "x²", "xʸ", "1/x", "|x|",
    ],
};

/// Physical keyboard: brackets, sign toggle and constants are typed in
/// either mode, function keys stay scientific
pub const KEYBOARD_LAYOUT: KeypadLayout = KeypadLayout {
    name: "keyboard",
    basic: &[
        "C", "()", "%", "÷", "7", "8", "9", "×", "4", "5", "6", "−", "1", "2", "3", "+", "+/−",
        "0", ".", "=", "π", "e",
    ],
    scientific: &[
        "sin", "cos", "tan", "ln", "log", "√", "π", "e", "x²", "xʸ", "1/x", "|x|", "()", "+/−",
    ],
};

pub const LAYOUTS: &[KeypadLayout] = &[CLASSIC_LAYOUT, KEYBOARD_LAYOUT];

impl KeypadLayout {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        LAYOUTS
            .iter()
            .find(|layout| layout.name.eq_ignore_ascii_case(name))
            .copied()
    }

    pub fn symbols(&self, mode: Mode) -> &'static [&'static str] {
        match mode {
            Mode::Basic => self.basic,
            Mode::Scientific => self.scientific,
        }
    }

    pub fn has_symbol(&self, mode: Mode, label: &str) -> bool {
        self.symbols(mode).contains(&label)
    }

    /// Whether `event` is legal in `mode`
    pub fn accepts(&self, mode: Mode, event: &InputEvent) -> bool {
        match event {
            InputEvent::Digit(ch) => match Constant::from_symbol(*ch) {
                Some(constant) => {
                    let mut buf = [0u8; 4];
                    self.has_symbol(mode, constant.symbol().encode_utf8(&mut buf))
                }
                None => ch.is_ascii_digit(),
            },
            InputEvent::FunctionWrap(function) => self.has_symbol(mode, function.label()),
            InputEvent::Bracket => self.has_symbol(mode, "()"),
            InputEvent::SignToggle => self.has_symbol(mode, "+/−"),
            _ => true,
        }
    }
}

impl Default for KeypadLayout {
    fn default() -> Self {
        CLASSIC_LAYOUT
    }
}
