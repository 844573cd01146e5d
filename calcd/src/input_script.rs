//! # Input Script Parser
//!
//! A simple scripted input format for deterministic testing and demos.
//!
//! ## Format
//!
//! Scripts are line-based:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Delete`
//! - Cursor keys: `Left`, `Right`, `Home`, `End`
//! - Single characters: `7`, `+`, `(`, `=` ...
//! - Text strings: `"12+3"` (expanded to individual key presses)
//! - Keypad buttons: `press √`, `press +/−`
//! - Host commands: `:mode scientific`, `:undo`, `:quit`
//! - Comments: `# This is a comment`
//!
//! ## Example
//!
//! ```text
//! # (2+3)*4
//! "(2+3)*4"
//! Enter
//! :mode scientific
//! "9"
//! press √
//! Enter
//! ```

use std::collections::VecDeque;

use calc_core::{Key, KeyAction};
use thiserror::Error;

use crate::commands::{HostCommand, HostCommandParser};

/// Input script error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputScriptError {
    #[error("Invalid key name: {0}")]
    InvalidKeyName(String),

    #[error("Unknown button: {0}")]
    UnknownButton(String),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Empty script")]
    EmptyScript,
}

/// A single scripted input action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedInput {
    /// A single key press
    Key(Key),
    /// A keypad button, by label
    Press(String),
    /// A host control command
    Command(HostCommand),
}

/// Input script
///
/// Parses and provides scripted inputs for deterministic runs.
#[derive(Debug, Clone)]
pub struct InputScript {
    inputs: VecDeque<ScriptedInput>,
}

impl InputScript {
    /// Parses a script from text
    pub fn from_text(text: &str) -> Result<Self, InputScriptError> {
        let mut inputs = VecDeque::new();

        for (line_num, line) in text.lines().enumerate() {
            inputs.extend(Self::parse_line(line, line_num + 1)?);
        }

        if inputs.is_empty() {
            return Err(InputScriptError::EmptyScript);
        }

        Ok(Self { inputs })
    }

    /// Parses one line. Blank lines and comments yield no inputs.
    pub fn parse_line(line: &str, line_num: usize) -> Result<Vec<ScriptedInput>, InputScriptError> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return Ok(Vec::new());
        }

        let at_line = |e: &dyn std::fmt::Display| InputScriptError::ParseError {
            line: line_num,
            message: e.to_string(),
        };

        if let Some(command) = line.strip_prefix(':') {
            let command = HostCommandParser::parse(command).map_err(|e| at_line(&e))?;
            return Ok(vec![ScriptedInput::Command(command)]);
        }

        if let Some(label) = line.strip_prefix("press ") {
            let label = label.trim();
            if KeyAction::from_label(label).is_none() {
                return Err(at_line(&InputScriptError::UnknownButton(label.to_string())));
            }
            return Ok(vec![ScriptedInput::Press(label.to_string())]);
        }

        if line.len() >= 2 && line.starts_with('"') && line.ends_with('"') {
            let text = &line[1..line.len() - 1];
            return Ok(text
                .chars()
                .map(|c| ScriptedInput::Key(Key::Char(c)))
                .collect());
        }

        let key = Self::parse_key(line).map_err(|e| at_line(&e))?;
        Ok(vec![ScriptedInput::Key(key)])
    }

    /// Parses a key name
    fn parse_key(name: &str) -> Result<Key, InputScriptError> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::Char(c));
        }

        match name.to_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "escape" | "esc" => Ok(Key::Escape),
            "backspace" | "back" => Ok(Key::Backspace),
            "delete" | "del" => Ok(Key::Delete),
            "left" | "arrowleft" => Ok(Key::Left),
            "right" | "arrowright" => Ok(Key::Right),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            _ => Err(InputScriptError::InvalidKeyName(name.to_string())),
        }
    }

    /// Returns the next input, if any
    pub fn next_input(&mut self) -> Option<ScriptedInput> {
        self.inputs.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}
