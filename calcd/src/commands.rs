//! # Host Control Commands
//!
//! Script and interactive lines starting with `:` are host commands.
//!
//! ## Command Set
//!
//! - `mode basic|scientific|toggle` - Switch keypad mode
//! - `history` - Print the evaluation history
//! - `clear-history` - Forget the evaluation history
//! - `undo` / `redo` - Step through previous states
//! - `quit` - Exit the host

use calc_core::Mode;
use thiserror::Error;

/// Host command error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostCommandError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeRequest {
    Set(Mode),
    Toggle,
}

/// Host commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    Mode(ModeRequest),
    History,
    ClearHistory,
    Undo,
    Redo,
    Quit,
}

/// Host command parser
pub struct HostCommandParser;

impl HostCommandParser {
    /// Parses a command string (without the leading `:`)
    pub fn parse(input: &str) -> Result<HostCommand, HostCommandError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(HostCommandError::InvalidCommand("Empty command".to_string()));
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "mode" => Self::parse_mode(&parts[1..]),
            "history" => Ok(HostCommand::History),
            "clear-history" => Ok(HostCommand::ClearHistory),
            "undo" => Ok(HostCommand::Undo),
            "redo" => Ok(HostCommand::Redo),
            "quit" | "exit" => Ok(HostCommand::Quit),
            _ => Err(HostCommandError::UnknownCommand(cmd)),
        }
    }

    fn parse_mode(args: &[&str]) -> Result<HostCommand, HostCommandError> {
        let Some(name) = args.first() else {
            return Err(HostCommandError::MissingArgument(
                "mode (basic, scientific, toggle)".to_string(),
            ));
        };

        if name.eq_ignore_ascii_case("toggle") {
            return Ok(HostCommand::Mode(ModeRequest::Toggle));
        }
        Mode::from_name(name)
            .map(|mode| HostCommand::Mode(ModeRequest::Set(mode)))
            .ok_or_else(|| HostCommandError::InvalidMode(name.to_string()))
    }
}
