//! # Calculator Host
//!
//! Drives a [`calc_core::CalculatorSession`] from scripts or stdin and
//! renders its display as text.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: the engine never prints
//! - **Output is snapshot rendering**: one display line per frame
//! - **Input is explicit events**: keys, button labels, host commands
//! - **Deterministic mode is first-class**: scripts replay exactly
//!
//! ## Responsibilities
//!
//! The host:
//! - Loads settings (defaults, settings file, command-line overrides)
//! - Parses input scripts and interactive lines
//! - Runs host control commands (`:mode`, `:history`, `:undo`, ...)
//! - Renders the display right-aligned at a fixed width
//!
//! ## Non-Responsibilities
//!
//! The host does NOT:
//! - Provide terminal emulation (ANSI/VT codes)
//! - Persist history between runs

pub mod commands;
pub mod config;
pub mod input_script;
pub mod render;
pub mod runtime;

pub use commands::{HostCommand, HostCommandError, HostCommandParser, ModeRequest};
pub use config::load_settings;
pub use input_script::{InputScript, InputScriptError, ScriptedInput};
pub use render::{fit_display, render_frame};
pub use runtime::{HostRuntime, HostRuntimeConfig, HostRuntimeError};
