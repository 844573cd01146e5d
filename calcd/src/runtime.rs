//! # Host Runtime
//!
//! The loop that feeds scripted or interactive input into a session and
//! writes display frames.

use std::io::{self, BufRead, Write};

use calc_core::{CalculatorSession, EvaluationResult, InputEvent, SessionOutcome};
use calc_settings::persistence::PersistenceError;
use calc_settings::{CalculatorSettings, SettingsError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::{HostCommand, ModeRequest};
use crate::input_script::{InputScript, InputScriptError, ScriptedInput};
use crate::render::render_frame;

/// Host runtime error types
#[derive(Debug, Error)]
pub enum HostRuntimeError {
    #[error("Script error: {0}")]
    Script(#[from] InputScriptError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Settings file error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Host runtime configuration
#[derive(Debug, Clone, Default)]
pub struct HostRuntimeConfig {
    pub settings: CalculatorSettings,
    /// Optional input script text
    pub script: Option<String>,
    /// Maximum inputs to process (0 = unlimited)
    pub max_steps: usize,
}

/// Host runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostState {
    Running,
    Shutdown,
}

/// Host runtime
pub struct HostRuntime<W: Write> {
    config: HostRuntimeConfig,
    session: CalculatorSession,
    script: Option<InputScript>,
    out: W,
    state: HostState,
    /// Inputs processed so far
    steps: usize,
    /// The display changed since the last frame
    pending_frame: bool,
}

impl<W: Write> HostRuntime<W> {
    /// Creates a runtime writing frames to `out`
    pub fn new(config: HostRuntimeConfig, out: W) -> Result<Self, HostRuntimeError> {
        let settings = &config.settings;
        let session = CalculatorSession::new()
            .with_mode(settings.start_mode)
            .with_layout(settings.layout)
            .with_undo_limit(settings.undo_limit)
            .with_history_limit(settings.history_limit);

        let script = config
            .script
            .as_deref()
            .map(InputScript::from_text)
            .transpose()?;

        Ok(Self {
            config,
            session,
            script,
            out,
            state: HostState::Running,
            steps: 0,
            pending_frame: false,
        })
    }

    pub fn session(&self) -> &CalculatorSession {
        &self.session
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_shutdown(&self) -> bool {
        self.state == HostState::Shutdown
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs the loaded script.
    ///
    /// Returns when:
    /// - Quit command received
    /// - Max steps reached (if configured)
    /// - Script exhausted
    ///
    /// A frame is written after every evaluation and once at the end if the
    /// display changed since.
    pub fn run(&mut self) -> Result<(), HostRuntimeError> {
        while self.can_step() {
            let Some(input) = self.script.as_mut().and_then(InputScript::next_input) else {
                break;
            };
            self.step(input)?;
        }
        self.flush_frame()
    }

    /// Reads script-format lines from `input` until EOF or `:quit`.
    ///
    /// Invalid lines are reported and skipped. A frame is written at start
    /// and after each line that changed the display.
    pub fn run_interactive<R: BufRead>(&mut self, input: R) -> Result<(), HostRuntimeError> {
        self.render()?;
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let inputs = match InputScript::parse_line(&line, index + 1) {
                Ok(inputs) => inputs,
                Err(e) => {
                    warn!(error = %e, "ignoring input line");
                    writeln!(self.out, "? {}", e)?;
                    continue;
                }
            };
            for input in inputs {
                if !self.can_step() {
                    break;
                }
                self.step(input)?;
            }
            self.flush_frame()?;
            if !self.can_step() {
                break;
            }
        }
        Ok(())
    }

    /// Processes one input
    pub fn step(&mut self, input: ScriptedInput) -> Result<(), HostRuntimeError> {
        self.steps += 1;
        match input {
            ScriptedInput::Key(key) => {
                let expression = self.session.state().buffer().to_string();
                let outcome = self.session.apply_key(key);
                debug!(?key, display = self.session.display_text(), "key applied");
                self.handle_outcome(outcome, &expression)?;
            }
            ScriptedInput::Press(label) => {
                let expression = self.session.state().buffer().to_string();
                match self.session.press(&label) {
                    Some(outcome) => {
                        debug!(%label, display = self.session.display_text(), "button pressed");
                        self.handle_outcome(outcome, &expression)?;
                    }
                    None => warn!(%label, "unknown button"),
                }
            }
            ScriptedInput::Command(command) => self.execute_command(command)?,
        }
        Ok(())
    }

    fn can_step(&self) -> bool {
        self.state == HostState::Running
            && (self.config.max_steps == 0 || self.steps < self.config.max_steps)
    }

    fn handle_outcome(
        &mut self,
        outcome: SessionOutcome,
        expression: &str,
    ) -> Result<(), HostRuntimeError> {
        match outcome {
            SessionOutcome::Continue => {}
            SessionOutcome::Changed => self.pending_frame = true,
            SessionOutcome::Evaluated(result) => {
                match &result {
                    EvaluationResult::Error(error) => {
                        info!(expression, %error, "evaluation failed");
                    }
                    _ => info!(expression, result = %result.display_text(), "evaluated"),
                }
                self.render()?;
            }
        }
        Ok(())
    }

    fn execute_command(&mut self, command: HostCommand) -> Result<(), HostRuntimeError> {
        debug!(?command, "host command");
        match command {
            HostCommand::Mode(request) => {
                let outcome = match request {
                    ModeRequest::Set(mode) => self.session.set_mode(mode),
                    ModeRequest::Toggle => self.session.apply_event(InputEvent::ModeToggle),
                };
                if outcome == SessionOutcome::Changed {
                    self.pending_frame = true;
                }
            }
            HostCommand::History => {
                if self.session.history().is_empty() {
                    writeln!(self.out, "(no history)")?;
                }
                for entry in self.session.history() {
                    writeln!(self.out, "{} = {}", entry.expression, entry.result)?;
                }
            }
            HostCommand::ClearHistory => self.session.clear_history(),
            HostCommand::Undo => {
                if self.session.undo() {
                    self.pending_frame = true;
                } else {
                    debug!("nothing to undo");
                }
            }
            HostCommand::Redo => {
                if self.session.redo() {
                    self.pending_frame = true;
                } else {
                    debug!("nothing to redo");
                }
            }
            HostCommand::Quit => {
                info!(steps = self.steps, "quit requested");
                self.state = HostState::Shutdown;
            }
        }
        Ok(())
    }

    fn flush_frame(&mut self) -> Result<(), HostRuntimeError> {
        if self.pending_frame {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), HostRuntimeError> {
        let frame = render_frame(&self.session, self.config.settings.display_width);
        writeln!(self.out, "{}", frame)?;
        self.pending_frame = false;
        Ok(())
    }
}
