//! Calculator session
//!
//! Owns one [`EditorState`] plus the caller-side extras the pure engine
//! leaves out: undo/redo stacks and an in-memory evaluation history.

use serde::{Deserialize, Serialize};

use crate::eval::{evaluate, EvaluationResult};
use crate::event::{InputEvent, KeyAction};
use crate::key::Key;
use crate::mode::{KeypadLayout, Mode};
use crate::snapshot::SessionSnapshot;
use crate::state::EditorState;

pub const DEFAULT_UNDO_LIMIT: usize = 100;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// One successful evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

/// Outcome from feeding input to a session
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Nothing changed
    Continue,
    /// State changed
    Changed,
    /// Evaluation was requested
    Evaluated(EvaluationResult),
}

#[derive(Debug, Clone)]
pub struct CalculatorSession {
    state: EditorState,
    undo_stack: Vec<EditorState>,
    redo_stack: Vec<EditorState>,
    history: Vec<HistoryEntry>,
    undo_limit: usize,
    history_limit: usize,
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self {
            state: EditorState::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history: Vec::new(),
            undo_limit: DEFAULT_UNDO_LIMIT,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Start in `mode` with an empty buffer
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.state = self.state.with_mode(mode);
        self
    }

    pub fn with_layout(mut self, layout: KeypadLayout) -> Self {
        self.state = self.state.with_layout(layout);
        self
    }

    pub fn with_undo_limit(mut self, limit: usize) -> Self {
        self.undo_limit = limit;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn display_text(&self) -> &str {
        self.state.display_text()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Apply a keyboard key
    pub fn apply_key(&mut self, key: Key) -> SessionOutcome {
        match key.action(self.state.cursor()) {
            Some(action) => self.apply_action(action),
            None => SessionOutcome::Continue,
        }
    }

    /// Press a keypad button by its label. Unknown labels return `None`.
    pub fn press(&mut self, label: &str) -> Option<SessionOutcome> {
        KeyAction::from_label(label).map(|action| self.apply_action(action))
    }

    pub fn apply_action(&mut self, action: KeyAction) -> SessionOutcome {
        match action {
            KeyAction::Edit(event) => self.apply_event(event),
            KeyAction::Evaluate => self.evaluate(),
        }
    }

    pub fn apply_event(&mut self, event: InputEvent) -> SessionOutcome {
        let next = self.state.clone().apply(event);
        self.transition(next)
    }

    /// Switch to `mode`; a no-op if already there
    pub fn set_mode(&mut self, mode: Mode) -> SessionOutcome {
        if self.state.mode() == mode {
            return SessionOutcome::Continue;
        }
        self.apply_event(InputEvent::ModeToggle)
    }

    /// Evaluate the buffer and show the result.
    ///
    /// Numbers and literal overrides are recorded in the history; asking
    /// again while an overlay is shown records nothing.
    pub fn evaluate(&mut self) -> SessionOutcome {
        let result = evaluate(&self.state);
        if self.state.overlay().is_none() && result.is_success() {
            self.record(HistoryEntry {
                expression: self.state.buffer().to_string(),
                result: result.display_text(),
            });
        }
        let next = self.state.clone().commit(&result);
        self.transition(next);
        SessionOutcome::Evaluated(result)
    }

    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.state, previous);
                self.redo_stack.push(current);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.state, next);
                self.undo_stack.push(current);
                true
            }
            None => false,
        }
    }

    /// Complete session snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            &self.state,
            self.undo_stack.len(),
            self.redo_stack.len(),
            self.history.len(),
        )
    }

    fn transition(&mut self, next: EditorState) -> SessionOutcome {
        if next == self.state {
            return SessionOutcome::Continue;
        }
        let previous = std::mem::replace(&mut self.state, next);
        self.save_undo(previous);
        SessionOutcome::Changed
    }

    fn save_undo(&mut self, previous: EditorState) {
        self.undo_stack.push(previous);
        // New edits invalidate redo
        self.redo_stack.clear();
        if self.undo_stack.len() > self.undo_limit {
            self.undo_stack.remove(0);
        }
    }

    fn record(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        if self.history.len() > self.history_limit {
            self.history.remove(0);
        }
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use crate::eval::LITERAL_OVERRIDE_TEXT;

    fn type_keys(session: &mut CalculatorSession, text: &str) {
        for ch in text.chars() {
            session.apply_key(Key::Char(ch));
        }
    }

    #[test]
    fn test_new_session() {
        let session = CalculatorSession::new();
        assert_eq!(session.display_text(), "0");
        assert_eq!(session.mode(), Mode::Basic);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_keys_and_enter() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "2+3*4");
        assert_eq!(session.display_text(), "2+3*4");
        let outcome = session.apply_key(Key::Enter);
        assert_eq!(outcome, SessionOutcome::Evaluated(EvaluationResult::Number(14.0)));
        assert_eq!(session.display_text(), "14");
    }

    #[test]
    fn test_unmapped_key_continues() {
        let mut session = CalculatorSession::new();
        assert_eq!(session.apply_key(Key::Char('q')), SessionOutcome::Continue);
    }

    #[test]
    fn test_noop_event_not_recorded() {
        let mut session = CalculatorSession::new();
        assert_eq!(session.apply_event(InputEvent::SignToggle), SessionOutcome::Continue);
        assert!(!session.undo());
    }

    #[test]
    fn test_press_labels() {
        let mut session = CalculatorSession::new();
        session.press("9");
        session.press("÷");
        session.press("3");
        let outcome = session.press("=");
        assert_eq!(
            outcome,
            Some(SessionOutcome::Evaluated(EvaluationResult::Number(3.0)))
        );
        assert_eq!(session.press("nope"), None);
    }

    #[test]
    fn test_history_records_successes() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "1+1");
        session.evaluate();
        type_keys(&mut session, "/0");
        session.evaluate();

        assert_eq!(
            session.history(),
            &[HistoryEntry {
                expression: "1+1".into(),
                result: "2".into()
            }]
        );
        assert_eq!(session.display_text(), "Error");
    }

    #[test]
    fn test_history_limit() {
        let mut session = CalculatorSession::new().with_history_limit(2);
        for digit in ['1', '2', '3'] {
            session.apply_key(Key::Escape);
            session.apply_key(Key::Char(digit));
            session.evaluate();
        }
        let expressions: Vec<_> = session.history().iter().map(|e| e.expression.as_str()).collect();
        assert_eq!(expressions, vec!["2", "3"]);
        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_literal_override_recorded_once() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "8977");
        let first = session.evaluate();
        let second = session.evaluate();
        assert_eq!(first, second);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].result, LITERAL_OVERRIDE_TEXT);
    }

    #[test]
    fn test_error_overlay_then_typing() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "3+");
        assert_eq!(
            session.evaluate(),
            SessionOutcome::Evaluated(EvaluationResult::Error(EvalError::TrailingOperator))
        );
        type_keys(&mut session, "7");
        assert_eq!(session.display_text(), "7");
    }

    #[test]
    fn test_undo_redo() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "12");
        assert!(session.undo());
        assert_eq!(session.display_text(), "1");
        assert!(session.undo());
        assert_eq!(session.display_text(), "0");
        assert!(!session.undo());

        assert!(session.redo());
        assert!(session.redo());
        assert_eq!(session.display_text(), "12");
        assert!(!session.redo());
    }

    #[test]
    fn test_edit_clears_redo() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "12");
        session.undo();
        type_keys(&mut session, "5");
        assert_eq!(session.display_text(), "15");
        assert!(!session.redo());
    }

    #[test]
    fn test_undo_evaluation() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "6*7");
        session.evaluate();
        assert_eq!(session.display_text(), "42");
        session.undo();
        assert_eq!(session.display_text(), "6*7");
    }

    #[test]
    fn test_undo_limit() {
        let mut session = CalculatorSession::new().with_undo_limit(3);
        type_keys(&mut session, "12345");
        let mut undone = 0;
        while session.undo() {
            undone += 1;
        }
        assert_eq!(undone, 3);
        assert_eq!(session.display_text(), "12");
    }

    #[test]
    fn test_set_mode() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "42");
        assert_eq!(session.set_mode(Mode::Basic), SessionOutcome::Continue);
        assert_eq!(session.set_mode(Mode::Scientific), SessionOutcome::Changed);
        assert_eq!(session.mode(), Mode::Scientific);
        assert_eq!(session.display_text(), "0");

        session.press("9");
        session.press("√");
        assert_eq!(session.display_text(), "√(9)");
        assert_eq!(
            session.evaluate(),
            SessionOutcome::Evaluated(EvaluationResult::Number(3.0))
        );
    }

    #[test]
    fn test_with_mode() {
        let session = CalculatorSession::new().with_mode(Mode::Scientific);
        assert_eq!(session.mode(), Mode::Scientific);
    }

    #[test]
    fn test_snapshot_depths() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "12");
        session.evaluate();
        session.undo();
        let snapshot = session.snapshot();
        // evaluating "12" leaves the state unchanged
        assert_eq!(snapshot.buffer, "1");
        assert_eq!(snapshot.undo_depth, 1);
        assert_eq!(snapshot.redo_depth, 1);
        assert_eq!(snapshot.history_len, 1);
    }
}
