//! Buffer evaluation
//!
//! Buffers are tokenized and parsed by [`crate::lexer`] and [`crate::parser`];
//! nothing is ever handed to an interpreter.

use serde::{Deserialize, Serialize};

use crate::error::EvalError;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::state::{EditorState, Overlay};
use crate::symbol::normalize_text;

/// Buffer text that evaluates to [`LITERAL_OVERRIDE_TEXT`] instead of a number
pub const LITERAL_OVERRIDE_TRIGGER: &str = "8977";

/// Fixed display text for [`LITERAL_OVERRIDE_TRIGGER`]
pub const LITERAL_OVERRIDE_TEXT: &str = "You found the secret!";

/// Outcome of evaluating a buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EvaluationResult {
    Number(f64),
    LiteralOverride(String),
    Error(EvalError),
}

impl EvaluationResult {
    pub fn is_success(&self) -> bool {
        !matches!(self, EvaluationResult::Error(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            EvaluationResult::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&EvalError> {
        match self {
            EvaluationResult::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Text for the display. Every error shows as `"Error"`.
    pub fn display_text(&self) -> String {
        match self {
            EvaluationResult::Number(v) => format_number(*v),
            EvaluationResult::LiteralOverride(text) => text.clone(),
            EvaluationResult::Error(_) => EvalError::DISPLAY_TEXT.into(),
        }
    }
}

/// Shortest round-trip decimal text; negative zero prints as `0`
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".into()
    } else {
        format!("{}", value)
    }
}

/// Evaluate the editor's buffer.
///
/// While an overlay is showing, its result is returned again.
pub fn evaluate(state: &EditorState) -> EvaluationResult {
    match state.overlay() {
        Some(Overlay::Literal(text)) => EvaluationResult::LiteralOverride(text.clone()),
        Some(Overlay::Error(e)) => EvaluationResult::Error(e.clone()),
        None => evaluate_str(state.buffer().as_str()),
    }
}

/// Evaluate raw buffer text
pub fn evaluate_str(input: &str) -> EvaluationResult {
    if input == LITERAL_OVERRIDE_TRIGGER {
        return EvaluationResult::LiteralOverride(LITERAL_OVERRIDE_TEXT.into());
    }

    let canonical = normalize_text(input);
    if !has_operand(&canonical) {
        return EvaluationResult::Error(EvalError::InvalidOperandEmpty);
    }

    let result = tokenize(&canonical)
        .and_then(|tokens| parse(&tokens))
        .and_then(|expr| expr.eval());
    match result {
        Ok(value) => EvaluationResult::Number(value),
        Err(e) => EvaluationResult::Error(e),
    }
}

/// An expression must mention at least one number or constant
fn has_operand(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit() || c == 'π' || c == 'e')
}
