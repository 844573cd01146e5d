//! Evaluation errors
//!
//! Every variant is shown to the user as the same `"Error"` display; the
//! variants exist so callers and tests can tell failures apart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a buffer could not be evaluated
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EvalError {
    #[error("Expression contains no number")]
    InvalidOperandEmpty,

    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("Expression ends with an operator")]
    TrailingOperator,

    #[error("Result is not a finite number")]
    NonFiniteResult,

    #[error("Malformed argument to {0}")]
    MalformedFunctionArgument(String),

    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Expression nested too deeply")]
    NestingTooDeep,
}

/// Evaluation result type
pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    /// The text shown on the display for any evaluation error
    pub const DISPLAY_TEXT: &'static str = "Error";
}
