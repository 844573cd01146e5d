//! # Calc Core
//!
//! Input editing and expression evaluation for a keypad calculator.
//!
//! ## Philosophy
//!
//! - **Values, not globals**: every input produces a new `EditorState`
//! - **Deterministic**: same input trace => same display
//! - **No code execution**: buffers are parsed by an explicit grammar, never handed to an
//!   interpreter
//! - **Silent editing**: illegal edits are no-ops, only evaluation reports errors
//!
//! ## Design
//!
//! The core provides:
//! - Symbol normalizer: presentation glyphs to canonical ASCII operators
//! - EditorState + `apply`: the buffer editing state machine
//! - Function wrapper: scientific keys as whole-buffer rewrites
//! - Evaluator: precedence-climbing parser over `f64`
//! - Mode controller: which keys each mode accepts
//! - CalculatorSession: undo/redo and history on top of the pure functions

pub mod buffer;
pub mod error;
pub mod eval;
pub mod event;
pub mod function;
pub mod key;
pub mod lexer;
pub mod mode;
pub mod parser;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod symbol;

pub use buffer::ExprBuffer;
pub use error::EvalError;
pub use eval::{evaluate, evaluate_str, format_number, EvaluationResult, LITERAL_OVERRIDE_TEXT};
pub use event::{CursorMove, InputEvent, KeyAction};
pub use function::{Constant, ScientificFunction};
pub use key::Key;
pub use mode::{KeypadLayout, Mode, CLASSIC_LAYOUT, KEYBOARD_LAYOUT, LAYOUTS};
pub use session::{CalculatorSession, HistoryEntry, SessionOutcome};
pub use snapshot::SessionSnapshot;
pub use state::{apply, EditorState, Overlay};
pub use symbol::normalize;
