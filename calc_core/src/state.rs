//! Editor state and the `apply` transition
//!
//! `EditorState` is a plain value. Every event consumes a state and returns
//! the next one; nothing is shared between states.

use serde::{Deserialize, Serialize};

use crate::buffer::ExprBuffer;
use crate::error::EvalError;
use crate::eval::{format_number, EvaluationResult};
use crate::event::{CursorMove, InputEvent};
use crate::function::{Constant, ScientificFunction};
use crate::mode::{KeypadLayout, Mode, CLASSIC_LAYOUT};
use crate::symbol::{is_binary_operator, normalize_char};

/// Display sub-state shown after an evaluation that produced no number.
///
/// Clear leaves it. Any other input resets the buffer to `"0"` first and then
/// applies itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    Literal(String),
    Error(EvalError),
}

impl Overlay {
    pub fn text(&self) -> &str {
        match self {
            Overlay::Literal(text) => text,
            Overlay::Error(_) => EvalError::DISPLAY_TEXT,
        }
    }
}

/// Buffer, cursor and mode of one calculator
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    buffer: ExprBuffer,
    cursor: usize,
    mode: Mode,
    layout: KeypadLayout,
    next_bracket_closes: bool,
    overlay: Option<Overlay>,
}

impl EditorState {
    /// Initial state: `"0"`, Basic mode, classic layout
    pub fn new() -> Self {
        let buffer = ExprBuffer::new();
        Self {
            cursor: buffer.len(),
            buffer,
            mode: Mode::Basic,
            layout: CLASSIC_LAYOUT,
            next_bracket_closes: false,
            overlay: None,
        }
    }

    /// State holding `text`, cursor at the end
    pub fn from_buffer(text: impl Into<String>) -> Self {
        let buffer = ExprBuffer::from_text(text);
        Self {
            cursor: buffer.len(),
            buffer,
            ..Self::new()
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_layout(mut self, layout: KeypadLayout) -> Self {
        self.layout = layout;
        self
    }

    pub(crate) fn with_parts(
        buffer: ExprBuffer,
        cursor: usize,
        mode: Mode,
        layout: KeypadLayout,
        next_bracket_closes: bool,
        overlay: Option<Overlay>,
    ) -> Self {
        Self {
            cursor: cursor.min(buffer.len()),
            buffer,
            mode,
            layout,
            next_bracket_closes,
            overlay,
        }
    }

    pub fn buffer(&self) -> &ExprBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn layout(&self) -> &KeypadLayout {
        &self.layout
    }

    pub fn next_bracket_closes(&self) -> bool {
        self.next_bracket_closes
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// What the display shows: the overlay text, or the buffer
    pub fn display_text(&self) -> &str {
        match &self.overlay {
            Some(overlay) => overlay.text(),
            None => self.buffer.as_str(),
        }
    }

    /// Apply one input event. Illegal or disallowed events return the state
    /// unchanged, and so does any edit that would leave a well-formed buffer
    /// malformed.
    pub fn apply(self, event: InputEvent) -> Self {
        if !self.layout.accepts(self.mode, &event) {
            return self;
        }
        let was_well_formed = self.buffer.is_well_formed();
        let mut next = self.clone();
        next.edit(event);
        if was_well_formed && !next.buffer.is_well_formed() {
            return self;
        }
        next
    }

    fn edit(&mut self, event: InputEvent) {
        if self.overlay.is_some() {
            self.reset();
        }

        match event {
            InputEvent::Clear => self.reset(),
            InputEvent::Digit(ch) => match Constant::from_symbol(ch) {
                Some(constant) => self.insert_constant(constant),
                None => self.insert_digit(ch),
            },
            InputEvent::Operator(sym) => self.insert_operator(sym),
            InputEvent::Point => self.insert_point(),
            InputEvent::Percent => self.insert_percent(),
            InputEvent::Bracket => self.insert_bracket(),
            InputEvent::SignToggle => self.toggle_sign(),
            InputEvent::FunctionWrap(function) => self.wrap(function),
            InputEvent::Backspace => {
                if self.cursor > 0 {
                    self.delete(self.cursor - 1, self.cursor);
                }
            }
            InputEvent::DeleteAt { start, end } => self.delete(start, end),
            InputEvent::ModeToggle => {
                self.mode = self.mode.toggled();
                self.reset();
            }
            InputEvent::MoveCursor(movement) => self.move_cursor(movement),
        }
    }

    /// Show an evaluation result: numbers replace the buffer, anything else
    /// becomes an overlay.
    pub fn commit(mut self, result: &EvaluationResult) -> Self {
        match result {
            EvaluationResult::Number(value) => {
                self.buffer.replace(format_number(*value));
                self.cursor = self.buffer.len();
                self.next_bracket_closes = false;
                self.overlay = None;
            }
            EvaluationResult::LiteralOverride(text) => {
                self.overlay = Some(Overlay::Literal(text.clone()));
            }
            EvaluationResult::Error(e) => {
                self.overlay = Some(Overlay::Error(e.clone()));
            }
        }
        self
    }

    fn reset(&mut self) {
        self.buffer = ExprBuffer::new();
        self.cursor = self.buffer.len();
        self.next_bracket_closes = false;
        self.overlay = None;
    }

    fn insert(&mut self, text: &str) {
        self.cursor = self.buffer.insert_str(self.cursor, text);
    }

    fn replace_all(&mut self, text: impl Into<String>) {
        self.buffer.replace(text);
        self.cursor = self.buffer.len();
    }

    fn after_digit(&self) -> bool {
        self.buffer
            .char_before(self.cursor)
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
    }

    /// The char before the cursor ends a finished operand: `)`, `%` or a
    /// closing `|`
    fn after_closed_operand(&self) -> bool {
        match self.buffer.char_before(self.cursor) {
            Some(')') | Some('%') => true,
            Some('|') => {
                let bars = self
                    .buffer
                    .as_str()
                    .chars()
                    .take(self.cursor)
                    .filter(|c| *c == '|')
                    .count();
                bars % 2 == 0
            }
            _ => false,
        }
    }

    fn insert_digit(&mut self, ch: char) {
        if self.buffer.is_zero() {
            self.replace_all(ch);
        } else if self.after_closed_operand() {
            self.insert(&format!("*{ch}"));
        } else {
            let mut buf = [0u8; 4];
            self.insert(ch.encode_utf8(&mut buf));
        }
    }

    fn insert_constant(&mut self, constant: Constant) {
        let text = constant.expanded();
        if self.buffer.is_zero() {
            self.replace_all(text);
            return;
        }
        let before_number = self
            .buffer
            .char_at(self.cursor)
            .is_some_and(|c| c.is_ascii_digit() || c == '.');
        if before_number {
            return;
        }
        if self.after_digit() || self.after_closed_operand() {
            self.insert(&format!("*{text}"));
        } else if !self.buffer.segment_has_point(self.cursor) {
            self.insert(&text);
        }
    }

    /// Replaces the whole operator run touching the cursor, on either side
    fn insert_operator(&mut self, sym: char) {
        let op = normalize_char(sym);
        if !is_binary_operator(op) {
            return;
        }
        let start = self.buffer.operator_run_start(self.cursor);
        let end = self.buffer.operator_run_end(self.cursor);
        let mut buf = [0u8; 4];
        self.cursor = self.buffer.splice(start..end, op.encode_utf8(&mut buf));
    }

    /// Remove `start..end` unless that would join two operators or two
    /// operands that each hold a decimal point
    fn delete(&mut self, start: usize, end: usize) {
        let end = end.min(self.buffer.len());
        if start >= end {
            return;
        }
        let mut next = self.buffer.clone();
        let cursor = next.splice(start..end, "");
        let joins_operators = next.char_before(start).is_some_and(is_binary_operator)
            && next.char_at(start).is_some_and(is_binary_operator);
        if joins_operators || next.segment_points(start) > 1 {
            return;
        }
        self.buffer = next;
        self.cursor = cursor;
    }

    fn insert_point(&mut self) {
        if self.buffer.segment_has_point(self.cursor) {
            return;
        }
        if self.buffer.is_zero() {
            self.replace_all("0.");
        } else if self.after_closed_operand() {
            self.insert("*0.");
        } else if self.after_digit() {
            self.insert(".");
        } else {
            self.insert("0.");
        }
    }

    fn insert_percent(&mut self) {
        let allowed = self
            .buffer
            .char_before(self.cursor)
            .is_some_and(|c| c.is_ascii_digit() || c == ')');
        if allowed {
            self.insert("%");
        }
    }

    fn insert_bracket(&mut self) {
        if self.next_bracket_closes {
            self.insert(")");
            self.next_bracket_closes = false;
            return;
        }
        if self.buffer.is_zero() {
            self.replace_all("(");
        } else if self.after_digit() || self.after_closed_operand() {
            self.insert("*(");
        } else {
            self.insert("(");
        }
        self.next_bracket_closes = true;
    }

    /// `-` at `pos` is a sign rather than a subtraction
    fn is_sign_at(&self, pos: usize) -> bool {
        match self.buffer.char_before(pos) {
            None => true,
            Some(c) => is_binary_operator(c) || c == '(',
        }
    }

    fn toggle_sign(&mut self) {
        if self.buffer.is_zero() {
            return;
        }
        let Some(run) = self.buffer.trailing_number() else {
            return;
        };
        match run.start.checked_sub(1) {
            Some(minus) if self.buffer.char_at(minus) == Some('-') && self.is_sign_at(minus) => {
                self.buffer.remove_range(minus..run.start);
                if self.cursor > minus {
                    self.cursor -= 1;
                }
            }
            _ => {
                self.buffer.insert_str(run.start, "-");
                if self.cursor >= run.start {
                    self.cursor += 1;
                }
            }
        }
    }

    fn wrap(&mut self, function: ScientificFunction) {
        if self.buffer.ends_with_operator() {
            return;
        }
        let text = function.wrap(self.buffer.as_str());
        self.replace_all(text);
    }

    fn move_cursor(&mut self, movement: CursorMove) {
        let len = self.buffer.len();
        self.cursor = match movement {
            CursorMove::Left => self.cursor.saturating_sub(1),
            CursorMove::Right => (self.cursor + 1).min(len),
            CursorMove::Home => 0,
            CursorMove::End => len,
        };
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply one event to a state
pub fn apply(event: InputEvent, state: EditorState) -> EditorState {
    state.apply(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{evaluate, LITERAL_OVERRIDE_TEXT};

    fn typed_from(state: EditorState, text: &str) -> EditorState {
        text.chars().fold(state, |state, ch| {
            let event = match ch {
                '0'..='9' | 'π' | 'e' => InputEvent::Digit(ch),
                '.' => InputEvent::Point,
                '%' => InputEvent::Percent,
                '(' | ')' => InputEvent::Bracket,
                _ => InputEvent::Operator(ch),
            };
            state.apply(event)
        })
    }

    fn typed(text: &str) -> EditorState {
        typed_from(EditorState::new(), text)
    }

    fn scientific() -> EditorState {
        EditorState::new().with_mode(Mode::Scientific)
    }

    #[test]
    fn test_initial_state() {
        let state = EditorState::new();
        assert_eq!(state.buffer().as_str(), "0");
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.mode(), Mode::Basic);
        assert!(state.overlay().is_none());
    }

    #[test]
    fn test_digits_strip_leading_zero() {
        assert_eq!(typed("123").buffer().as_str(), "123");
        assert_eq!(typed("007").buffer().as_str(), "7");
        assert_eq!(typed("0").buffer().as_str(), "0");
    }

    #[test]
    fn test_second_point_is_noop() {
        let once = typed("12").apply(InputEvent::Point);
        let twice = once.clone().apply(InputEvent::Point);
        assert_eq!(once.buffer().as_str(), "12.");
        assert_eq!(once, twice);
        assert_eq!(typed("1.5.").buffer().as_str(), "1.5");
    }

    #[test]
    fn test_point_in_new_segment() {
        assert_eq!(typed(".").buffer().as_str(), "0.");
        assert_eq!(typed("1.5+").apply(InputEvent::Point).buffer().as_str(), "1.5+0.");
        assert_eq!(typed("1.5+2.").buffer().as_str(), "1.5+2.");
    }

    #[test]
    fn test_operator_replaces_operator() {
        let replaced = typed("3+-");
        assert_eq!(replaced.buffer().as_str(), "3-");
        assert_eq!(replaced, typed("3-"));
        assert_eq!(typed("3*/+").buffer().as_str(), "3+");
    }

    #[test]
    fn test_operator_glyphs_normalized() {
        assert_eq!(typed("6÷").buffer().as_str(), "6/");
        assert_eq!(typed("6×−").buffer().as_str(), "6-");
        assert_eq!(typed("-").buffer().as_str(), "0-");
    }

    #[test]
    fn test_non_operator_symbol_ignored() {
        let state = typed("6").apply(InputEvent::Operator('&'));
        assert_eq!(state.buffer().as_str(), "6");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let once = typed("12+3").apply(InputEvent::Clear);
        let twice = once.clone().apply(InputEvent::Clear);
        assert_eq!(once, EditorState::new());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sign_toggle_trailing_operand() {
        let state = typed("12+3").apply(InputEvent::SignToggle);
        assert_eq!(state.buffer().as_str(), "12+-3");
        let state = state.apply(InputEvent::SignToggle);
        assert_eq!(state.buffer().as_str(), "12+3");
    }

    #[test]
    fn test_sign_toggle_is_involution() {
        for text in ["5", "3-5", "2.5", "12*4", "(2.5", "7^2"] {
            let state = typed(text);
            let toggled = state.clone().apply(InputEvent::SignToggle);
            assert_ne!(toggled.buffer(), state.buffer(), "{text}");
            let restored = toggled.apply(InputEvent::SignToggle);
            assert_eq!(restored.buffer(), state.buffer(), "{text}");
        }
    }

    #[test]
    fn test_sign_toggle_keeps_binary_minus() {
        let state = typed("3-5").apply(InputEvent::SignToggle);
        assert_eq!(state.buffer().as_str(), "3--5");
        assert_eq!(evaluate(&state), EvaluationResult::Number(8.0));
    }

    #[test]
    fn test_sign_toggle_noops() {
        assert_eq!(EditorState::new().apply(InputEvent::SignToggle), EditorState::new());
        assert_eq!(typed("12+").apply(InputEvent::SignToggle).buffer().as_str(), "12+");
    }

    #[test]
    fn test_sign_toggle_on_committed_negative() {
        let state = typed("2-5");
        let result = evaluate(&state);
        let state = state.commit(&result);
        assert_eq!(state.buffer().as_str(), "-3");
        assert_eq!(state.apply(InputEvent::SignToggle).buffer().as_str(), "3");
    }

    #[test]
    fn test_bracket_toggles() {
        let state = typed("(2+3)*4");
        assert_eq!(state.buffer().as_str(), "(2+3)*4");
        assert!(!state.next_bracket_closes());
        assert_eq!(evaluate(&state), EvaluationResult::Number(20.0));
    }

    #[test]
    fn test_bracket_after_number_multiplies() {
        assert_eq!(typed("2(").buffer().as_str(), "2*(");
        assert_eq!(typed("(2)3").buffer().as_str(), "(2)*3");
    }

    #[test]
    fn test_bracket_basic_only() {
        let state = scientific().apply(InputEvent::Bracket);
        assert_eq!(state.buffer().as_str(), "0");
        assert!(!state.next_bracket_closes());
    }

    #[test]
    fn test_percent() {
        assert_eq!(typed("50%").buffer().as_str(), "50%");
        assert_eq!(typed("3+%").buffer().as_str(), "3+");
        assert_eq!(typed("(5)%").buffer().as_str(), "(5)%");
    }

    #[test]
    fn test_function_wrap() {
        let state = typed_from(scientific(), "30")
            .apply(InputEvent::FunctionWrap(ScientificFunction::Sin));
        assert_eq!(state.buffer().as_str(), "sin(30)");
        assert_eq!(state.cursor(), 7);

        let state = typed_from(scientific(), "7")
            .apply(InputEvent::FunctionWrap(ScientificFunction::Square));
        assert_eq!(state.buffer().as_str(), "7^2");
        assert_eq!(evaluate(&state), EvaluationResult::Number(49.0));
    }

    #[test]
    fn test_power_waits_for_exponent() {
        let state = typed_from(scientific(), "2")
            .apply(InputEvent::FunctionWrap(ScientificFunction::Power));
        assert_eq!(state.buffer().as_str(), "2^");
        let state = typed_from(state, "10");
        assert_eq!(evaluate(&state), EvaluationResult::Number(1024.0));
    }

    #[test]
    fn test_function_wrap_after_operator_is_noop() {
        let state = typed_from(scientific(), "2+");
        let wrapped = state.clone().apply(InputEvent::FunctionWrap(ScientificFunction::Sqrt));
        assert_eq!(wrapped, state);
    }

    #[test]
    fn test_function_wrap_needs_scientific() {
        let state = typed("9").apply(InputEvent::FunctionWrap(ScientificFunction::Sqrt));
        assert_eq!(state.buffer().as_str(), "9");
    }

    #[test]
    fn test_constants_pre_expanded() {
        let state = scientific().apply(InputEvent::Digit('π'));
        assert_eq!(state.buffer().as_str(), "3.141592653589793");
        let state = typed_from(scientific(), "2e");
        assert_eq!(state.buffer().as_str(), "2*2.718281828459045");
        let state = typed("π");
        assert_eq!(state.buffer().as_str(), "0");
    }

    #[test]
    fn test_backspace() {
        let state = typed("12").apply(InputEvent::Backspace);
        assert_eq!(state.buffer().as_str(), "1");
        assert_eq!(state.cursor(), 1);
        let state = state.apply(InputEvent::Backspace);
        assert_eq!(state.buffer().as_str(), "0");
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.clone().apply(InputEvent::Backspace), state);
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let state = typed("12").apply(InputEvent::MoveCursor(CursorMove::Home));
        let after = state.clone().apply(InputEvent::Backspace);
        assert_eq!(after, state);
    }

    #[test]
    fn test_delete_at() {
        let state = typed("12+3").apply(InputEvent::DeleteAt { start: 2, end: 4 });
        assert_eq!(state.buffer().as_str(), "12");
        assert_eq!(state.cursor(), 2);

        let same = state.clone().apply(InputEvent::DeleteAt { start: 5, end: 9 });
        assert_eq!(same, state);

        let all = state.apply(InputEvent::DeleteAt { start: 0, end: 10 });
        assert_eq!(all.buffer().as_str(), "0");
    }

    #[test]
    fn test_mode_toggle_resets_buffer() {
        let state = typed("12(").apply(InputEvent::ModeToggle);
        assert_eq!(state.mode(), Mode::Scientific);
        assert_eq!(state.buffer().as_str(), "0");
        assert!(!state.next_bracket_closes());
        let state = state.apply(InputEvent::ModeToggle);
        assert_eq!(state, EditorState::new());
    }

    #[test]
    fn test_cursor_moves() {
        let state = typed("12").apply(InputEvent::MoveCursor(CursorMove::Home));
        assert_eq!(state.cursor(), 0);
        let state = state.apply(InputEvent::MoveCursor(CursorMove::Left));
        assert_eq!(state.cursor(), 0);
        let state = state.apply(InputEvent::Digit('3'));
        assert_eq!(state.buffer().as_str(), "312");
        assert_eq!(state.cursor(), 1);
        let state = state
            .apply(InputEvent::MoveCursor(CursorMove::End))
            .apply(InputEvent::MoveCursor(CursorMove::Right));
        assert_eq!(state.cursor(), 3);
    }

    #[test]
    fn test_operator_at_cursor_replaces_run() {
        let state = typed("3+4")
            .apply(InputEvent::MoveCursor(CursorMove::Left))
            .apply(InputEvent::Operator('*'));
        assert_eq!(state.buffer().as_str(), "3*4");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_operator_before_existing_operator_replaces_it() {
        let state = typed("3+4")
            .apply(InputEvent::MoveCursor(CursorMove::Home))
            .apply(InputEvent::MoveCursor(CursorMove::Right))
            .apply(InputEvent::Operator('-'));
        assert_eq!(state.buffer().as_str(), "3-4");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_operator_inside_sign_run_replaces_both() {
        let state = typed("3+4").apply(InputEvent::SignToggle);
        assert_eq!(state.buffer().as_str(), "3+-4");
        let state = state
            .apply(InputEvent::MoveCursor(CursorMove::Home))
            .apply(InputEvent::MoveCursor(CursorMove::Right))
            .apply(InputEvent::MoveCursor(CursorMove::Right))
            .apply(InputEvent::Operator('*'));
        assert_eq!(state.buffer().as_str(), "3*4");
    }

    #[test]
    fn test_backspace_never_joins_operators() {
        let state = typed("3+5-4")
            .apply(InputEvent::MoveCursor(CursorMove::Left))
            .apply(InputEvent::MoveCursor(CursorMove::Left));
        assert_eq!(state.cursor(), 3);
        let after = state.clone().apply(InputEvent::Backspace);
        assert_eq!(after, state);

        let deleted = state.apply(InputEvent::DeleteAt { start: 2, end: 3 });
        assert_eq!(deleted.buffer().as_str(), "3+5-4");
    }

    #[test]
    fn test_delete_never_merges_decimal_operands() {
        let state = typed("1.5+2.5");
        let deleted = state.clone().apply(InputEvent::DeleteAt { start: 3, end: 4 });
        assert_eq!(deleted, state);

        let state = state
            .apply(InputEvent::MoveCursor(CursorMove::Home))
            .apply(InputEvent::MoveCursor(CursorMove::Right))
            .apply(InputEvent::MoveCursor(CursorMove::Right))
            .apply(InputEvent::MoveCursor(CursorMove::Right))
            .apply(InputEvent::MoveCursor(CursorMove::Right));
        let after = state.clone().apply(InputEvent::Backspace);
        assert_eq!(after, state);
        assert!(matches!(evaluate(&after), EvaluationResult::Number(_)));
    }

    #[test]
    fn test_delete_operator_between_plain_operands() {
        let state = typed("12+3").apply(InputEvent::DeleteAt { start: 2, end: 3 });
        assert_eq!(state.buffer().as_str(), "123");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_sign_removal_that_would_merge_points_is_noop() {
        let state = EditorState::from_buffer("2.5(-1.5");
        let after = state.clone().apply(InputEvent::SignToggle);
        assert_eq!(after, state);
    }

    #[test]
    fn test_keyboard_layout_brackets_in_scientific() {
        let classic = EditorState::new().with_mode(Mode::Scientific);
        assert_eq!(typed_from(classic, "(2)").buffer().as_str(), "2");

        let keyboard = EditorState::new()
            .with_mode(Mode::Scientific)
            .with_layout(crate::mode::KEYBOARD_LAYOUT);
        let state = typed_from(keyboard, "(2)");
        assert_eq!(state.buffer().as_str(), "(2)");
        assert_eq!(state.layout().name, "keyboard");
        assert_eq!(state.apply(InputEvent::ModeToggle).layout().name, "keyboard");
    }

    #[test]
    fn test_commit_number() {
        let state = typed("2+3");
        let result = evaluate(&state);
        let state = state.commit(&result);
        assert_eq!(state.buffer().as_str(), "5");
        assert_eq!(state.cursor(), 1);
        assert!(state.overlay().is_none());
    }

    #[test]
    fn test_literal_override_overlay() {
        let state = typed("8977");
        let result = evaluate(&state);
        let state = state.commit(&result);
        assert_eq!(state.display_text(), LITERAL_OVERRIDE_TEXT);
        assert_eq!(evaluate(&state), result);

        let state = state.apply(InputEvent::Digit('5'));
        assert_eq!(state.display_text(), "5");
        assert!(state.overlay().is_none());
    }

    #[test]
    fn test_literal_override_in_scientific_mode() {
        let state = typed_from(scientific(), "8977");
        assert_eq!(
            evaluate(&state),
            EvaluationResult::LiteralOverride(LITERAL_OVERRIDE_TEXT.into())
        );
    }

    #[test]
    fn test_error_overlay_recovers() {
        let state = typed("5/0");
        let result = evaluate(&state);
        let state = state.commit(&result);
        assert_eq!(state.display_text(), "Error");

        let cleared = state.clone().apply(InputEvent::Clear);
        assert_eq!(cleared, EditorState::new());

        let continued = state.apply(InputEvent::Operator('+'));
        assert_eq!(continued.display_text(), "0+");
    }

    #[test]
    fn test_free_apply() {
        let state = apply(InputEvent::Digit('4'), EditorState::new());
        assert_eq!(state.buffer().as_str(), "4");
    }

    #[test]
    fn test_from_buffer() {
        let state = EditorState::from_buffer("1+2");
        assert_eq!(state.cursor(), 3);
        assert_eq!(EditorState::from_buffer(""), EditorState::new());
    }
}
