//! Expression buffer
//!
//! All positions are char offsets, not byte offsets: the buffer may hold
//! multi-byte glyphs such as `√`.

use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::symbol::is_binary_operator;

/// The canonical empty buffer
pub const EMPTY_BUFFER: &str = "0";

/// Editable expression text. Never empty.
///
/// Editing keeps it well formed (see [`ExprBuffer::is_well_formed`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExprBuffer {
    text: String,
}

impl ExprBuffer {
    pub fn new() -> Self {
        Self {
            text: EMPTY_BUFFER.into(),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::new()
        } else {
            Self { text }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// True for the canonical `"0"`
    pub fn is_zero(&self) -> bool {
        self.text == EMPTY_BUFFER
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.text.chars().nth(pos)
    }

    pub fn char_before(&self, pos: usize) -> Option<char> {
        pos.checked_sub(1).and_then(|p| self.char_at(p))
    }

    pub fn last_char(&self) -> Option<char> {
        self.text.chars().last()
    }

    pub fn ends_with_operator(&self) -> bool {
        self.last_char().is_some_and(is_binary_operator)
    }

    fn byte_offset(&self, pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Replace a char range with `s`, clamped to the buffer.
    ///
    /// Collapses to `"0"` when nothing is left. Returns the position right
    /// after the inserted text, or the end of the buffer after a collapse.
    pub fn splice(&mut self, range: Range<usize>, s: &str) -> usize {
        let len = self.len();
        let end = range.end.min(len);
        let start = range.start.min(end);
        let from = self.byte_offset(start);
        let to = self.byte_offset(end);
        self.text.replace_range(from..to, s);
        if self.text.is_empty() {
            self.text.push_str(EMPTY_BUFFER);
            return self.len();
        }
        start + s.chars().count()
    }

    /// Insert text at a char position; returns the position after the insert
    pub fn insert_str(&mut self, pos: usize, s: &str) -> usize {
        self.splice(pos..pos, s)
    }

    /// Remove a char range, clamped to the buffer.
    ///
    /// Returns false if the range was empty after clamping.
    pub fn remove_range(&mut self, range: Range<usize>) -> bool {
        let end = range.end.min(self.len());
        if range.start >= end {
            return false;
        }
        self.splice(range.start..end, "");
        true
    }

    /// Replace the whole text
    pub fn replace(&mut self, text: impl Into<String>) {
        *self = Self::from_text(text);
    }

    /// Start of the run of binary operators that ends at `pos`
    pub fn operator_run_start(&self, pos: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = pos.min(chars.len());
        while start > 0 && is_binary_operator(chars[start - 1]) {
            start -= 1;
        }
        start
    }

    /// End of the run of binary operators that starts at `pos`
    pub fn operator_run_end(&self, pos: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut end = pos.min(chars.len());
        while end < chars.len() && is_binary_operator(chars[end]) {
            end += 1;
        }
        end
    }

    /// Operand segment containing `pos`: the maximal run between binary
    /// operators (or the buffer ends).
    pub fn segment_at(&self, pos: usize) -> Range<usize> {
        let chars: Vec<char> = self.text.chars().collect();
        let pos = pos.min(chars.len());
        let mut start = pos;
        while start > 0 && !is_binary_operator(chars[start - 1]) {
            start -= 1;
        }
        let mut end = pos;
        while end < chars.len() && !is_binary_operator(chars[end]) {
            end += 1;
        }
        start..end
    }

    /// Decimal points in the operand segment containing `pos`
    pub fn segment_points(&self, pos: usize) -> usize {
        let range = self.segment_at(pos);
        self.text
            .chars()
            .skip(range.start)
            .take(range.end - range.start)
            .filter(|c| *c == '.')
            .count()
    }

    /// True if the operand segment at `pos` already contains a decimal point
    pub fn segment_has_point(&self, pos: usize) -> bool {
        self.segment_points(pos) > 0
    }

    /// Editing invariants: at most one `.` per operand segment, and operators
    /// never pile up. The only run allowed is a binary operator followed by a
    /// sign `-`, as in `3*-4`.
    pub fn is_well_formed(&self) -> bool {
        let segments_ok = self
            .text
            .split(is_binary_operator)
            .all(|segment| segment.matches('.').count() <= 1);
        if !segments_ok {
            return false;
        }

        let mut run = 0;
        for ch in self.text.chars() {
            if is_binary_operator(ch) {
                run += 1;
                if run > 2 || (run == 2 && ch != '-') {
                    return false;
                }
            } else {
                run = 0;
            }
        }
        true
    }

    /// Trailing numeric literal: digits with at most one decimal point,
    /// running up to the end of the buffer.
    pub fn trailing_number(&self) -> Option<Range<usize>> {
        let chars: Vec<char> = self.text.chars().collect();
        let end = chars.len();
        let mut start = end;
        let mut seen_point = false;
        while start > 0 {
            let c = chars[start - 1];
            if c.is_ascii_digit() {
                start -= 1;
            } else if c == '.' && !seen_point {
                seen_point = true;
                start -= 1;
            } else {
                break;
            }
        }
        let has_digit = chars[start..end].iter().any(|c| c.is_ascii_digit());
        if has_digit {
            Some(start..end)
        } else {
            None
        }
    }
}

impl Default for ExprBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ExprBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero() {
        let buffer = ExprBuffer::new();
        assert_eq!(buffer.as_str(), "0");
        assert!(buffer.is_zero());
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_from_empty_text() {
        assert_eq!(ExprBuffer::from_text(""), ExprBuffer::new());
    }

    #[test]
    fn test_insert_str() {
        let mut buffer = ExprBuffer::from_text("12");
        let cursor = buffer.insert_str(1, "+");
        assert_eq!(buffer.as_str(), "1+2");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_insert_after_multibyte() {
        let mut buffer = ExprBuffer::from_text("√(9)");
        buffer.insert_str(2, "1");
        assert_eq!(buffer.as_str(), "√(19)");
    }

    #[test]
    fn test_remove_range_collapses() {
        let mut buffer = ExprBuffer::from_text("7");
        assert!(buffer.remove_range(0..1));
        assert_eq!(buffer.as_str(), "0");
    }

    #[test]
    fn test_remove_range_clamped() {
        let mut buffer = ExprBuffer::from_text("123");
        assert!(buffer.remove_range(1..10));
        assert_eq!(buffer.as_str(), "1");
        assert!(!buffer.remove_range(5..9));
    }

    #[test]
    fn test_segment_at() {
        let buffer = ExprBuffer::from_text("12.5+3");
        assert_eq!(buffer.segment_at(2), 0..4);
        assert_eq!(buffer.segment_at(6), 5..6);
        assert!(buffer.segment_has_point(1));
        assert!(!buffer.segment_has_point(6));
    }

    #[test]
    fn test_splice_replaces_range() {
        let mut buffer = ExprBuffer::from_text("3+-4");
        let cursor = buffer.splice(1..3, "*");
        assert_eq!(buffer.as_str(), "3*4");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_operator_run_start() {
        let buffer = ExprBuffer::from_text("3*-");
        assert_eq!(buffer.operator_run_start(3), 1);
        assert_eq!(buffer.operator_run_start(1), 1);
    }

    #[test]
    fn test_operator_run_end() {
        let buffer = ExprBuffer::from_text("3+-4");
        assert_eq!(buffer.operator_run_end(1), 3);
        assert_eq!(buffer.operator_run_end(2), 3);
        assert_eq!(buffer.operator_run_end(0), 0);
    }

    #[test]
    fn test_segment_points() {
        let buffer = ExprBuffer::from_text("1.5+2");
        assert_eq!(buffer.segment_points(1), 1);
        assert_eq!(buffer.segment_points(5), 0);
    }

    #[test]
    fn test_well_formed() {
        for text in ["0", "3+4", "3*-4", "3--4", "3+-", "1.5+2.5", "(2)*0.", "-4"] {
            assert!(ExprBuffer::from_text(text).is_well_formed(), "{text}");
        }
        for text in ["3-+4", "3+*", "3*--4", "1.52.5", "1..2", "2.5(1.5"] {
            assert!(!ExprBuffer::from_text(text).is_well_formed(), "{text}");
        }
    }

    #[test]
    fn test_trailing_number() {
        assert_eq!(ExprBuffer::from_text("3+12.5").trailing_number(), Some(2..6));
        assert_eq!(ExprBuffer::from_text("3+").trailing_number(), None);
        assert_eq!(ExprBuffer::from_text("sin(3)").trailing_number(), None);
        assert_eq!(ExprBuffer::from_text("1.2.3").trailing_number(), Some(2..5));
    }
}
