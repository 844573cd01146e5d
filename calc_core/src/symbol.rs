//! Presentation glyph normalization
//!
//! Keypads show typographic operators (`÷`, `×`, `−`); the editor and the
//! evaluator only ever see ASCII `/ * -`.

/// Map one presentation token to its canonical form.
///
/// Unknown tokens pass through unchanged.
pub fn normalize(token: &str) -> &str {
    match token {
        "÷" => "/",
        "×" | "·" | "∗" => "*",
        "−" | "–" | "‒" | "﹣" | "－" => "-",
        other => other,
    }
}

/// Map a single glyph to its canonical character
pub fn normalize_char(ch: char) -> char {
    match ch {
        '÷' => '/',
        '×' | '·' | '∗' => '*',
        '\u{2212}' | '\u{2013}' | '\u{2012}' | '\u{FE63}' | '\u{FF0D}' => '-',
        other => other,
    }
}

/// Normalize every glyph in a string
pub fn normalize_text(text: &str) -> String {
    text.chars().map(normalize_char).collect()
}

/// Binary operators in canonical form. `-` doubles as unary minus.
pub fn is_binary_operator(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '^')
}
