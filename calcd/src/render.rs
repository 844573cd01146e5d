//! Text rendering of the calculator display

use calc_core::CalculatorSession;

/// Right-align `text` in `width` columns, dropping leading characters when
/// it does not fit
pub fn fit_display(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        text.chars().skip(len - width).collect()
    } else {
        format!("{text:>width$}")
    }
}

/// One display frame: mode tag, then the fitted display text
pub fn render_frame(session: &CalculatorSession, width: usize) -> String {
    format!(
        "[{}] {}",
        session.mode().as_str(),
        fit_display(session.display_text(), width)
    )
}
