//! Keep player guesses and model replies on a single log line.

/// Characters of text shown before the preview is cut.
const MAX_PREVIEW: usize = 160;

/// Render `text` for a log line: control characters and backslashes use
/// Rust escape syntax, and anything past [`MAX_PREVIEW`] characters is
/// replaced by an ellipsis.
pub fn escape_log(text: &str) -> String {
    let mut out = String::with_capacity(text.len().min(MAX_PREVIEW) + 8);
    for ch in text.chars().take(MAX_PREVIEW) {
        if ch.is_control() || ch == '\\' {
            out.extend(ch.escape_default());
        } else {
            out.push(ch);
        }
    }
    if text.chars().nth(MAX_PREVIEW).is_some() {
        out.push('…');
    }
    out
}
