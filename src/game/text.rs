//! Layout helpers: greedy word wrap and the attempts gauge.

use super::state::MAX_ATTEMPTS;

pub const FILLED_GEM: char = '◆';
pub const EMPTY_GEM: char = '◇';

/// Attempts gauge: one filled gem per attempt left, empty gems for the rest.
///
/// Always exactly [`MAX_ATTEMPTS`] glyphs wide.
pub fn gems_display(attempts_left: u32) -> String {
    let filled = attempts_left.min(MAX_ATTEMPTS) as usize;
    let empty = MAX_ATTEMPTS as usize - filled;
    std::iter::repeat(FILLED_GEM)
        .take(filled)
        .chain(std::iter::repeat(EMPTY_GEM).take(empty))
        .collect()
}

/// Greedy word wrap at `max_width` characters.
///
/// A word joins the current line when the line, a space and the word fit;
/// otherwise the line is flushed and the word starts the next one. Words are
/// never split, so a single word wider than `max_width` gets a line to itself.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_is_always_full_width() {
        for left in 0..=MAX_ATTEMPTS {
            let gauge = gems_display(left);
            assert_eq!(gauge.chars().count(), MAX_ATTEMPTS as usize);
            assert_eq!(
                gauge.chars().filter(|&c| c == FILLED_GEM).count(),
                left as usize
            );
            assert_eq!(
                gauge.chars().filter(|&c| c == EMPTY_GEM).count(),
                (MAX_ATTEMPTS - left) as usize
            );
        }
        assert_eq!(gems_display(3), "◆◆◆◇◇");
        assert_eq!(gems_display(99), "◆◆◆◆◆");
    }

    #[test]
    fn wraps_at_width() {
        let lines = wrap_text("What has keys but no locks, space but no room?", 16);
        assert_eq!(
            lines,
            vec!["What has keys", "but no locks,", "space but no", "room?"]
        );
    }

    #[test]
    fn exact_fit_stays_on_line() {
        assert_eq!(wrap_text("abc def", 7), vec!["abc def"]);
        assert_eq!(wrap_text("abc def", 6), vec!["abc", "def"]);
    }

    #[test]
    fn overlong_word_is_not_split() {
        assert_eq!(
            wrap_text("a phantasmagorical b", 5),
            vec!["a", "phantasmagorical", "b"]
        );
    }

    #[test]
    fn empty_text_yields_no_lines() {
        assert!(wrap_text("", 58).is_empty());
        assert!(wrap_text("   ", 58).is_empty());
    }

    #[test]
    fn wrapping_preserves_words_and_width() {
        let text = "Tell me, traveller, what walks the halls of Black Manor at \
                    midnight yet leaves no footprint upon the dust, speaks in \
                    every room yet owns no tongue, and grows the louder the \
                    more you try to silence it?";
        for width in [10, 24, 40, 58, 80] {
            let lines = wrap_text(text, width);
            assert!(lines.iter().all(|l| l.chars().count() <= width));
            let rejoined = lines.join(" ");
            let original: Vec<&str> = text.split_whitespace().collect();
            assert_eq!(rejoined.split(' ').collect::<Vec<_>>(), original);
        }
    }
}
