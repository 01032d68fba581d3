//! Greedy word wrapping against an approximate text width.
//!
//! Widths are estimated with a flat per-character factor. That is deliberately
//! not text shaping: the estimate only drives line breaking and pagination,
//! glyph placement is the viewer's concern.

/// Rough average glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;

pub fn approx_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * CHAR_WIDTH_FACTOR
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Input is split on `\n` first; a blank input line is preserved as an empty
/// output line. A single word wider than `max_width` gets a line of its own.
pub fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 {
        return text.lines().map(|s| s.to_string()).collect();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let test_line = if current_line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current_line, word)
            };

            if approx_text_width(&test_line, font_size) > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = word.to_string();
            } else {
                current_line = test_line;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("hello world", 12.0, 500.0);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        // 12pt * 0.6 = 7.2pt per char; 60pt fits 8 chars.
        let lines = wrap_text("aaa bbb ccc ddd", 12.0, 60.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn oversized_word_gets_own_line() {
        let lines = wrap_text("tiny incomprehensibilities tiny", 12.0, 60.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "incomprehensibilities");
    }

    #[test]
    fn blank_lines_are_preserved() {
        let lines = wrap_text("first\n\nsecond", 12.0, 500.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        let lines = wrap_text("a    b\tc", 12.0, 500.0);
        assert_eq!(lines, vec!["a b c"]);
    }

    #[test]
    fn zero_width_returns_raw_lines() {
        let lines = wrap_text("a b\nc d", 12.0, 0.0);
        assert_eq!(lines, vec!["a b", "c d"]);
    }
}
