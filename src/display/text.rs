//! Width-aware text helpers. All widths are terminal columns, so wide
//! glyphs (Malayalam conjuncts, emoji) are measured with `unicode-width`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Longest prefix of `text` that fits in `max_width` columns.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

pub fn pad_right(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let fill = width.saturating_sub(display_width(&text));
    format!("{text}{}", " ".repeat(fill))
}

pub fn pad_left(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let fill = width.saturating_sub(display_width(&text));
    format!("{}{text}", " ".repeat(fill))
}

pub fn center(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let fill = width.saturating_sub(display_width(&text));
    let left = fill / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(fill - left))
}

/// Greedy word wrap. Embedded newlines always break; words longer than
/// `width` are cut.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate_width = if current.is_empty() {
                display_width(word)
            } else {
                display_width(&current) + 1 + display_width(word)
            };

            if candidate_width <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            let mut rest = word.to_string();
            while display_width(&rest) > width {
                let head = truncate_to_width(&rest, width);
                if head.is_empty() {
                    break;
                }
                rest = rest[head.len()..].to_string();
                lines.push(head);
            }
            current = rest;
        }
        lines.push(current);
    }

    lines
}

/// Score as shown on screen: whole numbers without a fraction, others with
/// at most two decimals.
pub fn format_score(value: f64) -> String {
    if !value.is_finite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let formatted = format!("{value:.2}");
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_wide_glyphs() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("🎤🎤🎤", 5), "🎤🎤");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }

    #[test]
    fn test_padding() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("ab", 4), "  ab");
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(pad_right("abcdef", 3), "abc");
        assert_eq!(display_width(&pad_right("🎤", 4)), 4);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("Painting venue changed to Main Auditorium", 16),
            vec!["Painting venue", "changed to Main", "Auditorium"]
        );
        assert_eq!(wrap_text("Group\nSong", 20), vec!["Group", "Song"]);
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(8.0), "8");
        assert_eq!(format_score(7.5), "7.5");
        assert_eq!(format_score(0.1 + 0.2), "0.3");
        assert_eq!(format_score(-2.0), "-2");
        assert_eq!(format_score(f64::INFINITY), "∞");
    }
}
