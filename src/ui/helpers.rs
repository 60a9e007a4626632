//! Shared rendering utilities.
//!
//! All text measurements here are in chars, not bytes, so titles with
//! multi-byte characters line up and highlight correctly.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row` and `col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` chars, ending in "..." when it had to cut.
///
/// # Example
///
/// ```rust
/// use zcatalog::ui::helpers::truncate;
///
/// assert_eq!(truncate("Desk Lamp", 20), "Desk Lamp");
/// assert_eq!(truncate("Desk Lamp", 7), "Desk...");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 3).collect();
    cut.push_str("...");
    cut
}

/// Splits `text` into `(segment, highlighted)` runs following `ranges`.
///
/// Ranges past the end of the text are clipped and overlapping or unordered
/// ranges are ignored, so a title truncated after highlighting stays safe.
#[must_use]
pub fn split_highlights(text: &str, ranges: &[(usize, usize)]) -> Vec<(String, bool)> {
    let chars: Vec<char> = text.chars().collect();
    let mut segments = Vec::new();
    let mut pos = 0;

    for &(start, end) in ranges {
        let end = end.min(chars.len());
        if start < pos || start >= end {
            continue;
        }
        if start > pos {
            segments.push((chars[pos..start].iter().collect(), false));
        }
        segments.push((chars[start..end].iter().collect(), true));
        pos = end;
    }

    if pos < chars.len() {
        segments.push((chars[pos..].iter().collect(), false));
    }
    segments
}

/// Prints `text` with `ranges` in the match highlight colors.
///
/// Selected rows skip highlighting so the selection colors stay intact.
pub fn render_highlighted_text(
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    for (segment, highlighted) in split_highlights(text, ranges) {
        if highlighted {
            print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
            print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
            print!("{segment}");
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{segment}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_around_a_range() {
        assert_eq!(
            split_highlights("Red Shoes", &[(4, 7)]),
            vec![
                ("Red ".to_string(), false),
                ("Sho".to_string(), true),
                ("es".to_string(), false),
            ]
        );
    }

    #[test]
    fn clips_ranges_beyond_the_text() {
        assert_eq!(
            split_highlights("Desk...", &[(5, 12)]),
            vec![("Desk.".to_string(), false), ("..".to_string(), true)]
        );
        assert_eq!(split_highlights("abc", &[(7, 9)]), vec![("abc".to_string(), false)]);
    }

    #[test]
    fn truncation_counts_chars() {
        assert_eq!(truncate("Café au lait", 7), "Café...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
