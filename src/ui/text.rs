//! Single-line text fitting.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Fit `text` on one line of `width` columns.
///
/// Line breaks and other control characters become spaces, and text wider
/// than `width` is cut with a trailing ellipsis. The result is never wider
/// than `width`.
pub fn single_line(text: &str, width: usize) -> Cow<'_, str> {
    let text: Cow<'_, str> = if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    };

    if text.width() <= width {
        return text;
    }
    if width == 0 {
        return Cow::Borrowed("");
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::with_capacity(budget + ELLIPSIS.len_utf8());
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(single_line("The Way of Ging", 20), "The Way of Ging");
        assert_eq!(single_line("", 5), "");
    }

    #[test]
    fn test_long_text_gets_ellipsis() {
        let fitted = single_line("The Way of Ging", 8);
        assert_eq!(fitted, "The Way…");
        assert_eq!(fitted.width(), 8);
    }

    #[test]
    fn test_wide_chars_respect_width() {
        // Each of these is two columns wide
        let fitted = single_line("電気王子電気王子", 7);
        assert!(fitted.width() <= 7);
        assert!(fitted.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_newlines_flattened() {
        assert_eq!(single_line("Electric\nPrince", 40), "Electric Prince");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(single_line("anything", 0), "");
    }
}
