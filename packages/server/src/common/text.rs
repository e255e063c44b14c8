/// Display-length cap for labels (buttons, dropdown options).
pub const DISPLAY_LIMIT: usize = 100;

/// Truncate to at most `max` characters, never splitting a code point.
///
/// Presentation only: values used for matching or storage are never truncated.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_are_untouched() {
        assert_eq!(truncate_chars("No_3", DISPLAY_LIMIT), "No_3");
    }

    #[test]
    fn long_strings_are_cut_on_char_boundaries() {
        let thai = "เควส".repeat(30);
        let cut = truncate_chars(&thai, DISPLAY_LIMIT);
        assert_eq!(cut.chars().count(), DISPLAY_LIMIT);
        assert!(thai.starts_with(cut));
    }
}
