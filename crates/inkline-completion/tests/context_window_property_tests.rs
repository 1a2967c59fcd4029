//! Property-based tests for bounded context window extraction

use inkline_completion::{truncated_prefix, truncated_suffix};
use proptest::prelude::*;

proptest! {
    /// Extracted window lengths never exceed the configured limits or the
    /// available text on the respective side of the cursor.
    #[test]
    fn prop_window_lengths_are_bounded(
        text in ".{0,200}",
        offset in 0usize..250,
        max_prefix in 0usize..64,
        max_suffix in 0usize..64,
    ) {
        let total = text.chars().count();
        let before = offset.min(total);
        let after = total - before;

        let prefix = truncated_prefix(&text, offset, max_prefix);
        let suffix = truncated_suffix(&text, offset, max_suffix);

        prop_assert!(prefix.chars().count() <= max_prefix.min(before));
        prop_assert!(suffix.chars().count() <= max_suffix.min(after));
    }

    /// The extracted substrings are exactly the characters adjacent to the
    /// cursor: prefix ++ suffix re-forms a contiguous slice around it with
    /// no gaps and no reordering.
    #[test]
    fn prop_windows_are_contiguous_around_cursor(
        text in ".{0,200}",
        offset in 0usize..250,
        max_prefix in 0usize..64,
        max_suffix in 0usize..64,
    ) {
        let chars: Vec<char> = text.chars().collect();
        let cursor = offset.min(chars.len());

        let prefix = truncated_prefix(&text, offset, max_prefix);
        let suffix = truncated_suffix(&text, offset, max_suffix);

        let prefix_len = prefix.chars().count();
        let suffix_len = suffix.chars().count();

        let expected: String = chars[cursor - prefix_len..cursor + suffix_len]
            .iter()
            .collect();
        prop_assert_eq!(format!("{prefix}{suffix}"), expected);
    }

    /// Limits at least as large as the text always yield everything on the
    /// respective side of the cursor.
    #[test]
    fn prop_large_limits_yield_full_context(
        text in ".{0,100}",
        offset in 0usize..120,
    ) {
        let chars: Vec<char> = text.chars().collect();
        let cursor = offset.min(chars.len());

        let prefix = truncated_prefix(&text, offset, chars.len() + 1);
        let suffix = truncated_suffix(&text, offset, chars.len() + 1);

        prop_assert_eq!(prefix, chars[..cursor].iter().collect::<String>());
        prop_assert_eq!(suffix, chars[cursor..].iter().collect::<String>());
    }
}
