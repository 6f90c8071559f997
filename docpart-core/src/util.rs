//! Utility functions shared across the workspace

/// Safely truncates a string to a maximum number of characters.
///
/// Respects utf8 character boundaries.
pub fn safe_truncate_utf8(s: impl AsRef<str>, max_chars: usize) -> String {
    s.as_ref().chars().take(max_chars).collect()
}

/// Debug print a long string by truncating to n characters
///
/// # Example
///
/// ```
/// # use docpart_core::util::debug_long_utf8;
/// let s = debug_long_utf8("abc".repeat(100), 3);
///
/// assert_eq!(s, "abc (300)");
/// ```
pub fn debug_long_utf8(s: impl AsRef<str>, max_chars: usize) -> String {
    let trunc = safe_truncate_utf8(&s, max_chars);

    format!("{} ({})", trunc, s.as_ref().chars().count())
}
