//! Truncation to the overall message ceiling.

/// Return the first `total_limit` characters of `text`.
///
/// The cut is a hard prefix cut on a character boundary; it never looks
/// for whitespace. Text already within the ceiling is returned unchanged.
///
/// # Example
///
/// ```
/// use meshchunk_protocol::chunking::truncate;
///
/// assert_eq!(truncate("hello world", 5), "hello");
/// assert_eq!(truncate("hi", 5), "hi");
/// ```
pub fn truncate(text: &str, total_limit: usize) -> &str {
    match text.char_indices().nth(total_limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
