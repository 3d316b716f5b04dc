//! Bounded excerpts of extracted text for downstream consumers.

/// Characters of document text sent as context with a chat message.
pub const CHAT_CONTEXT_CHARS: usize = 3000;

/// Characters of document text sent alongside a question in an analysis
/// request.
pub const QUESTION_CONTEXT_CHARS: usize = 2000;

/// The first `max_chars` characters of `text`.
///
/// Cuts on a character boundary, so multi-byte characters are never split.
///
/// ```
/// use rawpdf::render::excerpt;
///
/// assert_eq!(excerpt("préavis", 3), "pré");
/// assert_eq!(excerpt("bail", 10), "bail");
/// ```
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
