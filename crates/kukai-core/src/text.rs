//! Plain-text helpers applied to user input before it is stored or listed.

/// Longest comment a voter may attach to one pick, in characters.
pub const COMMENT_MAX_CHARS: usize = 300;

/// Characters of verse shown next to an entry number on the voting sheet.
pub const SNIPPET_CHARS: usize = 30;

/// Trim a ballot comment and cut it to [`COMMENT_MAX_CHARS`].
///
/// Over-long comments are truncated rather than rejected. Blank comments
/// become `None`.
pub fn truncate_comment(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(COMMENT_MAX_CHARS).collect())
}

/// Single-line preview of a verse: whitespace runs collapse to one space,
/// then the first `max_chars` characters are kept.
pub fn entry_snippet(body: &str, max_chars: usize) -> String {
    let mut out = String::new();
    let mut in_space = false;
    for c in body.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out.chars().take(max_chars).collect()
}
