//! Answer matching for open-text Learn Mode answers.

/// Compare a typed answer to the correct answer after normalization.
///
/// Case and punctuation are ignored. Whitespace is only trimmed at the ends,
/// so `"new  york"` and `"new york"` are different answers.
pub fn check_answer(user_answer: &str, correct_answer: &str) -> bool {
    normalize_answer(user_answer) == normalize_answer(correct_answer)
}

/// Lowercase, trim, then drop everything that is not `[A-Za-z0-9_]` or whitespace.
pub fn normalize_answer(s: &str) -> String {
    s.to_lowercase()
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
