//! Keyword normalization shared by index construction and query scoring.
//!
//! Both sides of a lookup must go through [`tokenize`]; the inverted index is keyed
//! on its output, so any divergence silently breaks exact matching.


use crate::constants::{MIN_WORD_LENGTH, STOP_WORDS};

/// Splits `text` into lowercase keywords.
///
/// Anything that is neither a word character (alphanumeric or `_`) nor whitespace
/// becomes a separator. Tokens shorter than [`MIN_WORD_LENGTH`] characters and
/// [`STOP_WORDS`] are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if is_word_char(c) || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_WORD_LENGTH)
        .filter(|token| !is_stop_word(token))
        .map(str::to_owned)
        .collect()
}

/// Tokenizes an optional string; `None` yields no keywords.
pub fn tokenize_opt(text: Option<&str>) -> Vec<String> {
    text.map(tokenize).unwrap_or_default()
}

/// Returns `true` if `token` is in [`STOP_WORDS`].
#[inline]
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
