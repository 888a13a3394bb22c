//! Tokenizer for Intcode program text.

use intcode_common::Cell;

/// Split text into candidate number tokens.
///
/// A token is a maximal run of ASCII digits and `-`. Everything else is a
/// separator.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_ascii_digit() || c == '-'))
        .filter(|token| !token.is_empty())
}

/// Parse a token as a cell, or `None` if it is not a well-formed i64.
pub(crate) fn parse_token(token: &str) -> Option<Cell> {
    token.parse().ok()
}
