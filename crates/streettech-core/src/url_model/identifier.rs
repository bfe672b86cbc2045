//! Identifier token extraction.

/// Characters that end the identifier token.
const TERMINATORS: [char; 4] = ['&', '\n', '?', '#'];

/// Returns the leading token of `rest` up to the first terminator, or `None`
/// if the token would be empty.
pub fn leading_token(rest: &str) -> Option<&str> {
    let end = rest.find(TERMINATORS).unwrap_or(rest.len());
    let token = &rest[..end];
    (!token.is_empty()).then_some(token)
}
