//! Percent-escaping helpers for the share token.
//!
//! Base64 works on bytes, but names may hold any Unicode text. Text is first
//! expanded into a single-byte intermediate (UTF-8 percent escapes with each
//! `%XX` turned back into its raw byte) and collapsed the same way in
//! reverse on decode.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode, utf8_percent_encode};

/// Characters left alone by URI-component escaping: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
pub const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Characters left alone by legacy byte escaping: `A-Z a-z 0-9 @ * _ + - . /`
const BYTE_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'*')
    .remove(b'_')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'/');

/// Error type for unescaping
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EscapeError {
    #[error("malformed percent escape at byte {0}")]
    Malformed(usize),
    #[error("unescaped text is not valid UTF-8")]
    NotUtf8,
}

/// Percent-escape text as a URI component
pub fn escape_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Reverse [`escape_component`]. Every `%` must start a two-digit hex escape
/// and the result must be UTF-8.
pub fn unescape_component(text: &str) -> Result<String, EscapeError> {
    check_escapes(text)?;
    percent_decode_str(text)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| EscapeError::NotUtf8)
}

/// Expand text into its single-byte intermediate form
pub fn expand_bytes(text: &str) -> Vec<u8> {
    let escaped = escape_component(text);
    percent_decode_str(&escaped).collect()
}

/// Collapse a single-byte intermediate back into text
pub fn collapse_bytes(bytes: &[u8]) -> Result<String, EscapeError> {
    let escaped = percent_encode(bytes, BYTE_ESCAPE).to_string();
    unescape_component(&escaped)
}

fn check_escapes(text: &str) -> Result<(), EscapeError> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(EscapeError::Malformed(i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
