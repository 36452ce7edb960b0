//! Grammar constants and literal token escaping.
//!
//! ```text
//! reference := "n" resource reference
//!            | "v" resource tpath resource
//!            | "w" resource tpath resource resource
//! resource  := "0" lit lit lit | "1" store-and-id
//!            | "2" code | "3" lit | "4" code lit      (classpath)
//!            | "5" code | "6" lit | "7" code lit      (repository path)
//! tpath     := "h" code | "r" | "l" lit | "m" code lit
//! ```

use std::borrow::Cow;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Separates tokens on the wire.
pub const DELIMITER: char = '-';

/// Token standing for the empty string.
pub const EMPTY_LITERAL: &str = "!";

/// Bytes escaped inside literal tokens, on top of all non-ASCII bytes.
const LITERAL_ESCAPES: &AsciiSet = &CONTROLS.add(b'-').add(b'%').add(b'!');

/// Protocol codes, the first token of every reference.
pub mod protocol {
    pub const NODE: &str = "n";
    pub const VIRTUAL: &str = "v";
    pub const VANILLA: &str = "w";
}

/// Resource production codes.
pub mod resource {
    /// Protocol, identifier and local id as three literals.
    pub const LITERAL_LOCATOR: &str = "0";
    /// Hashed store followed by the re-encoded local id, one token.
    pub const HASHED_LOCATOR: &str = "1";
    pub const HASHED_CLASSPATH: &str = "2";
    pub const LITERAL_CLASSPATH: &str = "3";
    pub const MIXED_CLASSPATH: &str = "4";
    pub const HASHED_PATH: &str = "5";
    pub const LITERAL_PATH: &str = "6";
    pub const MIXED_PATH: &str = "7";
}

/// Template path production codes.
pub mod template_path {
    pub const HASHED: &str = "h";
    /// The root path; no payload.
    pub const ROOT: &str = "r";
    pub const LITERAL: &str = "l";
    pub const MIXED: &str = "m";
}

/// Split a wire string into tokens. The empty string has no tokens.
pub fn tokenize(input: &str) -> Vec<&str> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split(DELIMITER).collect()
}

/// Escape arbitrary text into a single ASCII token.
pub fn escape_literal(text: &str) -> Cow<'_, str> {
    if text.is_empty() {
        return Cow::Borrowed(EMPTY_LITERAL);
    }
    utf8_percent_encode(text, LITERAL_ESCAPES).into()
}

/// Reverse [`escape_literal`]. Only canonical escapes are accepted, so every
/// literal has exactly one spelling on the wire.
pub fn unescape_literal(token: &str) -> Result<String, String> {
    if token == EMPTY_LITERAL {
        return Ok(String::new());
    }
    if token.is_empty() {
        return Err("empty token".into());
    }
    let text = percent_decode_str(token)
        .decode_utf8()
        .map_err(|e| format!("escaped bytes are not UTF-8: {e}"))?;
    if escape_literal(&text) != token {
        return Err("non-canonical escaping".into());
    }
    Ok(text.into_owned())
}
