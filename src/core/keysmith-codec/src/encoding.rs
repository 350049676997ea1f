//! Base64 and hex encodings.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};

use crate::error::CodecError;

/// Encodes bytes as RFC 4648 base64.
///
/// With `url_safe`, the URL-safe alphabet (`-` and `_` in place of `+` and
/// `/`) is used and padding is omitted.
pub fn base64_encode(bytes: &[u8], url_safe: bool) -> String {
    if url_safe {
        URL_SAFE_NO_PAD.encode(bytes)
    } else {
        STANDARD.encode(bytes)
    }
}

/// Decodes standard, padded base64.
///
/// # Errors
///
/// Returns [`CodecError::InvalidBase64`] on any character outside the standard
/// alphabet or incorrect padding.
pub fn base64_decode(text: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(text)
        .map_err(|e| CodecError::InvalidBase64(e.to_string()))
}

/// Encodes bytes as lowercase hexadecimal, two characters per byte.
pub fn hex_encode(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
