//! Generated key output.

use std::fmt;

use zeroize::Zeroizing;

/// The final product of a generation request.
///
/// Most kinds produce text (possibly several lines: PEM blocks, a public-key
/// line, a fingerprint). Encryption keys requested in `raw` format produce
/// the key bytes themselves; callers that need to display them must request
/// `hex` or `base64` instead.
pub enum GeneratedKey {
    /// Encoded text.
    Text(String),
    /// Raw key bytes, zeroized on drop.
    Raw(Zeroizing<Vec<u8>>),
}

impl GeneratedKey {
    /// Returns the text, or `None` for raw output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Raw(_) => None,
        }
    }

    /// Consumes the key and returns the text, or `None` for raw output.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Raw(_) => None,
        }
    }

    /// Returns the output as bytes: the UTF-8 text, or the raw key.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Raw(bytes) => bytes,
        }
    }

    /// Whether this is raw byte output.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl fmt::Debug for GeneratedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (variant, len) = match self {
            Self::Text(text) => ("Text", text.len()),
            Self::Raw(bytes) => ("Raw", bytes.len()),
        };
        f.debug_struct("GeneratedKey")
            .field("variant", &variant)
            .field("len", &len)
            .field("content", &"[REDACTED]")
            .finish()
    }
}
