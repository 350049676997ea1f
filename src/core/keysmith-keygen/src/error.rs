//! Key generation error types.

use keysmith_codec::CodecError;
use keysmith_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while generating key material.
///
/// Every error is terminal for the call that produced it: no partial output
/// is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A configuration field is outside its valid domain.
    ///
    /// Always raised before any randomness is drawn.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The key kind identifier is not one of the supported kinds.
    #[error("unsupported key kind: {0}")]
    UnsupportedKeyKind(String),

    /// PEM input could not be decoded.
    #[error("malformed PEM: {0}")]
    MalformedPem(String),

    /// The cryptography provider rejected the request or failed.
    #[error("provider failure: {0}")]
    ProviderFailure(#[from] CryptoError),

    /// A background generation task panicked or was cancelled.
    #[error("generation task failed: {0}")]
    TaskFailed(String),
}

impl GenerationError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

impl From<CodecError> for GenerationError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::MalformedPem(msg) | CodecError::InvalidBase64(msg) => {
                Self::MalformedPem(msg)
            },
            CodecError::SshStringTooLong(len) => {
                Self::invalid("key_blob", format!("{len} bytes exceeds SSH string limit"))
            },
        }
    }
}
