//! Codec error types.

use thiserror::Error;

/// Errors that can occur while decoding text encodings.
#[derive(Debug, Error)]
pub enum CodecError {
    /// PEM input lacks a BEGIN/END pair or its body is not valid base64.
    #[error("malformed PEM: {0}")]
    MalformedPem(String),

    /// Input is not valid standard base64.
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    /// Value does not fit in an SSH `string` (u32 length prefix).
    #[error("value too long for SSH string: {0} bytes")]
    SshStringTooLong(usize),
}
