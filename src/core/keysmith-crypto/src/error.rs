//! Cryptographic error types.

use thiserror::Error;

/// Errors raised by the cryptography provider.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The random source could not produce bytes.
    #[error("random source failed: {0}")]
    RandomSource(String),

    /// A buffer for the requested amount of key material could not be
    /// allocated.
    #[error("cannot allocate {0} bytes of key material")]
    AllocationFailed(usize),

    /// Key generation failed.
    #[error("key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Key export to DER failed.
    #[error("key export failed: {0}")]
    ExportFailed(String),

    /// The requested algorithm or parameter combination is not supported.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
