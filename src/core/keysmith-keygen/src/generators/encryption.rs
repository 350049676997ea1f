//! Symmetric encryption keys.

use keysmith_codec::{base64_encode, hex_encode};
use keysmith_crypto::CryptoProvider;
use tracing::debug;

use crate::config::{EncryptionConfig, EncryptionFormat};
use crate::error::GenerationError;
use crate::output::GeneratedKey;

/// Generates a key sized for the configured cipher.
///
/// `raw` format returns the key bytes unencoded.
pub fn generate(
    provider: &CryptoProvider,
    config: &EncryptionConfig,
) -> Result<GeneratedKey, GenerationError> {
    let len = config.algorithm.key_len();
    debug!(
        algorithm = ?config.algorithm,
        len,
        format = ?config.format,
        "Generating encryption key"
    );

    let bytes = provider.random_bytes(len)?;

    Ok(match config.format {
        EncryptionFormat::Hex => GeneratedKey::Text(hex_encode(&bytes)),
        EncryptionFormat::Base64 => GeneratedKey::Text(base64_encode(&bytes, false)),
        EncryptionFormat::Raw => GeneratedKey::Raw(bytes),
    })
}
