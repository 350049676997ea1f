//! Generic random secrets.

use keysmith_codec::{base64_encode, hex_encode};
use keysmith_crypto::CryptoProvider;
use tracing::debug;

use crate::alphabet::{self, ALPHANUMERIC};
use crate::config::{SecretConfig, SecretFormat};
use crate::error::GenerationError;

/// Generates `length` random bytes and encodes them per `format`.
///
/// Alphanumeric output has one character per byte, mapped by byte mod 62
/// unless `unbiased` is set.
pub fn generate(
    provider: &CryptoProvider,
    config: &SecretConfig,
) -> Result<String, GenerationError> {
    debug!(length = config.length, format = ?config.format, "Generating secret");

    let text = match config.format {
        SecretFormat::Hex => hex_encode(&provider.random_bytes(config.length)?),
        SecretFormat::Base64 => base64_encode(&provider.random_bytes(config.length)?, false),
        SecretFormat::Alphanumeric if config.unbiased => {
            alphabet::map_rejection(provider, config.length, ALPHANUMERIC)?
        },
        SecretFormat::Alphanumeric => {
            alphabet::map_modulo(&provider.random_bytes(config.length)?, ALPHANUMERIC)
        },
    };

    Ok(text)
}
