//! API keys: UUID v4, nanoid and prefixed nanoid.

use keysmith_crypto::CryptoProvider;
use tracing::debug;
use uuid::Builder;

use crate::alphabet::{self, NANOID};
use crate::config::{ApiKeyConfig, PREFIXED_KEY_LENGTH};
use crate::error::GenerationError;

/// Generates an API key.
pub fn generate(
    provider: &CryptoProvider,
    config: &ApiKeyConfig,
) -> Result<String, GenerationError> {
    debug!(config = ?config, "Generating API key");

    match config {
        ApiKeyConfig::Uuid => uuid_v4(provider),
        ApiKeyConfig::Nanoid { length, unbiased } => nanoid(provider, *length, *unbiased),
        ApiKeyConfig::Prefixed { prefix, unbiased } => {
            let id = nanoid(provider, PREFIXED_KEY_LENGTH, *unbiased)?;
            Ok(format!("{prefix}{id}"))
        },
    }
}

/// A lowercase, hyphenated version 4 UUID built from 16 provider bytes.
fn uuid_v4(provider: &CryptoProvider) -> Result<String, GenerationError> {
    let mut bytes = [0u8; 16];
    provider.fill_random(&mut bytes)?;
    Ok(Builder::from_random_bytes(bytes).into_uuid().hyphenated().to_string())
}

/// `length` characters over `A-Za-z0-9_-`.
///
/// 64 divides 256, so byte mod 64 is already uniform; `unbiased` selects
/// rejection sampling anyway for symmetry with the alphanumeric secret.
fn nanoid(
    provider: &CryptoProvider,
    length: usize,
    unbiased: bool,
) -> Result<String, GenerationError> {
    if unbiased {
        return Ok(alphabet::map_rejection(provider, length, NANOID)?);
    }
    let bytes = provider.random_bytes(length)?;
    Ok(alphabet::map_modulo(&bytes, NANOID))
}
