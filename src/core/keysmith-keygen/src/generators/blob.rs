//! Random base64 blobs.

use keysmith_codec::base64_encode;
use keysmith_crypto::CryptoProvider;
use tracing::debug;

use crate::config::Base64Config;
use crate::error::GenerationError;

/// Generates `byte_length` random bytes as base64.
pub fn generate(
    provider: &CryptoProvider,
    config: &Base64Config,
) -> Result<String, GenerationError> {
    debug!(byte_length = config.byte_length, url_safe = config.url_safe, "Generating base64 blob");

    let bytes = provider.random_bytes(config.byte_length)?;
    Ok(base64_encode(&bytes, config.url_safe))
}
