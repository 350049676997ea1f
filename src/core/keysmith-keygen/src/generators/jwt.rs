//! JWT signing material.

use keysmith_codec::base64_encode;
use keysmith_crypto::CryptoProvider;
use tracing::debug;

use super::ssl;
use crate::config::{JwtConfig, SslConfig};
use crate::error::GenerationError;

/// RSA modulus used for RS256 keypairs.
pub const RS256_KEY_SIZE: usize = 2048;

/// Generates an HMAC secret (base64) for HS256/384/512, or a 2048-bit RSA
/// keypair for RS256 rendered exactly like a TLS keypair.
pub fn generate(provider: &CryptoProvider, config: &JwtConfig) -> Result<String, GenerationError> {
    debug!(algorithm = ?config.algorithm, "Generating JWT signing material");

    match config.algorithm.hmac_secret_len() {
        Some(len) => {
            let bytes = provider.random_bytes(len)?;
            Ok(base64_encode(&bytes, false))
        },
        None => ssl::generate(
            provider,
            &SslConfig::Rsa {
                key_size: RS256_KEY_SIZE,
            },
        ),
    }
}
