//! TLS keypairs: PKCS#8 private key, SPKI public key and fingerprint.

use keysmith_codec::sha256_colon_hex;
use keysmith_crypto::{CryptoProvider, KeypairSpec};
use tracing::debug;

use super::{export_pem_pair, ssh};
use crate::config::SslConfig;
use crate::error::GenerationError;

/// Generates a TLS keypair.
///
/// RSA and ECDSA produce
/// `{private PEM}\n\n{public PEM}\n\nFingerprint (SHA-256): {fingerprint}`,
/// where the fingerprint is taken over the SPKI DER. Ed25519 is rendered
/// exactly as an SSH Ed25519 key.
pub fn generate(provider: &CryptoProvider, config: &SslConfig) -> Result<String, GenerationError> {
    let spec = match config {
        SslConfig::Rsa { key_size } => KeypairSpec::rsa(*key_size),
        SslConfig::Ecdsa { curve } => KeypairSpec::Ecdsa(*curve),
        SslConfig::Ed25519(options) => return ssh::generate_ed25519(provider, options),
    };

    let keypair = provider.generate_keypair(spec)?;
    let pair = export_pem_pair(&keypair)?;
    let fingerprint = sha256_colon_hex(&pair.spki_der);

    debug!(algorithm = keypair.algorithm(), fingerprint = %fingerprint, "Generated TLS keypair");

    Ok(format!(
        "{}\n\n{}\n\nFingerprint (SHA-256): {}",
        pair.private_pem, pair.public_pem, fingerprint
    ))
}
