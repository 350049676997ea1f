//! SSH keypairs.
//!
//! Ed25519 keys get an OpenSSH public-key line. The private half is the bare
//! 32-byte seed in a `PRIVATE KEY` PEM block: it is neither PKCS#8 nor the
//! `openssh-key-v1` container, so `ssh-keygen` cannot load it directly. RSA
//! and ECDSA keys are emitted as PKCS#8/SPKI PEM only, without a public-key
//! line.

use keysmith_codec::{openssh_public_line, pem_wrap, ssh_ed25519_wire_blob, SSH_ED25519_TAG};
use keysmith_crypto::{CryptoError, CryptoProvider, KeypairSpec};
use tracing::debug;

use super::{export_pem_pair, PRIVATE_KEY_LABEL};
use crate::config::{OpenSshOptions, SshConfig};
use crate::error::GenerationError;

/// Generates an SSH keypair.
pub fn generate(provider: &CryptoProvider, config: &SshConfig) -> Result<String, GenerationError> {
    let spec = match config {
        SshConfig::Ed25519(options) => return generate_ed25519(provider, options),
        SshConfig::Rsa { key_size } => KeypairSpec::rsa(*key_size),
        SshConfig::Ecdsa { curve } => KeypairSpec::Ecdsa(*curve),
    };

    let keypair = provider.generate_keypair(spec)?;
    let pair = export_pem_pair(&keypair)?;

    debug!(algorithm = keypair.algorithm(), "Generated SSH keypair (PEM only)");

    Ok(format!("{}\n\n{}", pair.private_pem, pair.public_pem))
}

/// Generates an Ed25519 keypair as `{seed PEM}\n\n{OpenSSH public line}`.
///
/// The public-key line carries the raw 32-byte public key unless
/// `wire_format` is set, in which case it carries the RFC 8709 blob that
/// OpenSSH expects.
pub fn generate_ed25519(
    provider: &CryptoProvider,
    options: &OpenSshOptions,
) -> Result<String, GenerationError> {
    let keypair = provider.generate_keypair(KeypairSpec::Ed25519)?;

    let (Some(seed), Some(public_key)) = (keypair.ed25519_seed(), keypair.ed25519_public_key())
    else {
        return Err(CryptoError::UnsupportedAlgorithm(format!(
            "expected an Ed25519 keypair, got {}",
            keypair.algorithm()
        ))
        .into());
    };

    let blob = if options.wire_format {
        ssh_ed25519_wire_blob(&public_key)?
    } else {
        public_key.to_vec()
    };

    let private_pem = pem_wrap(PRIVATE_KEY_LABEL, &seed[..]);
    let public_line = openssh_public_line(SSH_ED25519_TAG, &blob, &options.comment);

    debug!(wire_format = options.wire_format, "Generated Ed25519 SSH keypair");

    Ok(format!("{}\n\n{}", private_pem, public_line))
}
