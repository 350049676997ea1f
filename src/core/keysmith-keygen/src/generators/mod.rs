//! One generation routine per key kind.
//!
//! Each routine takes the provider and its validated configuration, draws raw
//! material and encodes it. Raw material never outlives the call.

pub mod api;
pub mod blob;
pub mod encryption;
pub mod jwt;
pub mod secret;
pub mod ssh;
pub mod ssl;

use keysmith_codec::pem_wrap;
use keysmith_crypto::Keypair;

use crate::error::GenerationError;

/// PEM label for PKCS#8 private keys (and the bare Ed25519 seed).
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// PEM label for SubjectPublicKeyInfo public keys.
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

/// PEM-encoded halves of a keypair plus the SPKI DER they came from.
pub(crate) struct PemPair {
    pub private_pem: String,
    pub public_pem: String,
    pub spki_der: Vec<u8>,
}

pub(crate) fn export_pem_pair(keypair: &Keypair) -> Result<PemPair, GenerationError> {
    let pkcs8 = keypair.private_pkcs8_der()?;
    let spki_der = keypair.public_spki_der()?;

    Ok(PemPair {
        private_pem: pem_wrap(PRIVATE_KEY_LABEL, &pkcs8),
        public_pem: pem_wrap(PUBLIC_KEY_LABEL, &spki_der),
        spki_der,
    })
}
