//! Asymmetric keypair types.
//!
//! A [`Keypair`] owns the private key produced by the provider. All private
//! key types zeroize their memory on drop; DER exports of private material are
//! returned in `Zeroizing` buffers.

use std::fmt;

use ed25519_dalek::pkcs8::{EncodePrivateKey as _, EncodePublicKey as _};
use ed25519_dalek::SigningKey;
use p256::pkcs8::{EncodePrivateKey as _, EncodePublicKey as _};
use rsa::pkcs8::{EncodePrivateKey as _, EncodePublicKey as _};
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Public exponent used for every RSA key (F4).
pub const RSA_PUBLIC_EXPONENT: u32 = 65_537;

/// Size of an Ed25519 seed in bytes.
pub const ED25519_SEED_SIZE: usize = 32;

/// Size of an Ed25519 public key in bytes.
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;

/// Hash an RSA signing key is intended for.
///
/// PKCS#8 export of an RSA key does not carry the hash; it is recorded so
/// callers state the full signing algorithm when they request a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureHash {
    /// SHA-256 (RSASSA-PKCS1-v1_5 with SHA-256).
    #[default]
    Sha256,
}

/// Named NIST curves supported for ECDSA keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EcCurve {
    /// NIST P-256 (secp256r1).
    #[default]
    P256,
    /// NIST P-384 (secp384r1).
    P384,
    /// NIST P-521 (secp521r1).
    P521,
}

impl EcCurve {
    /// Returns the curve's canonical name (`P-256`, `P-384`, `P-521`).
    pub fn name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    /// Parses a curve name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::P256, Self::P384, Self::P521]
            .into_iter()
            .find(|curve| curve.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for an asymmetric keypair request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypairSpec {
    /// RSA signing key.
    Rsa {
        /// Modulus length in bits.
        modulus_bits: usize,
        /// Public exponent.
        public_exponent: u32,
        /// Intended signature hash.
        hash: SignatureHash,
    },
    /// ECDSA signing key on a named curve.
    Ecdsa(EcCurve),
    /// Ed25519 signing key.
    Ed25519,
}

impl KeypairSpec {
    /// An RSA spec with the standard public exponent and SHA-256.
    pub fn rsa(modulus_bits: usize) -> Self {
        Self::Rsa {
            modulus_bits,
            public_exponent: RSA_PUBLIC_EXPONENT,
            hash: SignatureHash::Sha256,
        }
    }
}

/// A generated asymmetric keypair.
pub enum Keypair {
    /// RSA private key (the public key is derived from it).
    Rsa(Box<RsaPrivateKey>),
    /// ECDSA P-256 secret key.
    P256(p256::SecretKey),
    /// ECDSA P-384 secret key.
    P384(p384::SecretKey),
    /// ECDSA P-521 secret key.
    P521(p521::SecretKey),
    /// Ed25519 signing key.
    Ed25519(SigningKey),
}

impl Keypair {
    /// Short algorithm name, suitable for logs.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Rsa(_) => "rsa",
            Self::P256(_) => "ecdsa-p256",
            Self::P384(_) => "ecdsa-p384",
            Self::P521(_) => "ecdsa-p521",
            Self::Ed25519(_) => "ed25519",
        }
    }

    /// Exports the private key as PKCS#8 DER.
    pub fn private_pkcs8_der(&self) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let document = match self {
            Self::Rsa(key) => key.to_pkcs8_der(),
            Self::P256(key) => key.to_pkcs8_der(),
            Self::P384(key) => key.to_pkcs8_der(),
            Self::P521(key) => key.to_pkcs8_der(),
            Self::Ed25519(key) => key.to_pkcs8_der(),
        }
        .map_err(|e| CryptoError::ExportFailed(format!("{} PKCS#8: {e}", self.algorithm())))?;

        Ok(Zeroizing::new(document.as_bytes().to_vec()))
    }

    /// Exports the public key as SubjectPublicKeyInfo DER.
    pub fn public_spki_der(&self) -> Result<Vec<u8>, CryptoError> {
        let document = match self {
            Self::Rsa(key) => key.to_public_key().to_public_key_der(),
            Self::P256(key) => key.public_key().to_public_key_der(),
            Self::P384(key) => key.public_key().to_public_key_der(),
            Self::P521(key) => key.public_key().to_public_key_der(),
            Self::Ed25519(key) => key.verifying_key().to_public_key_der(),
        }
        .map_err(|e| CryptoError::ExportFailed(format!("{} SPKI: {e}", self.algorithm())))?;

        Ok(document.into_vec())
    }

    /// Returns the 64-byte Ed25519 secret representation (seed || public key).
    pub fn ed25519_keypair_bytes(&self) -> Option<Zeroizing<[u8; 64]>> {
        match self {
            Self::Ed25519(key) => Some(Zeroizing::new(key.to_keypair_bytes())),
            _ => None,
        }
    }

    /// Returns the 32-byte Ed25519 seed, the first half of
    /// [`Keypair::ed25519_keypair_bytes`].
    pub fn ed25519_seed(&self) -> Option<Zeroizing<[u8; ED25519_SEED_SIZE]>> {
        let full = self.ed25519_keypair_bytes()?;
        let mut seed = Zeroizing::new([0u8; ED25519_SEED_SIZE]);
        seed.copy_from_slice(&full[..ED25519_SEED_SIZE]);
        Some(seed)
    }

    /// Returns the raw 32-byte Ed25519 public key.
    pub fn ed25519_public_key(&self) -> Option<[u8; ED25519_PUBLIC_KEY_SIZE]> {
        match self {
            Self::Ed25519(key) => Some(key.verifying_key().to_bytes()),
            _ => None,
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("algorithm", &self.algorithm())
            .field("private", &"[REDACTED]")
            .finish()
    }
}
