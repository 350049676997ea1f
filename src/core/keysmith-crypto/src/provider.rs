//! The cryptography provider used by every generator.

use std::fmt;
use std::sync::Arc;

use ed25519_dalek::SigningKey;
use rsa::{BigUint, RsaPrivateKey};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::digest::{self, SHA256_SIZE};
use crate::error::CryptoError;
use crate::keys::{EcCurve, Keypair, KeypairSpec};
use crate::random::{self, OsRandom, RandomSource, SourceRng};

/// Process-wide cryptography service.
///
/// Cloning is cheap and every clone shares the same [`RandomSource`]. The
/// provider holds no other state, so concurrent calls never contend.
#[derive(Clone)]
pub struct CryptoProvider {
    random: Arc<dyn RandomSource>,
}

impl CryptoProvider {
    /// A provider backed by the operating system CSPRNG.
    pub fn system() -> Self {
        Self::with_random_source(Arc::new(OsRandom))
    }

    /// A provider drawing all randomness from `random`.
    pub fn with_random_source(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Draws `len` secure random bytes.
    pub fn random_bytes(&self, len: usize) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        random::generate_bytes(self.random.as_ref(), len)
    }

    /// Fills `dest` with secure random bytes.
    pub fn fill_random(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        self.random.fill(dest)
    }

    /// Generates an asymmetric keypair.
    ///
    /// RSA generation is the only slow path here (prime search); callers on an
    /// async runtime should run this on a blocking thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying library rejects the parameters or
    /// the random source fails during generation.
    pub fn generate_keypair(&self, spec: KeypairSpec) -> Result<Keypair, CryptoError> {
        let mut rng = SourceRng::new(self.random.as_ref());

        let keypair = match spec {
            KeypairSpec::Rsa {
                modulus_bits,
                public_exponent,
                hash,
            } => {
                debug!(modulus_bits, public_exponent, hash = ?hash, "Generating RSA keypair");
                let exponent = BigUint::from(public_exponent);
                let key = RsaPrivateKey::new_with_exp(&mut rng, modulus_bits, &exponent)
                    .map_err(|e| {
                        warn!(error = %e, modulus_bits, "RSA key generation rejected");
                        CryptoError::KeyGenerationFailed(format!("RSA-{modulus_bits}: {e}"))
                    })?;
                Keypair::Rsa(Box::new(key))
            },
            KeypairSpec::Ecdsa(curve) => {
                debug!(curve = %curve, "Generating ECDSA keypair");
                match curve {
                    EcCurve::P256 => Keypair::P256(p256::SecretKey::random(&mut rng)),
                    EcCurve::P384 => Keypair::P384(p384::SecretKey::random(&mut rng)),
                    EcCurve::P521 => Keypair::P521(p521::SecretKey::random(&mut rng)),
                }
            },
            KeypairSpec::Ed25519 => {
                debug!("Generating Ed25519 keypair");
                Keypair::Ed25519(SigningKey::generate(&mut rng))
            },
        };

        rng.finish().inspect_err(|e| {
            warn!(
                error = %e,
                algorithm = keypair.algorithm(),
                "Random source failed during key generation"
            );
        })?;

        Ok(keypair)
    }

    /// Computes a SHA-256 digest.
    pub fn sha256(&self, data: &[u8]) -> [u8; SHA256_SIZE] {
        digest::sha256(data)
    }
}

impl Default for CryptoProvider {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for CryptoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoProvider").finish_non_exhaustive()
    }
}
