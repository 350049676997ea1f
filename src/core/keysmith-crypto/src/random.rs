//! Cryptographically secure random generation.
//!
//! Randomness is an injected capability: every generator draws from a
//! [`RandomSource`]. [`OsRandom`] uses the operating system's CSPRNG and is
//! what production code uses. Tests may substitute deterministic sources for
//! shape assertions.

use rand::{rngs::OsRng, CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// A source of cryptographically secure random bytes.
///
/// Implementations must be safe for concurrent use.
pub trait RandomSource: Send + Sync {
    /// Fills `dest` entirely with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::RandomSource(e.to_string()))
    }
}

/// Generates `len` random bytes from `source`.
///
/// The buffer is wrapped in `Zeroizing` so it is cleared when dropped.
///
/// # Errors
///
/// Returns [`CryptoError::AllocationFailed`] if `len` bytes cannot be
/// allocated, or the source's error if it fails to fill them.
pub fn generate_bytes(
    source: &dyn RandomSource,
    len: usize,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| CryptoError::AllocationFailed(len))?;
    buf.resize(len, 0u8);

    let mut bytes = Zeroizing::new(buf);
    source.fill(&mut bytes)?;
    Ok(bytes)
}

/// Adapts a [`RandomSource`] to the `rand_core` traits expected by the
/// RustCrypto key generators.
///
/// Key generation has no fallible path, so a source failure is recorded,
/// the remaining draws come from the OS CSPRNG so generation terminates, and
/// the caller reports the failure through [`SourceRng::finish`].
pub(crate) struct SourceRng<'a> {
    source: &'a dyn RandomSource,
    failure: Option<CryptoError>,
}

impl<'a> SourceRng<'a> {
    pub(crate) fn new(source: &'a dyn RandomSource) -> Self {
        Self {
            source,
            failure: None,
        }
    }

    /// Returns the first failure observed while the adapter was in use.
    pub(crate) fn finish(self) -> Result<(), CryptoError> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl RngCore for SourceRng<'_> {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if self.failure.is_none() {
            match self.source.fill(dest) {
                Ok(()) => return,
                Err(e) => self.failure = Some(e),
            }
        }
        OsRng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for SourceRng<'_> {}
