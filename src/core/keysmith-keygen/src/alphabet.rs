//! Mapping random bytes onto character alphabets.
//!
//! The default mapping takes each byte modulo the alphabet size. When the
//! size does not divide 256 this is slightly non-uniform: with 62 symbols the
//! first 8 characters are drawn with probability 5/256 and the rest 4/256.
//! That distribution is kept as-is. [`map_rejection`] is the uniform
//! alternative, selected explicitly through the `unbiased` option.

use keysmith_crypto::{CryptoError, CryptoProvider};

/// `A-Za-z0-9`.
pub const ALPHANUMERIC: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// `A-Za-z0-9_-`, the nanoid alphabet.
pub const NANOID: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Maps each byte to `alphabet[byte % alphabet.len()]`.
pub fn map_modulo(bytes: &[u8], alphabet: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| char::from(alphabet[usize::from(b) % alphabet.len()]))
        .collect()
}

/// Draws `len` characters uniformly from `alphabet` by rejecting bytes at or
/// above the largest multiple of the alphabet size.
pub fn map_rejection(
    provider: &CryptoProvider,
    len: usize,
    alphabet: &[u8],
) -> Result<String, CryptoError> {
    let size = alphabet.len();
    let limit = 256 - (256 % size);

    let mut out = String::new();
    out.try_reserve_exact(len).map_err(|_| CryptoError::AllocationFailed(len))?;
    let mut remaining = len;

    while remaining > 0 {
        // Over-draw a little so a typical request needs a single batch.
        let batch = provider.random_bytes(remaining.saturating_add(remaining / 8 + 1))?;
        for &b in batch.iter().filter(|&&b| usize::from(b) < limit) {
            out.push(char::from(alphabet[usize::from(b) % size]));
            remaining -= 1;
            if remaining == 0 {
                break;
            }
        }
    }

    Ok(out)
}
