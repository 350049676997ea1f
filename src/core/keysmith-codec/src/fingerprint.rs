//! SHA-256 hex digests and fingerprints.

use keysmith_crypto::digest::sha256;

use crate::encoding::hex_encode;

/// Returns the SHA-256 digest of `data` as 64 lowercase hex characters.
pub fn sha256_hex(data: &[u8]) -> String {
    hex_encode(&sha256(data))
}

/// Returns the SHA-256 digest of `data` as 32 colon-separated hex byte pairs,
/// e.g. `ab:cd:...`.
pub fn sha256_colon_hex(data: &[u8]) -> String {
    sha256(data)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}
