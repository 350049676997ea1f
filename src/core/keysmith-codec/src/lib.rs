//! # Keysmith Codec
//!
//! Binary-to-text encodings for generated key material.
//!
//! ## Features
//!
//! - Base64, standard (padded) and URL-safe (unpadded)
//! - PEM wrap/unwrap with 64-character line folding
//! - Lowercase hex
//! - SHA-256 hex digests and colon-separated fingerprints
//! - OpenSSH public-key lines and SSH wire `string` encoding

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod armor;
pub mod encoding;
pub mod error;
pub mod fingerprint;
pub mod ssh;

pub use armor::{pem_label, pem_unwrap, pem_wrap, PEM_LINE_WIDTH};
pub use encoding::{base64_decode, base64_encode, hex_encode};
pub use error::CodecError;
pub use fingerprint::{sha256_colon_hex, sha256_hex};
pub use ssh::{openssh_public_line, ssh_ed25519_wire_blob, ssh_wire_string, SSH_ED25519_TAG};
