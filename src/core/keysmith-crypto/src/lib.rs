//! # Keysmith Crypto
//!
//! Cryptography provider for Keysmith.
//!
//! This crate is the only place where key material is created:
//! - Secure random generation behind the [`RandomSource`] capability
//! - Asymmetric keypairs (RSA, ECDSA P-256/P-384/P-521, Ed25519)
//! - PKCS#8 / SPKI DER export
//! - SHA-256 digests
//!
//! All primitives are delegated to the RustCrypto crates. Nothing here
//! encodes to text; see `keysmith-codec` for that.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod digest;
pub mod error;
pub mod keys;
pub mod provider;
pub mod random;

pub use error::CryptoError;
pub use keys::{EcCurve, Keypair, KeypairSpec, SignatureHash, RSA_PUBLIC_EXPONENT};
pub use provider::CryptoProvider;
pub use random::{OsRandom, RandomSource};
