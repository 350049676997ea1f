//! Integration tests for Keysmith.
//!
//! These tests drive the public generation facade end to end and parse the
//! produced PEM back with independent decoders.

// Allow unwrap() in tests - panics are acceptable for test assertions
#![allow(clippy::disallowed_methods)]

use anyhow::{bail, Context, Result};
use keysmith_keygen::{generate, KeyKind, RawConfig};

/// Prefix of the fingerprint section in TLS keypair output.
pub const FINGERPRINT_PREFIX: &str = "Fingerprint (SHA-256): ";

// ============================================================================
// Output Parsing
// ============================================================================

/// The three sections of a TLS keypair output.
#[derive(Debug)]
pub struct SslOutput<'a> {
    pub private_pem: &'a str,
    pub public_pem: &'a str,
    pub fingerprint: &'a str,
}

/// Splits `{private}\n\n{public}\n\nFingerprint (SHA-256): {fp}`.
pub fn split_ssl(text: &str) -> Result<SslOutput<'_>> {
    let sections: Vec<&str> = text.split("\n\n").collect();
    let [private_pem, public_pem, fingerprint] = sections[..] else {
        bail!("expected 3 sections, got {}", sections.len());
    };
    let fingerprint = fingerprint
        .strip_prefix(FINGERPRINT_PREFIX)
        .context("missing fingerprint prefix")?;

    Ok(SslOutput {
        private_pem,
        public_pem,
        fingerprint,
    })
}

/// Splits a two-section keypair output (SSH kinds).
pub fn split_pair(text: &str) -> Result<(&str, &str)> {
    let sections: Vec<&str> = text.split("\n\n").collect();
    let [private, public] = sections[..] else {
        bail!("expected 2 sections, got {}", sections.len());
    };
    Ok((private, public))
}

/// Generates a text key from a JSON configuration.
pub fn generate_text(kind: KeyKind, json: &str) -> Result<String> {
    let raw = RawConfig::from_json(json)?;
    generate(kind, &raw)?
        .into_text()
        .context("expected text output")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use ed25519_dalek::SigningKey;
    use keysmith_codec::{base64_decode, pem_label, pem_unwrap, sha256_colon_hex};
    use keysmith_crypto::{CryptoError, CryptoProvider, RandomSource};
    use keysmith_keygen::{GeneratedKey, GenerationError, KeyGenerator};
    use p256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
    use rsa::traits::PublicKeyParts;
    use rsa::{RsaPrivateKey, RsaPublicKey};

    fn assert_rsa_pair(private_pem: &str, public_pem: &str, bits: usize) -> RsaPublicKey {
        let private = RsaPrivateKey::from_pkcs8_pem(private_pem).unwrap();
        let public = RsaPublicKey::from_public_key_pem(public_pem).unwrap();

        assert_eq!(private.size() * 8, bits);
        assert_eq!(public.e(), &rsa::BigUint::from(65_537u32));
        assert_eq!(private.to_public_key(), public);
        public
    }

    // ------------------------------------------------------------------------
    // TLS keypairs
    // ------------------------------------------------------------------------

    #[test]
    fn test_ssl_rsa_parses_back() {
        let text = generate_text(KeyKind::SslKeypair, "{}").unwrap();
        let out = split_ssl(&text).unwrap();

        assert_eq!(pem_label(out.private_pem), Some("PRIVATE KEY"));
        assert_eq!(pem_label(out.public_pem), Some("PUBLIC KEY"));

        let public = assert_rsa_pair(out.private_pem, out.public_pem, 2048);
        let spki = public.to_public_key_der().unwrap();
        assert_eq!(out.fingerprint, sha256_colon_hex(spki.as_bytes()));
    }

    #[test]
    fn test_ssl_rsa_3072() {
        let text = generate_text(KeyKind::SslKeypair, r#"{"keySize": "3072"}"#).unwrap();
        let out = split_ssl(&text).unwrap();
        assert_rsa_pair(out.private_pem, out.public_pem, 3072);
    }

    #[test]
    fn test_ssl_p256_parses_back() {
        let text = generate_text(KeyKind::SslKeypair, r#"{"algorithm": "ecdsa"}"#).unwrap();
        let out = split_ssl(&text).unwrap();

        let secret = p256::SecretKey::from_pkcs8_pem(out.private_pem).unwrap();
        let public = p256::PublicKey::from_public_key_pem(out.public_pem).unwrap();
        assert_eq!(secret.public_key(), public);

        let spki = public.to_public_key_der().unwrap();
        assert_eq!(out.fingerprint, sha256_colon_hex(spki.as_bytes()));
    }

    #[test]
    fn test_ssl_p384_parses_back() {
        let text = generate_text(
            KeyKind::SslKeypair,
            r#"{"algorithm": "ecdsa", "curve": "P-384"}"#,
        )
        .unwrap();
        let out = split_ssl(&text).unwrap();

        let secret = p384::SecretKey::from_pkcs8_pem(out.private_pem).unwrap();
        let public = p384::PublicKey::from_public_key_pem(out.public_pem).unwrap();
        assert_eq!(secret.public_key(), public);
    }

    #[test]
    fn test_ssl_p521_parses_back() {
        let text = generate_text(
            KeyKind::SslKeypair,
            r#"{"algorithm": "ecdsa", "curve": "P-521"}"#,
        )
        .unwrap();
        let out = split_ssl(&text).unwrap();

        let private_der = pem_unwrap(out.private_pem).unwrap();
        let public_der = pem_unwrap(out.public_pem).unwrap();
        let secret = p521::SecretKey::from_pkcs8_der(&private_der).unwrap();
        let public = p521::PublicKey::from_public_key_der(&public_der).unwrap();
        assert_eq!(secret.public_key(), public);
    }

    #[test]
    fn test_ssl_ed25519_matches_ssh_layout() {
        let text = generate_text(KeyKind::SslKeypair, r#"{"algorithm": "ed25519"}"#).unwrap();
        let (private, public) = split_pair(&text).unwrap();
        assert_eq!(pem_unwrap(private).unwrap().len(), 32);
        assert!(public.starts_with("ssh-ed25519 "));
    }

    // ------------------------------------------------------------------------
    // SSH keypairs
    // ------------------------------------------------------------------------

    #[test]
    fn test_ssh_ed25519_seed_derives_public_key() {
        let text = generate_text(KeyKind::SshKeypair, r#"{"comment": "deploy@ci"}"#).unwrap();
        let (private, public) = split_pair(&text).unwrap();

        let seed: [u8; 32] = pem_unwrap(private).unwrap().try_into().unwrap();
        let derived = SigningKey::from_bytes(&seed).verifying_key().to_bytes();

        let fields: Vec<&str> = public.split(' ').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], "ssh-ed25519");
        assert_eq!(base64_decode(fields[1]).unwrap(), derived);
        assert_eq!(fields[2], "deploy@ci");
    }

    #[test]
    fn test_ssh_ed25519_openssh_wire_blob() {
        let text = generate_text(KeyKind::SshKeypair, r#"{"opensshWire": true}"#).unwrap();
        let (private, public) = split_pair(&text).unwrap();

        let seed: [u8; 32] = pem_unwrap(private).unwrap().try_into().unwrap();
        let derived = SigningKey::from_bytes(&seed).verifying_key().to_bytes();

        let blob = base64_decode(public.split(' ').nth(1).unwrap()).unwrap();
        assert_eq!(&blob[..4], &[0, 0, 0, 11]);
        assert_eq!(&blob[4..15], b"ssh-ed25519");
        assert_eq!(&blob[15..19], &[0, 0, 0, 32]);
        assert_eq!(&blob[19..], &derived);
    }

    #[test]
    fn test_ssh_rsa_is_pem_pair() {
        let text =
            generate_text(KeyKind::SshKeypair, r#"{"algorithm": "rsa", "keySize": 2048}"#).unwrap();
        let (private, public) = split_pair(&text).unwrap();
        assert!(!text.contains("Fingerprint"));
        assert_rsa_pair(private, public, 2048);
    }

    #[test]
    fn test_ssh_ecdsa_uses_curve() {
        let text = generate_text(
            KeyKind::SshKeypair,
            r#"{"algorithm": "ecdsa", "curve": "P-384"}"#,
        )
        .unwrap();
        let (private, public) = split_pair(&text).unwrap();

        let secret = p384::SecretKey::from_pkcs8_pem(private).unwrap();
        let public = p384::PublicKey::from_public_key_pem(public).unwrap();
        assert_eq!(secret.public_key(), public);
    }

    // ------------------------------------------------------------------------
    // JWT
    // ------------------------------------------------------------------------

    #[test]
    fn test_jwt_rs256_is_rsa_2048() {
        let text = generate_text(KeyKind::JwtSecret, r#"{"algorithm": "RS256"}"#).unwrap();
        let out = split_ssl(&text).unwrap();
        assert_rsa_pair(out.private_pem, out.public_pem, 2048);
    }

    #[test]
    fn test_jwt_hs512() {
        let text = generate_text(KeyKind::JwtSecret, r#"{"algorithm": "HS512"}"#).unwrap();
        assert_eq!(base64_decode(&text).unwrap().len(), 64);
    }

    // ------------------------------------------------------------------------
    // Injected randomness
    // ------------------------------------------------------------------------

    struct FixedSource(u8);

    impl RandomSource for FixedSource {
        fn fill(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
            dest.fill(self.0);
            Ok(())
        }
    }

    #[test]
    fn test_fixed_source_shapes() {
        let provider = CryptoProvider::with_random_source(Arc::new(FixedSource(0xab)));
        let generator = KeyGenerator::new(provider);

        let secret = generator
            .generate(KeyKind::Secret, &RawConfig::from_json(r#"{"length": 4}"#).unwrap())
            .unwrap();
        assert_eq!(secret.as_text(), Some("abababab"));

        let key = generator
            .generate(
                KeyKind::EncryptionKey,
                &RawConfig::from_json(r#"{"algorithm": "aes-128", "format": "raw"}"#).unwrap(),
            )
            .unwrap();
        assert!(matches!(key, GeneratedKey::Raw(_)));
        assert_eq!(key.as_bytes(), &[0xab; 16]);
    }

    // ------------------------------------------------------------------------
    // Async and bulk
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_bulk_ecdsa_keys_are_distinct() {
        let generator = KeyGenerator::system();
        let raw = RawConfig::from_json(r#"{"algorithm": "ecdsa"}"#).unwrap();

        let keys = generator
            .generate_many(KeyKind::SslKeypair, &raw, 5, true)
            .await
            .unwrap();

        let mut fingerprints: Vec<String> = keys
            .iter()
            .map(|key| split_ssl(key.as_text().unwrap()).unwrap().fingerprint.to_string())
            .collect();
        fingerprints.sort();
        fingerprints.dedup();
        assert_eq!(fingerprints.len(), 5);
    }

    #[tokio::test]
    async fn test_bulk_rejects_invalid_config_up_front() {
        let generator = KeyGenerator::system();
        let raw = RawConfig::from_json(r#"{"algorithm": "rsa", "keySize": 1024}"#).unwrap();

        let result = generator.generate_many(KeyKind::SslKeypair, &raw, 3, true).await;
        assert!(matches!(
            result,
            Err(GenerationError::InvalidParameter { field: "keySize", .. })
        ));
    }
}
