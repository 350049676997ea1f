//! Key generation configuration.
//!
//! Callers describe a request with a [`RawConfig`]: a loose record of named,
//! optional parameters as it arrives from a CLI, a JSON file or a form.
//! [`resolve_config`] applies the per-kind defaults, validates every field it
//! reads and produces a typed [`KeySpec`]. Resolution is pure: it never draws
//! randomness or calls the provider, so an invalid request costs nothing.

use std::fmt;

use keysmith_crypto::EcCurve;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GenerationError;
use crate::kind::KeyKind;

// ============================================================================
// Defaults
// ============================================================================

/// Default secret length in bytes.
pub const DEFAULT_SECRET_LENGTH: usize = 32;

/// Default base64 blob length in bytes.
pub const DEFAULT_BLOB_LENGTH: usize = 32;

/// Default nanoid length in characters.
pub const DEFAULT_NANOID_LENGTH: usize = 21;

/// Length of the random part of a prefixed API key.
pub const PREFIXED_KEY_LENGTH: usize = 32;

/// Default API key prefix.
pub const DEFAULT_API_PREFIX: &str = "sk_live_";

/// Default comment on OpenSSH public-key lines.
pub const DEFAULT_SSH_COMMENT: &str = "user@host";

/// Default RSA modulus for TLS keypairs.
pub const DEFAULT_SSL_RSA_BITS: usize = 2048;

/// Default RSA modulus for SSH keypairs.
pub const DEFAULT_SSH_RSA_BITS: usize = 4096;

/// RSA moduli accepted for TLS keypairs.
pub const SSL_RSA_BITS: [usize; 3] = [2048, 3072, 4096];

/// RSA moduli accepted for SSH keypairs.
pub const SSH_RSA_BITS: [usize; 2] = [2048, 4096];

// ============================================================================
// Raw Configuration
// ============================================================================

/// Unvalidated generation parameters.
///
/// Every field is optional; absent fields take the per-kind default and
/// fields that do not apply to the requested kind are ignored. Numeric
/// fields accept JSON numbers or numeric strings (`"2048"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawConfig {
    /// Secret length in bytes, or nanoid length in characters.
    #[serde(deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub length: Option<i64>,
    /// Output format (`hex`, `base64`, `alphanumeric`, `uuid`, `nanoid`, `prefixed`, `raw`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Base64 blob length in bytes.
    #[serde(deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub byte_length: Option<i64>,
    /// Use the URL-safe, unpadded base64 alphabet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_safe: Option<bool>,
    /// Algorithm name; its domain depends on the key kind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    /// RSA modulus length in bits.
    #[serde(deserialize_with = "lenient_int", skip_serializing_if = "Option::is_none")]
    pub key_size: Option<i64>,
    /// ECDSA curve name (`P-256`, `P-384`, `P-521`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    /// API key prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Comment on the OpenSSH public-key line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Use rejection sampling instead of byte-modulo alphabet mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unbiased: Option<bool>,
    /// Emit the SSH wire-format key blob on Ed25519 public-key lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openssh_wire: Option<bool>,
}

impl RawConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Overlays every field set in `other` onto `self`.
    pub fn merge(mut self, other: RawConfig) -> Self {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        overlay!(
            length,
            format,
            byte_length,
            url_safe,
            algorithm,
            key_size,
            curve,
            prefix,
            comment,
            unbiased,
            openssh_wire
        );
        self
    }
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrText {
        Int(i64),
        Text(String),
    }

    match Option::<IntOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrText::Int(n)) => Ok(Some(n)),
        Some(IntOrText::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got \"{s}\""))),
    }
}

// ============================================================================
// Validated Configuration
// ============================================================================

/// Text encoding of a generic secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretFormat {
    /// Lowercase hex.
    Hex,
    /// Standard padded base64.
    Base64,
    /// `A-Za-z0-9`.
    Alphanumeric,
}

/// Validated configuration for [`KeyKind::Secret`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretConfig {
    /// Number of random bytes (or characters, for alphanumeric).
    pub length: usize,
    /// Output encoding.
    pub format: SecretFormat,
    /// Rejection-sample the alphanumeric alphabet instead of byte mod 62.
    pub unbiased: bool,
}

/// Validated configuration for [`KeyKind::Base64Blob`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Config {
    /// Number of random bytes.
    pub byte_length: usize,
    /// URL-safe alphabet without padding.
    pub url_safe: bool,
}

/// Options for Ed25519 keys rendered as an OpenSSH public-key line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSshOptions {
    /// Trailing comment on the public-key line.
    pub comment: String,
    /// Encode the public key as an SSH wire blob rather than raw bytes.
    pub wire_format: bool,
}

impl Default for OpenSshOptions {
    fn default() -> Self {
        Self {
            comment: DEFAULT_SSH_COMMENT.to_string(),
            wire_format: false,
        }
    }
}

/// Validated configuration for [`KeyKind::SslKeypair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SslConfig {
    /// RSA keypair with the given modulus length in bits.
    Rsa {
        /// Modulus length in bits.
        key_size: usize,
    },
    /// ECDSA keypair on a named curve.
    Ecdsa {
        /// Named curve.
        curve: EcCurve,
    },
    /// Ed25519 keypair, rendered the same way as an SSH Ed25519 key.
    Ed25519(OpenSshOptions),
}

/// Validated configuration for [`KeyKind::ApiKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyConfig {
    /// RFC 4122 version 4 UUID.
    Uuid,
    /// Nanoid over `A-Za-z0-9_-`.
    Nanoid {
        /// Number of characters.
        length: usize,
        /// Rejection-sample the alphabet.
        unbiased: bool,
    },
    /// Fixed prefix followed by a 32-character nanoid.
    Prefixed {
        /// Literal prefix.
        prefix: String,
        /// Rejection-sample the alphabet.
        unbiased: bool,
    },
}

/// JWT signing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JwtAlgorithm {
    /// HMAC with SHA-256.
    Hs256,
    /// HMAC with SHA-384.
    Hs384,
    /// HMAC with SHA-512.
    Hs512,
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    Rs256,
}

impl JwtAlgorithm {
    /// HMAC secret length in bytes, or `None` for RS256.
    pub fn hmac_secret_len(self) -> Option<usize> {
        match self {
            Self::Hs256 => Some(32),
            Self::Hs384 => Some(48),
            Self::Hs512 => Some(64),
            Self::Rs256 => None,
        }
    }
}

/// Validated configuration for [`KeyKind::JwtSecret`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtConfig {
    /// Signing algorithm.
    pub algorithm: JwtAlgorithm,
}

/// Symmetric ciphers an encryption key can be sized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionAlgorithm {
    /// AES-128.
    Aes128,
    /// AES-192.
    Aes192,
    /// AES-256.
    Aes256,
    /// ChaCha20.
    ChaCha20,
}

impl EncryptionAlgorithm {
    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 | Self::ChaCha20 => 32,
        }
    }
}

/// Output form of an encryption key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionFormat {
    /// Lowercase hex.
    Hex,
    /// Standard padded base64.
    Base64,
    /// The key bytes themselves.
    Raw,
}

/// Validated configuration for [`KeyKind::EncryptionKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionConfig {
    /// Target cipher.
    pub algorithm: EncryptionAlgorithm,
    /// Output form.
    pub format: EncryptionFormat,
}

/// Validated configuration for [`KeyKind::SshKeypair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SshConfig {
    /// Ed25519 keypair with an OpenSSH public-key line.
    Ed25519(OpenSshOptions),
    /// RSA keypair, PEM only.
    Rsa {
        /// Modulus length in bits.
        key_size: usize,
    },
    /// ECDSA keypair, PEM only.
    Ecdsa {
        /// Named curve.
        curve: EcCurve,
    },
}

/// A fully validated generation request.
///
/// Each variant carries the configuration type of its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySpec {
    /// See [`KeyKind::Secret`].
    Secret(SecretConfig),
    /// See [`KeyKind::Base64Blob`].
    Base64Blob(Base64Config),
    /// See [`KeyKind::SslKeypair`].
    SslKeypair(SslConfig),
    /// See [`KeyKind::ApiKey`].
    ApiKey(ApiKeyConfig),
    /// See [`KeyKind::JwtSecret`].
    JwtSecret(JwtConfig),
    /// See [`KeyKind::EncryptionKey`].
    EncryptionKey(EncryptionConfig),
    /// See [`KeyKind::SshKeypair`].
    SshKeypair(SshConfig),
}

impl KeySpec {
    /// The kind this spec generates.
    pub fn kind(&self) -> KeyKind {
        match self {
            Self::Secret(_) => KeyKind::Secret,
            Self::Base64Blob(_) => KeyKind::Base64Blob,
            Self::SslKeypair(_) => KeyKind::SslKeypair,
            Self::ApiKey(_) => KeyKind::ApiKey,
            Self::JwtSecret(_) => KeyKind::JwtSecret,
            Self::EncryptionKey(_) => KeyKind::EncryptionKey,
            Self::SshKeypair(_) => KeyKind::SshKeypair,
        }
    }

    /// Whether generating this spec requires an asymmetric keypair.
    pub fn is_asymmetric(&self) -> bool {
        match self {
            Self::SslKeypair(_) | Self::SshKeypair(_) => true,
            Self::JwtSecret(config) => config.algorithm == JwtAlgorithm::Rs256,
            _ => false,
        }
    }
}

impl fmt::Display for KeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret(c) => write!(f, "secret ({} bytes, {:?})", c.length, c.format),
            Self::Base64Blob(c) => {
                write!(f, "base64 ({} bytes, url_safe={})", c.byte_length, c.url_safe)
            },
            Self::SslKeypair(SslConfig::Rsa { key_size }) => write!(f, "ssl rsa-{key_size}"),
            Self::SslKeypair(SslConfig::Ecdsa { curve }) => write!(f, "ssl ecdsa {curve}"),
            Self::SslKeypair(SslConfig::Ed25519(_)) => write!(f, "ssl ed25519"),
            Self::ApiKey(c) => write!(f, "api {:?}", c),
            Self::JwtSecret(c) => write!(f, "jwt {:?}", c.algorithm),
            Self::EncryptionKey(c) => write!(f, "encryption {:?} ({:?})", c.algorithm, c.format),
            Self::SshKeypair(SshConfig::Ed25519(_)) => write!(f, "ssh ed25519"),
            Self::SshKeypair(SshConfig::Rsa { key_size }) => write!(f, "ssh rsa-{key_size}"),
            Self::SshKeypair(SshConfig::Ecdsa { curve }) => write!(f, "ssh ecdsa {curve}"),
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Applies defaults to `raw` and validates it for `kind`.
///
/// # Errors
///
/// Returns [`GenerationError::InvalidParameter`] naming the first field whose
/// value is outside its domain. Values are rejected, never clamped.
pub fn resolve_config(kind: KeyKind, raw: &RawConfig) -> Result<KeySpec, GenerationError> {
    let spec = match kind {
        KeyKind::Secret => KeySpec::Secret(SecretConfig {
            length: positive("length", raw.length, DEFAULT_SECRET_LENGTH)?,
            format: choice(
                "format",
                raw.format.as_deref(),
                &[
                    ("hex", SecretFormat::Hex),
                    ("base64", SecretFormat::Base64),
                    ("alphanumeric", SecretFormat::Alphanumeric),
                ],
                SecretFormat::Hex,
            )?,
            unbiased: raw.unbiased.unwrap_or(false),
        }),

        KeyKind::Base64Blob => KeySpec::Base64Blob(Base64Config {
            byte_length: positive("byteLength", raw.byte_length, DEFAULT_BLOB_LENGTH)?,
            url_safe: raw.url_safe.unwrap_or(false),
        }),

        KeyKind::SslKeypair => {
            let algorithm = choice(
                "algorithm",
                raw.algorithm.as_deref(),
                &[("rsa", Asym::Rsa), ("ecdsa", Asym::Ecdsa), ("ed25519", Asym::Ed25519)],
                Asym::Rsa,
            )?;
            KeySpec::SslKeypair(match algorithm {
                Asym::Rsa => SslConfig::Rsa {
                    key_size: rsa_bits(raw.key_size, DEFAULT_SSL_RSA_BITS, &SSL_RSA_BITS)?,
                },
                Asym::Ecdsa => SslConfig::Ecdsa {
                    curve: curve(raw.curve.as_deref())?,
                },
                Asym::Ed25519 => SslConfig::Ed25519(openssh_options(raw)?),
            })
        },

        KeyKind::ApiKey => {
            let format = choice(
                "format",
                raw.format.as_deref(),
                &[
                    ("uuid", ApiFormat::Uuid),
                    ("nanoid", ApiFormat::Nanoid),
                    ("prefixed", ApiFormat::Prefixed),
                ],
                ApiFormat::Uuid,
            )?;
            let unbiased = raw.unbiased.unwrap_or(false);
            KeySpec::ApiKey(match format {
                ApiFormat::Uuid => ApiKeyConfig::Uuid,
                ApiFormat::Nanoid => ApiKeyConfig::Nanoid {
                    length: positive("length", raw.length, DEFAULT_NANOID_LENGTH)?,
                    unbiased,
                },
                ApiFormat::Prefixed => ApiKeyConfig::Prefixed {
                    prefix: raw
                        .prefix
                        .clone()
                        .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
                    unbiased,
                },
            })
        },

        KeyKind::JwtSecret => KeySpec::JwtSecret(JwtConfig {
            algorithm: choice(
                "algorithm",
                raw.algorithm.as_deref(),
                &[
                    ("HS256", JwtAlgorithm::Hs256),
                    ("HS384", JwtAlgorithm::Hs384),
                    ("HS512", JwtAlgorithm::Hs512),
                    ("RS256", JwtAlgorithm::Rs256),
                ],
                JwtAlgorithm::Hs256,
            )?,
        }),

        KeyKind::EncryptionKey => KeySpec::EncryptionKey(EncryptionConfig {
            algorithm: choice(
                "algorithm",
                raw.algorithm.as_deref(),
                &[
                    ("aes-128", EncryptionAlgorithm::Aes128),
                    ("aes-192", EncryptionAlgorithm::Aes192),
                    ("aes-256", EncryptionAlgorithm::Aes256),
                    ("chacha20", EncryptionAlgorithm::ChaCha20),
                ],
                EncryptionAlgorithm::Aes256,
            )?,
            format: choice(
                "format",
                raw.format.as_deref(),
                &[
                    ("hex", EncryptionFormat::Hex),
                    ("base64", EncryptionFormat::Base64),
                    ("raw", EncryptionFormat::Raw),
                ],
                EncryptionFormat::Hex,
            )?,
        }),

        KeyKind::SshKeypair => {
            let algorithm = choice(
                "algorithm",
                raw.algorithm.as_deref(),
                &[("ed25519", Asym::Ed25519), ("rsa", Asym::Rsa), ("ecdsa", Asym::Ecdsa)],
                Asym::Ed25519,
            )?;
            KeySpec::SshKeypair(match algorithm {
                Asym::Ed25519 => SshConfig::Ed25519(openssh_options(raw)?),
                Asym::Rsa => SshConfig::Rsa {
                    key_size: rsa_bits(raw.key_size, DEFAULT_SSH_RSA_BITS, &SSH_RSA_BITS)?,
                },
                Asym::Ecdsa => SshConfig::Ecdsa {
                    curve: curve(raw.curve.as_deref())?,
                },
            })
        },
    };

    Ok(spec)
}

#[derive(Clone, Copy)]
enum Asym {
    Rsa,
    Ecdsa,
    Ed25519,
}

#[derive(Clone, Copy)]
enum ApiFormat {
    Uuid,
    Nanoid,
    Prefixed,
}

/// Picks a named option, ignoring ASCII case.
fn choice<T: Copy>(
    field: &'static str,
    value: Option<&str>,
    options: &[(&str, T)],
    default: T,
) -> Result<T, GenerationError> {
    let Some(value) = value else {
        return Ok(default);
    };

    options
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value.trim()))
        .map(|(_, option)| *option)
        .ok_or_else(|| {
            let names: Vec<&str> = options.iter().map(|(name, _)| *name).collect();
            GenerationError::invalid(
                field,
                format!("\"{value}\" is not one of {}", names.join(", ")),
            )
        })
}

fn positive(
    field: &'static str,
    value: Option<i64>,
    default: usize,
) -> Result<usize, GenerationError> {
    match value {
        None => Ok(default),
        Some(n) if n < 1 => {
            Err(GenerationError::invalid(field, format!("must be at least 1, got {n}")))
        },
        Some(n) => usize::try_from(n)
            .map_err(|_| GenerationError::invalid(field, format!("{n} is too large"))),
    }
}

fn rsa_bits(
    value: Option<i64>,
    default: usize,
    allowed: &[usize],
) -> Result<usize, GenerationError> {
    let Some(bits) = value else {
        return Ok(default);
    };

    usize::try_from(bits)
        .ok()
        .filter(|size| allowed.contains(size))
        .ok_or_else(|| {
            let sizes: Vec<String> = allowed.iter().map(ToString::to_string).collect();
            let reason = format!("{bits} is not one of {}", sizes.join(", "));
            GenerationError::invalid("keySize", reason)
        })
}

fn curve(value: Option<&str>) -> Result<EcCurve, GenerationError> {
    let Some(name) = value else {
        return Ok(EcCurve::default());
    };

    EcCurve::from_name(name.trim()).ok_or_else(|| {
        GenerationError::invalid("curve", format!("\"{name}\" is not one of P-256, P-384, P-521"))
    })
}

fn openssh_options(raw: &RawConfig) -> Result<OpenSshOptions, GenerationError> {
    let comment = raw
        .comment
        .clone()
        .unwrap_or_else(|| DEFAULT_SSH_COMMENT.to_string());

    if comment.contains(['\n', '\r']) {
        return Err(GenerationError::invalid("comment", "must be a single line"));
    }

    Ok(OpenSshOptions {
        comment,
        wire_format: raw.openssh_wire.unwrap_or(false),
    })
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    fn resolve(kind: KeyKind, json: &str) -> Result<KeySpec, GenerationError> {
        resolve_config(kind, &RawConfig::from_json(json).unwrap())
    }

    fn assert_invalid(result: Result<KeySpec, GenerationError>, expected_field: &str) {
        match result {
            Err(GenerationError::InvalidParameter { field, .. }) => {
                assert_eq!(field, expected_field)
            },
            other => panic!("expected invalid `{expected_field}`, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_per_kind() {
        let raw = RawConfig::default();

        assert_eq!(
            resolve_config(KeyKind::Secret, &raw).unwrap(),
            KeySpec::Secret(SecretConfig {
                length: 32,
                format: SecretFormat::Hex,
                unbiased: false,
            })
        );
        assert_eq!(
            resolve_config(KeyKind::Base64Blob, &raw).unwrap(),
            KeySpec::Base64Blob(Base64Config {
                byte_length: 32,
                url_safe: false,
            })
        );
        assert_eq!(
            resolve_config(KeyKind::SslKeypair, &raw).unwrap(),
            KeySpec::SslKeypair(SslConfig::Rsa { key_size: 2048 })
        );
        assert_eq!(
            resolve_config(KeyKind::ApiKey, &raw).unwrap(),
            KeySpec::ApiKey(ApiKeyConfig::Uuid)
        );
        assert_eq!(
            resolve_config(KeyKind::JwtSecret, &raw).unwrap(),
            KeySpec::JwtSecret(JwtConfig {
                algorithm: JwtAlgorithm::Hs256,
            })
        );
        assert_eq!(
            resolve_config(KeyKind::EncryptionKey, &raw).unwrap(),
            KeySpec::EncryptionKey(EncryptionConfig {
                algorithm: EncryptionAlgorithm::Aes256,
                format: EncryptionFormat::Hex,
            })
        );
        assert_eq!(
            resolve_config(KeyKind::SshKeypair, &raw).unwrap(),
            KeySpec::SshKeypair(SshConfig::Ed25519(OpenSshOptions::default()))
        );
    }

    #[test]
    fn test_conditional_defaults() {
        assert_eq!(
            resolve(KeyKind::SslKeypair, r#"{"algorithm":"ecdsa"}"#).unwrap(),
            KeySpec::SslKeypair(SslConfig::Ecdsa {
                curve: EcCurve::P256,
            })
        );
        assert_eq!(
            resolve(KeyKind::SshKeypair, r#"{"algorithm":"rsa"}"#).unwrap(),
            KeySpec::SshKeypair(SshConfig::Rsa { key_size: 4096 })
        );
        assert_eq!(
            resolve(KeyKind::ApiKey, r#"{"format":"nanoid"}"#).unwrap(),
            KeySpec::ApiKey(ApiKeyConfig::Nanoid {
                length: 21,
                unbiased: false,
            })
        );
        assert_eq!(
            resolve(KeyKind::ApiKey, r#"{"format":"prefixed"}"#).unwrap(),
            KeySpec::ApiKey(ApiKeyConfig::Prefixed {
                prefix: "sk_live_".into(),
                unbiased: false,
            })
        );
    }

    #[test]
    fn test_secret_accepts_any_positive_length() {
        for length in [1, 7, 17, 300] {
            let raw = RawConfig {
                length: Some(length),
                ..Default::default()
            };
            let KeySpec::Secret(config) = resolve_config(KeyKind::Secret, &raw).unwrap() else {
                panic!("expected secret spec");
            };
            assert_eq!(config.length as i64, length);
        }
    }

    #[test]
    fn test_zero_and_negative_lengths_rejected() {
        assert_invalid(resolve(KeyKind::Secret, r#"{"length":0}"#), "length");
        assert_invalid(resolve(KeyKind::Secret, r#"{"length":-16}"#), "length");
        assert_invalid(resolve(KeyKind::Base64Blob, r#"{"byteLength":0}"#), "byteLength");
        assert_invalid(
            resolve(KeyKind::ApiKey, r#"{"format":"nanoid","length":0}"#),
            "length",
        );
    }

    #[test]
    fn test_rsa_key_sizes() {
        assert_invalid(resolve(KeyKind::SslKeypair, r#"{"keySize":1024}"#), "keySize");
        assert_invalid(
            resolve(KeyKind::SshKeypair, r#"{"algorithm":"rsa","keySize":3072}"#),
            "keySize",
        );
        assert_eq!(
            resolve(KeyKind::SslKeypair, r#"{"keySize":"3072"}"#).unwrap(),
            KeySpec::SslKeypair(SslConfig::Rsa { key_size: 3072 })
        );
    }

    #[test]
    fn test_unknown_choices_rejected() {
        assert_invalid(resolve(KeyKind::Secret, r#"{"format":"octal"}"#), "format");
        assert_invalid(
            resolve(KeyKind::SslKeypair, r#"{"algorithm":"ecdsa","curve":"secp256k1"}"#),
            "curve",
        );
        assert_invalid(resolve(KeyKind::JwtSecret, r#"{"algorithm":"ES256"}"#), "algorithm");
        assert_invalid(resolve(KeyKind::EncryptionKey, r#"{"algorithm":"des"}"#), "algorithm");
        assert_invalid(resolve(KeyKind::EncryptionKey, r#"{"format":"alphanumeric"}"#), "format");
        assert_invalid(resolve(KeyKind::SshKeypair, r#"{"algorithm":"dsa"}"#), "algorithm");
    }

    #[test]
    fn test_choices_case_insensitive() {
        assert_eq!(
            resolve(KeyKind::JwtSecret, r#"{"algorithm":"hs512"}"#).unwrap(),
            KeySpec::JwtSecret(JwtConfig {
                algorithm: JwtAlgorithm::Hs512,
            })
        );
        assert_eq!(
            resolve(KeyKind::SshKeypair, r#"{"algorithm":"ECDSA","curve":"p-521"}"#).unwrap(),
            KeySpec::SshKeypair(SshConfig::Ecdsa {
                curve: EcCurve::P521,
            })
        );
    }

    #[test]
    fn test_irrelevant_fields_ignored() {
        // keySize is irrelevant to ECDSA and curve to RSA.
        assert!(resolve(KeyKind::SslKeypair, r#"{"algorithm":"ecdsa","keySize":1}"#).is_ok());
        assert!(resolve(KeyKind::SslKeypair, r#"{"algorithm":"rsa","curve":"bogus"}"#).is_ok());
        assert!(resolve(KeyKind::ApiKey, r#"{"format":"uuid","length":0}"#).is_ok());
    }

    #[test]
    fn test_multiline_comment_rejected() {
        assert_invalid(resolve(KeyKind::SshKeypair, r#"{"comment":"a\nb"}"#), "comment");
    }

    #[test]
    fn test_lenient_numbers() {
        let raw = RawConfig::from_json(r#"{"length":"64","keySize":4096}"#).unwrap();
        assert_eq!(raw.length, Some(64));
        assert_eq!(raw.key_size, Some(4096));
        assert!(RawConfig::from_json(r#"{"length":"lots"}"#).is_err());
    }

    #[test]
    fn test_merge_overlays_set_fields() {
        let base = RawConfig::from_json(r#"{"length":16,"format":"base64"}"#).unwrap();
        let overlay = RawConfig {
            format: Some("hex".into()),
            ..Default::default()
        };
        let merged = base.merge(overlay);
        assert_eq!(merged.length, Some(16));
        assert_eq!(merged.format.as_deref(), Some("hex"));
    }

    #[test]
    fn test_is_asymmetric() {
        let rs256 = resolve(KeyKind::JwtSecret, r#"{"algorithm":"RS256"}"#).unwrap();
        let hs256 = resolve(KeyKind::JwtSecret, "{}").unwrap();
        assert!(rs256.is_asymmetric());
        assert!(!hs256.is_asymmetric());
        assert!(!resolve(KeyKind::Secret, "{}").unwrap().is_asymmetric());
    }
}
