//! The closed set of key kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Kind of key material to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    /// Random secret rendered as hex, base64 or alphanumeric text.
    Secret,
    /// Random bytes rendered as base64, optionally URL-safe.
    #[serde(rename = "base64")]
    Base64Blob,
    /// RSA or ECDSA keypair as PKCS#8/SPKI PEM with a SHA-256 fingerprint.
    #[serde(rename = "ssl")]
    SslKeypair,
    /// API token: UUID v4, nanoid or prefixed nanoid.
    #[serde(rename = "api")]
    ApiKey,
    /// JWT signing secret (HS*) or RS256 keypair.
    #[serde(rename = "jwt")]
    JwtSecret,
    /// Symmetric encryption key sized for a cipher.
    #[serde(rename = "encryption")]
    EncryptionKey,
    /// SSH keypair.
    #[serde(rename = "ssh")]
    SshKeypair,
}

impl KeyKind {
    /// All kinds, in presentation order.
    pub const ALL: [KeyKind; 7] = [
        Self::Secret,
        Self::Base64Blob,
        Self::SslKeypair,
        Self::ApiKey,
        Self::JwtSecret,
        Self::EncryptionKey,
        Self::SshKeypair,
    ];

    /// Short identifier used on the command line and in config files.
    pub fn id(self) -> &'static str {
        match self {
            Self::Secret => "secret",
            Self::Base64Blob => "base64",
            Self::SslKeypair => "ssl",
            Self::ApiKey => "api",
            Self::JwtSecret => "jwt",
            Self::EncryptionKey => "encryption",
            Self::SshKeypair => "ssh",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for KeyKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GenerationError::UnsupportedKeyKind(s.to_string()))
    }
}
