//! Dispatch facade: kind + raw configuration in, generated key out.

use std::str::FromStr;

use keysmith_crypto::CryptoProvider;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::{resolve_config, KeySpec, RawConfig};
use crate::error::GenerationError;
use crate::generators::{api, blob, encryption, jwt, secret, ssh, ssl};
use crate::kind::KeyKind;
use crate::output::GeneratedKey;

/// Generates key material through a shared [`CryptoProvider`].
///
/// Cloning is cheap; clones share the provider.
#[derive(Debug, Clone, Default)]
pub struct KeyGenerator {
    provider: CryptoProvider,
}

impl KeyGenerator {
    /// Creates a generator over `provider`.
    pub fn new(provider: CryptoProvider) -> Self {
        Self { provider }
    }

    /// Creates a generator backed by the operating system CSPRNG.
    pub fn system() -> Self {
        Self::new(CryptoProvider::system())
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &CryptoProvider {
        &self.provider
    }

    /// Resolves `raw` for `kind` and generates one key.
    ///
    /// # Errors
    ///
    /// Configuration errors are raised before any randomness is drawn.
    /// Provider failures are surfaced unchanged.
    pub fn generate(
        &self,
        kind: KeyKind,
        raw: &RawConfig,
    ) -> Result<GeneratedKey, GenerationError> {
        let spec = resolve_config(kind, raw)?;
        self.generate_spec(&spec)
    }

    /// Parses `kind` (e.g. `"ssh"`) and generates one key.
    pub fn generate_named(
        &self,
        kind: &str,
        raw: &RawConfig,
    ) -> Result<GeneratedKey, GenerationError> {
        self.generate(KeyKind::from_str(kind)?, raw)
    }

    /// Generates one key from an already validated spec.
    pub fn generate_spec(&self, spec: &KeySpec) -> Result<GeneratedKey, GenerationError> {
        debug!(kind = %spec.kind(), spec = %spec, "Generating key");

        let provider = &self.provider;
        let key = match spec {
            KeySpec::Secret(config) => GeneratedKey::Text(secret::generate(provider, config)?),
            KeySpec::Base64Blob(config) => GeneratedKey::Text(blob::generate(provider, config)?),
            KeySpec::SslKeypair(config) => GeneratedKey::Text(ssl::generate(provider, config)?),
            KeySpec::ApiKey(config) => GeneratedKey::Text(api::generate(provider, config)?),
            KeySpec::JwtSecret(config) => GeneratedKey::Text(jwt::generate(provider, config)?),
            KeySpec::EncryptionKey(config) => encryption::generate(provider, config)?,
            KeySpec::SshKeypair(config) => GeneratedKey::Text(ssh::generate(provider, config)?),
        };

        Ok(key)
    }

    /// Generates one key without blocking the async runtime.
    ///
    /// Asymmetric specs run on Tokio's blocking pool; everything else is
    /// cheap enough to run inline.
    pub async fn generate_async(
        &self,
        kind: KeyKind,
        raw: &RawConfig,
    ) -> Result<GeneratedKey, GenerationError> {
        let spec = resolve_config(kind, raw)?;
        if !spec.is_asymmetric() {
            return self.generate_spec(&spec);
        }

        let generator = self.clone();
        tokio::task::spawn_blocking(move || generator.generate_spec(&spec))
            .await
            .map_err(|e| GenerationError::TaskFailed(e.to_string()))?
    }

    /// Generates `count` independent keys of the same configuration.
    ///
    /// The configuration is validated once, before anything is generated.
    /// With `parallel`, every key is generated on the blocking pool and
    /// results are returned in completion order. The first failure aborts
    /// the batch.
    ///
    /// # Errors
    ///
    /// A `count` of zero is an [`GenerationError::InvalidParameter`].
    pub async fn generate_many(
        &self,
        kind: KeyKind,
        raw: &RawConfig,
        count: usize,
        parallel: bool,
    ) -> Result<Vec<GeneratedKey>, GenerationError> {
        if count == 0 {
            return Err(GenerationError::invalid("count", "must be at least 1"));
        }
        let spec = resolve_config(kind, raw)?;

        let mut keys = Vec::with_capacity(count);
        if parallel {
            let mut tasks = JoinSet::new();
            for _ in 0..count {
                let generator = self.clone();
                let spec = spec.clone();
                tasks.spawn_blocking(move || generator.generate_spec(&spec));
            }
            while let Some(joined) = tasks.join_next().await {
                let key = joined.map_err(|e| GenerationError::TaskFailed(e.to_string()))??;
                keys.push(key);
            }
        } else {
            for _ in 0..count {
                let generator = self.clone();
                let spec = spec.clone();
                let key = if spec.is_asymmetric() {
                    tokio::task::spawn_blocking(move || generator.generate_spec(&spec))
                        .await
                        .map_err(|e| GenerationError::TaskFailed(e.to_string()))??
                } else {
                    generator.generate_spec(&spec)?
                };
                keys.push(key);
            }
        }

        info!(kind = %kind, count, parallel, "Generated key batch");
        Ok(keys)
    }
}

/// Generates one key of `kind` with the system provider.
pub fn generate(kind: KeyKind, raw: &RawConfig) -> Result<GeneratedKey, GenerationError> {
    KeyGenerator::system().generate(kind, raw)
}
