//! Keysmith CLI - Command line key generator.

mod strength;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use keysmith_codec::{pem_label, pem_unwrap, sha256_colon_hex};
use keysmith_keygen::config::{EncryptionConfig, EncryptionFormat};
use keysmith_keygen::{resolve_config, GeneratedKey, KeyGenerator, KeyKind, KeySpec, RawConfig};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Upper bound for `--count`.
const MAX_COUNT: u16 = 50;

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "keysmith")]
#[command(about = "Keysmith - Generate secrets, API keys, and keypairs")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one or more keys
    Generate(GenerateArgs),
    /// Print the SHA-256 fingerprint of a PEM block
    Fingerprint {
        /// PEM file (reads stdin if not provided)
        file: Option<PathBuf>,
    },
    /// Convert the first PEM block of a file to binary DER
    Der {
        /// PEM file (reads stdin if not provided)
        file: Option<PathBuf>,
        /// Write DER to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List supported key kinds and their defaults
    Kinds,
}

#[derive(Args)]
struct GenerateArgs {
    /// Key kind (secret, base64, ssl, api, jwt, encryption, ssh)
    kind: String,

    #[command(flatten)]
    overrides: ConfigArgs,

    /// JSON configuration file; flags take precedence over its values
    #[arg(long, env = "KEYSMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Number of keys to generate
    #[arg(
        long,
        default_value_t = 1,
        env = "KEYSMITH_COUNT",
        value_parser = clap::value_parser!(u16).range(1..=MAX_COUNT as i64)
    )]
    count: u16,

    /// Generate keys concurrently
    #[arg(long)]
    parallel: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a strength estimate to stderr
    #[arg(long)]
    strength: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Secret or nanoid length
    #[arg(long)]
    length: Option<i64>,
    /// Output format (hex, base64, alphanumeric, uuid, nanoid, prefixed, raw)
    #[arg(long)]
    format: Option<String>,
    /// Number of random bytes for base64 blobs
    #[arg(long)]
    byte_length: Option<i64>,
    /// Use the URL-safe base64 alphabet without padding [--url-safe=false to disable]
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    url_safe: Option<bool>,
    /// Algorithm (rsa, ecdsa, ed25519, HS256, RS256, aes-256, ...)
    #[arg(long)]
    algorithm: Option<String>,
    /// RSA modulus size in bits
    #[arg(long)]
    key_size: Option<i64>,
    /// ECDSA curve (P-256, P-384, P-521)
    #[arg(long)]
    curve: Option<String>,
    /// Prefix for prefixed API keys
    #[arg(long)]
    prefix: Option<String>,
    /// Comment for the OpenSSH public key line
    #[arg(long)]
    comment: Option<String>,
    /// Use rejection sampling for alphabet mapping [--unbiased=false to disable]
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    unbiased: Option<bool>,
    /// Emit the RFC 8709 blob in the Ed25519 public key line [--openssh-wire=false to disable]
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    openssh_wire: Option<bool>,
}

impl ConfigArgs {
    fn into_raw(self) -> RawConfig {
        RawConfig {
            length: self.length,
            format: self.format,
            byte_length: self.byte_length,
            url_safe: self.url_safe,
            algorithm: self.algorithm,
            key_size: self.key_size,
            curve: self.curve,
            prefix: self.prefix,
            comment: self.comment,
            unbiased: self.unbiased,
            openssh_wire: self.openssh_wire,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: &Path) -> Result<RawConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    RawConfig::from_json(&json)
        .with_context(|| format!("Invalid config file {}", path.display()))
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        },
    }
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
            Ok(())
        },
    }
}

fn kind_defaults(kind: KeyKind) -> &'static str {
    match kind {
        KeyKind::Secret => "32 bytes, hex",
        KeyKind::Base64Blob => "32 bytes, standard alphabet",
        KeyKind::SslKeypair => "RSA 2048 (rsa, ecdsa, ed25519)",
        KeyKind::ApiKey => "UUID v4 (uuid, nanoid, prefixed)",
        KeyKind::JwtSecret => "HS256 (HS256, HS384, HS512, RS256)",
        KeyKind::EncryptionKey => "AES-256, hex (aes-128, aes-192, aes-256, chacha20)",
        KeyKind::SshKeypair => "Ed25519, comment user@host (ed25519, rsa, ecdsa)",
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

async fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let kind = KeyKind::from_str(&args.kind)?;

    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => RawConfig::default(),
    };
    let raw = base.merge(args.overrides.into_raw());

    // Validate before generating so bad flags fail fast and raw output can
    // be rejected for bulk runs.
    let spec = resolve_config(kind, &raw)?;
    let count = usize::from(args.count);
    let raw_bytes = matches!(
        spec,
        KeySpec::EncryptionKey(EncryptionConfig {
            format: EncryptionFormat::Raw,
            ..
        })
    );
    if raw_bytes && count > 1 {
        bail!("Raw output cannot be combined with --count greater than 1");
    }

    debug!(kind = %kind, spec = %spec, count, parallel = args.parallel, "Generating");

    let generator = KeyGenerator::system();
    let keys = if count == 1 {
        vec![generator.generate_async(kind, &raw).await?]
    } else {
        generator
            .generate_many(kind, &raw, count, args.parallel)
            .await?
    };

    let mut texts = Vec::with_capacity(keys.len());
    for key in &keys {
        match key {
            GeneratedKey::Text(text) => texts.push(text.as_str()),
            GeneratedKey::Raw(bytes) => {
                write_output(args.output.as_deref(), bytes)?;
                if args.strength {
                    eprintln!("Strength: not available for raw output");
                }
                return Ok(());
            },
        }
    }

    if args.strength {
        for (i, text) in texts.iter().enumerate() {
            let estimate = strength::estimate(text, kind);
            if texts.len() == 1 {
                eprintln!("Strength: {} ({}/100)", estimate.level, estimate.score);
            } else {
                eprintln!("Strength [{}]: {} ({}/100)", i + 1, estimate.level, estimate.score);
            }
        }
    }

    let mut joined = texts.join("\n\n");
    joined.push('\n');
    write_output(args.output.as_deref(), joined.as_bytes())?;

    if let Some(path) = &args.output {
        eprintln!("Wrote {} key(s) to {}", texts.len(), path.display());
    }

    Ok(())
}

fn cmd_fingerprint(file: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    let der = pem_unwrap(&text).context("Input does not contain a PEM block")?;
    let label = pem_label(&text).unwrap_or("UNKNOWN");

    println!("Label:       {}", label);
    println!("DER length:  {} bytes", der.len());
    println!("SHA-256:     {}", sha256_colon_hex(&der));

    Ok(())
}

fn cmd_der(file: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let text = read_input(file)?;
    let der = pem_unwrap(&text).context("Input does not contain a PEM block")?;

    debug!(label = pem_label(&text), len = der.len(), "Converted PEM to DER");
    write_output(output, &der)?;

    if let Some(path) = output {
        eprintln!("Wrote {} bytes of DER to {}", der.len(), path.display());
    }

    Ok(())
}

fn cmd_kinds() -> Result<()> {
    println!("Supported key kinds:");
    for kind in KeyKind::ALL {
        println!("  {:<12} {}", kind.id(), kind_defaults(kind));
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => cmd_generate(args).await,
        Commands::Fingerprint { file } => cmd_fingerprint(file.as_deref()),
        Commands::Der { file, output } => cmd_der(file.as_deref(), output.as_deref()),
        Commands::Kinds => cmd_kinds(),
    }
}
