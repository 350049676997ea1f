//! # Keysmith Keygen
//!
//! Key generation engine for Keysmith.
//!
//! A caller picks a [`KeyKind`] and supplies a loosely typed [`RawConfig`].
//! The facade applies defaults, validates into a [`KeySpec`], dispatches to
//! the generator for that kind and returns a [`GeneratedKey`]:
//!
//! ```no_run
//! use keysmith_keygen::{generate, KeyKind, RawConfig};
//!
//! let raw = RawConfig::from_json(r#"{"length": 48, "format": "base64"}"#)?;
//! let key = generate(KeyKind::Secret, &raw)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Invalid configuration is rejected before any randomness is drawn.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod facade;
pub mod generators;
pub mod kind;
pub mod output;

pub use config::{resolve_config, KeySpec, RawConfig};
pub use error::GenerationError;
pub use facade::{generate, KeyGenerator};
pub use kind::KeyKind;
pub use output::GeneratedKey;
