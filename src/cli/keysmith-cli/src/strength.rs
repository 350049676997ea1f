//! Heuristic strength estimate for generated text.
//!
//! This looks only at length and character-class variety. It says nothing
//! about the entropy of the source and is meant as a display hint.

use std::fmt;

use keysmith_keygen::KeyKind;

/// Coarse strength bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        })
    }
}

/// Score in `0..=100` and its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strength {
    pub level: StrengthLevel,
    pub score: u32,
}

/// Estimates the strength of `output`, generated as `kind`.
///
/// Short single-class secrets, API keys and JWT secrets are capped at 30.
pub fn estimate(output: &str, kind: KeyKind) -> Strength {
    if output.is_empty() {
        return Strength {
            level: StrengthLevel::Weak,
            score: 0,
        };
    }

    let length = output.chars().count();
    let variety = [
        output.chars().any(|c| c.is_ascii_lowercase()),
        output.chars().any(|c| c.is_ascii_uppercase()),
        output.chars().any(|c| c.is_ascii_digit()),
        output.chars().any(|c| !c.is_ascii_alphanumeric()),
    ]
    .into_iter()
    .filter(|present| *present)
    .count();

    let raw = (length as f64 / 64.0 * 60.0 + variety as f64 * 10.0).round();
    let mut score = raw.min(100.0) as u32;

    let capped_kind = matches!(kind, KeyKind::Secret | KeyKind::ApiKey | KeyKind::JwtSecret);
    if capped_kind && variety <= 1 && length < 32 {
        score = score.min(30);
    }

    let level = match score {
        75.. => StrengthLevel::Strong,
        45.. => StrengthLevel::Medium,
        _ => StrengthLevel::Weak,
    };

    Strength { level, score }
}
