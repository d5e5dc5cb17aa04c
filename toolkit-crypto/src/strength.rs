//! Heuristic password strength scoring.
//!
//! Additive and deterministic: length milestones plus one bonus per
//! character class present, capped at 100.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical strength bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLabel {
    fn from_score(score: u8) -> Self {
        match score {
            0..40 => Self::Weak,
            40..70 => Self::Medium,
            _ => Self::Strong,
        }
    }

    /// Display colour hint for this bucket.
    pub fn color(self) -> StrengthColor {
        match self {
            Self::Weak => StrengthColor::Red,
            Self::Medium => StrengthColor::Yellow,
            Self::Strong => StrengthColor::Green,
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthColor {
    Red,
    Yellow,
    Green,
}

impl fmt::Display for StrengthColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        })
    }
}

/// Result of [`calculate_strength`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrengthReport {
    pub score: u8,
    pub label: StrengthLabel,
    pub color: StrengthColor,
}

/// Scores `password` on a 0-100 scale.
///
/// Length is measured in UTF-16 code units so that scores agree with the
/// browser-side widget for non-BMP input.
pub fn calculate_strength(password: &str) -> PasswordStrengthReport {
    let len = password.encode_utf16().count();

    let mut score: u32 = 0;
    if len >= 8 {
        score += 20;
    }
    if len >= 12 {
        score += 20;
    }
    if len >= 16 {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 10;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 20;
    }

    let score = score.min(100) as u8;
    let label = StrengthLabel::from_score(score);
    PasswordStrengthReport {
        score,
        label,
        color: label.color(),
    }
}
