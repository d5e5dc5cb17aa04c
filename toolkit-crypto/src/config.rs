//! Crypto manager configuration.

use crate::error::{CryptoError, CryptoResult};
use crate::generator::{DEFAULT_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH};
use crate::key::{KdfParams, DEFAULT_KDF_ITERATIONS};
use serde::{Deserialize, Serialize};

/// Password used when the caller supplies none.
///
/// This is obfuscation only: anyone holding a blob can open it with this
/// value. Kept so blobs written without a password stay readable.
pub const DEFAULT_PASSWORD: &str = "default-key";

/// Configuration for [`crate::CryptoManager`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// PBKDF2 iterations. Blobs only open with the count they were sealed with.
    pub kdf_iterations: u32,

    /// Password substituted when none is given.
    pub default_password: String,

    /// Length used by `generate_default_password`.
    pub default_password_length: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
            default_password: DEFAULT_PASSWORD.to_string(),
            default_password_length: DEFAULT_PASSWORD_LENGTH,
        }
    }
}

impl CryptoConfig {
    /// Parses a JSON config, filling missing fields with defaults.
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CryptoResult<()> {
        if self.kdf_iterations == 0 {
            return Err(CryptoError::InvalidConfig(
                "kdf_iterations must be non-zero".to_string(),
            ));
        }
        if self.default_password_length == 0 {
            return Err(CryptoError::InvalidConfig(
                "default_password_length must be non-zero".to_string(),
            ));
        }
        if self.default_password_length > MAX_PASSWORD_LENGTH {
            return Err(CryptoError::InvalidConfig(format!(
                "default_password_length must be at most {MAX_PASSWORD_LENGTH}"
            )));
        }
        Ok(())
    }

    pub fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.kdf_iterations,
        }
    }

    /// Creates a config with a cheap KDF for tests.
    #[cfg(test)]
    pub fn test() -> Self {
        Self {
            kdf_iterations: 1_000,
            ..Self::default()
        }
    }
}
