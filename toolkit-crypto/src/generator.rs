//! Random password generation from configurable character classes.
//!
//! Each character is `byte % charset.len()` over bytes from the OS CSPRNG.
//! When 256 is not a multiple of the charset size the earlier characters
//! are very slightly more likely; this is an accepted approximation.

use crate::error::{CryptoError, CryptoResult};
use crate::key::fill_random;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

/// Longest password [`generate_password`] will produce.
pub const MAX_PASSWORD_LENGTH: usize = 4096;

/// Character classes to draw from. Every class is enabled by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordOptions {
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
        }
    }
}

impl PasswordOptions {
    /// Union of the enabled classes, in uppercase, lowercase, digits, symbols order.
    pub fn charset(&self) -> Vec<u8> {
        let mut charset = Vec::new();
        if self.uppercase {
            charset.extend_from_slice(UPPERCASE.as_bytes());
        }
        if self.lowercase {
            charset.extend_from_slice(LOWERCASE.as_bytes());
        }
        if self.numbers {
            charset.extend_from_slice(NUMBERS.as_bytes());
        }
        if self.symbols {
            charset.extend_from_slice(SYMBOLS.as_bytes());
        }
        charset
    }
}

/// Generates a `length`-character password.
///
/// Fails with [`CryptoError::EmptyCharset`] when every class is disabled and
/// with [`CryptoError::InvalidLength`] above [`MAX_PASSWORD_LENGTH`].
pub fn generate_password(length: usize, options: &PasswordOptions) -> CryptoResult<String> {
    let charset = options.charset();
    if charset.is_empty() {
        return Err(CryptoError::EmptyCharset);
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(CryptoError::InvalidLength(length));
    }

    let mut random = vec![0u8; length];
    fill_random(&mut random)?;

    let password = random
        .iter()
        .map(|b| charset[*b as usize % charset.len()] as char)
        .collect();
    random.zeroize();
    Ok(password)
}
