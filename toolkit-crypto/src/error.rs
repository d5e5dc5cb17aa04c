//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while encrypting, decrypting or generating secrets.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Blob is not valid base64 or is too short to hold salt, nonce and tag.
    #[error("malformed blob: {0}")]
    MalformedBlob(String),

    /// Tag verification failed (wrong password or tampered data).
    #[error("authentication failed (wrong password or tampered data)")]
    Authentication,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("secure random source failed: {0}")]
    Random(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every character class was disabled, so there is nothing to draw from.
    #[error("password charset is empty (all character classes disabled)")]
    EmptyCharset,

    #[error("password length {0} exceeds the maximum")]
    InvalidLength(usize),

    #[error("background task failed: {0}")]
    Task(String),
}

impl CryptoError {
    /// Whether this error means "the stored data could not be recovered".
    ///
    /// These are the failures the compatibility decrypt path collapses to
    /// `None`: malformed input, authentication failure and payloads that do
    /// not decode back into a value.
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            Self::MalformedBlob(_) | Self::Authentication | Self::Serialization(_) | Self::InvalidUtf8
        )
    }
}
