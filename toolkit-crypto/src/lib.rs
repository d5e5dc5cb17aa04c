//! Encryption layer for the toolkit.
//!
//! Turns any JSON-serializable value plus a passphrase into one opaque
//! base64 string, and back:
//! - PBKDF2-HMAC-SHA256 (100 000 iterations) for key derivation
//! - AES-256-GCM for authenticated encryption
//! - Fresh random salt and nonce per blob, keys zeroized on drop
//!
//! Also provides the password strength heuristic and the password
//! generator used by the password manager views.
//!
//! # Blob format
//!
//! `base64(salt[16] || nonce[12] || ciphertext || tag[16])`. See [`blob`].
//!
//! # Failure reporting
//!
//! [`CryptoManager::try_decrypt`] returns a typed [`CryptoError`].
//! [`CryptoManager::decrypt`] keeps the older contract where any failure,
//! whether a wrong password, tampering or garbage input, is `None`.

pub mod blob;
pub mod cipher;
mod config;
mod error;
pub mod generator;
mod key;
mod manager;
pub mod strength;

pub use blob::{decrypt_json, encrypt_json, EncryptedBlob, HEADER_SIZE, MIN_BLOB_SIZE};
pub use cipher::{
    decrypt, decrypt_string, encrypt, encrypt_string, EncryptedData, NONCE_SIZE, TAG_SIZE,
};
pub use config::{CryptoConfig, DEFAULT_PASSWORD};
pub use error::{CryptoError, CryptoResult};
pub use generator::{
    generate_password, PasswordOptions, DEFAULT_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH,
};
pub use key::{
    derive_key, generate_random_key, DerivedKey, KdfParams, Salt, DEFAULT_KDF_ITERATIONS,
    KEY_SIZE, SALT_SIZE,
};
pub use manager::CryptoManager;
pub use strength::{calculate_strength, PasswordStrengthReport, StrengthColor, StrengthLabel};
