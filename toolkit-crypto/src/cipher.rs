//! AES-256-GCM authenticated encryption under a derived key.

use crate::error::{CryptoError, CryptoResult};
use crate::key::{fill_random, DerivedKey};
use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use serde::{Deserialize, Serialize};

/// AES-GCM nonce (IV) size in bytes.
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Ciphertext plus the nonce it was sealed under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext with the GCM tag appended.
    pub ciphertext: Vec<u8>,
}

fn cipher_for(key: &DerivedKey) -> CryptoResult<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CryptoError::Encryption(format!("invalid key: {e}")))
}

/// Encrypts `plaintext` under `key` with a fresh random nonce.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> CryptoResult<EncryptedData> {
    let mut nonce = [0u8; NONCE_SIZE];
    fill_random(&mut nonce)?;

    let ciphertext = cipher_for(key)?
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::Encryption(format!("AES-GCM seal failed: {e}")))?;

    Ok(EncryptedData { nonce, ciphertext })
}

/// Decrypts and authenticates `data` under `key`.
pub fn decrypt(key: &DerivedKey, data: &EncryptedData) -> CryptoResult<Vec<u8>> {
    if data.ciphertext.len() < TAG_SIZE {
        return Err(CryptoError::MalformedBlob(format!(
            "ciphertext is {} bytes, shorter than the {TAG_SIZE}-byte tag",
            data.ciphertext.len()
        )));
    }

    cipher_for(key)?
        .decrypt(Nonce::from_slice(&data.nonce), data.ciphertext.as_ref())
        .map_err(|_| CryptoError::Authentication)
}

/// Encrypts a UTF-8 string.
pub fn encrypt_string(key: &DerivedKey, plaintext: &str) -> CryptoResult<EncryptedData> {
    encrypt(key, plaintext.as_bytes())
}

/// Decrypts to a UTF-8 string.
pub fn decrypt_string(key: &DerivedKey, data: &EncryptedData) -> CryptoResult<String> {
    let bytes = decrypt(key, data)?;
    String::from_utf8(bytes).map_err(|_| CryptoError::InvalidUtf8)
}
