//! Self-describing encrypted blob format.
//!
//! A blob is the base64 (standard alphabet, padded) encoding of
//!
//! ```text
//! [ salt (16 bytes) | nonce (12 bytes) | ciphertext + tag (N + 16 bytes) ]
//! ```
//!
//! The salt feeds PBKDF2-HMAC-SHA256, the nonce feeds AES-256-GCM. Both are
//! drawn fresh for every blob, so the password is the only other input
//! needed to open it.

use crate::cipher::{self, EncryptedData, NONCE_SIZE, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::key::{derive_key, KdfParams, Salt, SALT_SIZE};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Bytes preceding the ciphertext: salt then nonce.
pub const HEADER_SIZE: usize = SALT_SIZE + NONCE_SIZE;

/// Smallest decodable blob: header plus an empty payload's tag.
pub const MIN_BLOB_SIZE: usize = HEADER_SIZE + TAG_SIZE;

/// Decoded form of an encrypted blob. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedBlob {
    pub salt: Salt,
    pub sealed: EncryptedData,
}

impl EncryptedBlob {
    /// Derives a key for a fresh salt and seals `plaintext` under it.
    pub fn seal(plaintext: &[u8], password: &str, params: &KdfParams) -> CryptoResult<Self> {
        let salt = Salt::random()?;
        let key = derive_key(password, &salt, params)?;
        let sealed = cipher::encrypt(&key, plaintext)?;
        Ok(Self { salt, sealed })
    }

    /// Re-derives the key from the embedded salt and opens the payload.
    pub fn open(&self, password: &str, params: &KdfParams) -> CryptoResult<Vec<u8>> {
        let key = derive_key(password, &self.salt, params)?;
        cipher::decrypt(&key, &self.sealed)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.sealed.ciphertext.len());
        out.extend_from_slice(self.salt.as_bytes());
        out.extend_from_slice(&self.sealed.nonce);
        out.extend_from_slice(&self.sealed.ciphertext);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() < MIN_BLOB_SIZE {
            return Err(CryptoError::MalformedBlob(format!(
                "blob is {} bytes, need at least {MIN_BLOB_SIZE}",
                bytes.len()
            )));
        }

        let (salt, rest) = bytes.split_at(SALT_SIZE);
        let (nonce, ciphertext) = rest.split_at(NONCE_SIZE);

        let mut salt_bytes = [0u8; SALT_SIZE];
        salt_bytes.copy_from_slice(salt);
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        nonce_bytes.copy_from_slice(nonce);

        Ok(Self {
            salt: Salt::from_bytes(salt_bytes),
            sealed: EncryptedData {
                nonce: nonce_bytes,
                ciphertext: ciphertext.to_vec(),
            },
        })
    }

    /// Encodes the blob as a base64 string.
    pub fn encode(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parses a base64 string produced by [`EncryptedBlob::encode`].
    pub fn decode(encoded: &str) -> CryptoResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::MalformedBlob(format!("invalid base64: {e}")))?;
        Self::from_bytes(&bytes)
    }
}

/// Serializes `value` to JSON and encrypts it into an encoded blob.
pub fn encrypt_json<T: Serialize + ?Sized>(
    value: &T,
    password: &str,
    params: &KdfParams,
) -> CryptoResult<String> {
    let json = serde_json::to_vec(value)?;
    let blob = EncryptedBlob::seal(&json, password, params)?;
    let encoded = blob.encode();
    debug!(
        plaintext_len = json.len(),
        blob_len = encoded.len(),
        "sealed JSON blob"
    );
    Ok(encoded)
}

/// Decrypts an encoded blob and parses the payload as JSON.
pub fn decrypt_json<T: DeserializeOwned>(
    encoded: &str,
    password: &str,
    params: &KdfParams,
) -> CryptoResult<T> {
    let blob = EncryptedBlob::decode(encoded)?;
    let plaintext = blob.open(password, params)?;
    let text = String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)?;
    debug!(plaintext_len = text.len(), "opened JSON blob");
    Ok(serde_json::from_str(&text)?)
}
