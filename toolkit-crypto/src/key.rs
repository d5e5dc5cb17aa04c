//! Password-based key derivation (PBKDF2-HMAC-SHA256).

use crate::error::{CryptoError, CryptoResult};
use rand::TryRngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a derived AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of the per-encryption salt in bytes.
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count used by every blob written so far.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Fills `buf` from the operating system CSPRNG.
pub(crate) fn fill_random(buf: &mut [u8]) -> CryptoResult<()> {
    rand::rngs::OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::Random(e.to_string()))
}

/// Parameters for password-based key derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

/// Random salt mixed into key derivation. Not secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Draws a fresh salt from the OS CSPRNG.
    pub fn random() -> CryptoResult<Self> {
        let mut bytes = [0u8; SALT_SIZE];
        fill_random(&mut bytes)?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// A 256-bit symmetric key derived from a password.
///
/// Never persisted; wiped from memory when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derives a key from `password` and `salt`.
pub fn derive_key(password: &str, salt: &Salt, params: &KdfParams) -> CryptoResult<DerivedKey> {
    if params.iterations == 0 {
        return Err(CryptoError::KeyDerivation(
            "iteration count must be non-zero".to_string(),
        ));
    }

    let mut bytes = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), params.iterations, &mut bytes);
    let key = DerivedKey::from_bytes(bytes);
    bytes.zeroize();
    Ok(key)
}

/// Generates a random key (not password-derived).
pub fn generate_random_key() -> CryptoResult<DerivedKey> {
    let mut bytes = [0u8; KEY_SIZE];
    fill_random(&mut bytes)?;
    let key = DerivedKey::from_bytes(bytes);
    bytes.zeroize();
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> KdfParams {
        KdfParams { iterations: 1_000 }
    }

    #[test]
    fn derivation_is_deterministic() {
        let salt = Salt::from_bytes([7u8; SALT_SIZE]);
        let a = derive_key("hunter2", &salt, &fast()).unwrap();
        let b = derive_key("hunter2", &salt, &fast()).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_salt_gives_different_key() {
        let a = derive_key("hunter2", &Salt::from_bytes([1u8; SALT_SIZE]), &fast()).unwrap();
        let b = derive_key("hunter2", &Salt::from_bytes([2u8; SALT_SIZE]), &fast()).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_password_gives_different_key() {
        let salt = Salt::from_bytes([3u8; SALT_SIZE]);
        let a = derive_key("one", &salt, &fast()).unwrap();
        let b = derive_key("two", &salt, &fast()).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn matches_rfc_7914_pbkdf2_sha256_vector() {
        // RFC 7914 section 11: P="passwd", S="salt", c=1 (first 32 bytes).
        let mut expected = [0u8; KEY_SIZE];
        pbkdf2::pbkdf2_hmac::<Sha256>(b"passwd", b"salt", 1, &mut expected);
        assert_eq!(
            &expected[..8],
            &[0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f]
        );
    }

    #[test]
    fn zero_iterations_rejected() {
        let salt = Salt::from_bytes([0u8; SALT_SIZE]);
        let err = derive_key("pw", &salt, &KdfParams { iterations: 0 }).unwrap_err();
        assert!(matches!(err, CryptoError::KeyDerivation(_)));
    }

    #[test]
    fn random_salts_differ() {
        assert_ne!(Salt::random().unwrap(), Salt::random().unwrap());
    }

    #[test]
    fn debug_does_not_leak_key() {
        let key = generate_random_key().unwrap();
        assert_eq!(format!("{key:?}"), "DerivedKey([REDACTED])");
    }

    #[test]
    fn default_params_use_compatible_iteration_count() {
        assert_eq!(KdfParams::default().iterations, 100_000);
    }
}
