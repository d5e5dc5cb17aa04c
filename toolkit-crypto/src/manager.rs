//! Stateless façade over the blob codec and password utilities.
//!
//! Constructed once by the composition root and handed to consumers. It
//! only holds immutable configuration, so clones are cheap and every call
//! is independent.

use crate::blob::{decrypt_json, encrypt_json};
use crate::config::CryptoConfig;
use crate::error::{CryptoError, CryptoResult};
use crate::generator::{generate_password, PasswordOptions};
use crate::strength::{calculate_strength, PasswordStrengthReport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

#[derive(Clone, Debug, Default)]
pub struct CryptoManager {
    config: CryptoConfig,
}

impl CryptoManager {
    pub fn new(config: CryptoConfig) -> CryptoResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    fn password<'a>(&'a self, password: Option<&'a str>) -> &'a str {
        password.unwrap_or(&self.config.default_password)
    }

    /// Encrypts a JSON value. `None` uses the configured default password.
    pub fn encrypt(&self, value: &Value, password: Option<&str>) -> CryptoResult<String> {
        self.encrypt_value(value, password)
    }

    /// Decrypts a blob, reporting why it failed.
    pub fn try_decrypt(&self, encoded: &str, password: Option<&str>) -> CryptoResult<Value> {
        self.decrypt_value(encoded, password)
    }

    /// Decrypts a blob, collapsing every failure to `None`.
    ///
    /// Callers cannot tell a wrong password from corrupted data. Use
    /// [`CryptoManager::try_decrypt`] when the distinction matters.
    pub fn decrypt(&self, encoded: &str, password: Option<&str>) -> Option<Value> {
        match self.try_decrypt(encoded, password) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("decryption failed: {e}");
                None
            }
        }
    }

    pub fn encrypt_value<T: Serialize + ?Sized>(
        &self,
        value: &T,
        password: Option<&str>,
    ) -> CryptoResult<String> {
        encrypt_json(value, self.password(password), &self.config.kdf_params())
    }

    pub fn decrypt_value<T: DeserializeOwned>(
        &self,
        encoded: &str,
        password: Option<&str>,
    ) -> CryptoResult<T> {
        decrypt_json(encoded, self.password(password), &self.config.kdf_params())
    }

    /// Like [`CryptoManager::encrypt`], with key derivation on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn encrypt_async(&self, value: Value, password: Option<String>) -> CryptoResult<String> {
        let manager = self.clone();
        tokio::task::spawn_blocking(move || manager.encrypt(&value, password.as_deref()))
            .await
            .map_err(|e| CryptoError::Task(e.to_string()))?
    }

    /// Like [`CryptoManager::decrypt`], with key derivation on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn decrypt_async(&self, encoded: String, password: Option<String>) -> Option<Value> {
        let manager = self.clone();
        match tokio::task::spawn_blocking(move || manager.decrypt(&encoded, password.as_deref())).await {
            Ok(value) => value,
            Err(e) => {
                warn!("decryption task failed: {e}");
                None
            }
        }
    }

    pub fn generate_password(&self, length: usize, options: &PasswordOptions) -> CryptoResult<String> {
        generate_password(length, options)
    }

    /// Generates a password of the configured default length with every class enabled.
    pub fn generate_default_password(&self) -> CryptoResult<String> {
        generate_password(self.config.default_password_length, &PasswordOptions::default())
    }

    pub fn calculate_strength(&self, password: &str) -> PasswordStrengthReport {
        calculate_strength(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manager() -> CryptoManager {
        CryptoManager::new(CryptoConfig::test()).unwrap()
    }

    #[test]
    fn default_password_round_trip() {
        let m = manager();
        let blob = m.encrypt(&json!({"k": "v"}), None).unwrap();
        assert_eq!(m.decrypt(&blob, None), Some(json!({"k": "v"})));
        assert_eq!(m.decrypt(&blob, Some("default-key")), Some(json!({"k": "v"})));
    }

    #[test]
    fn explicit_password_is_not_default() {
        let m = manager();
        let blob = m.encrypt(&json!(1), Some("secret")).unwrap();
        assert_eq!(m.decrypt(&blob, None), None);
    }

    #[test]
    fn try_decrypt_distinguishes_failures() {
        let m = manager();
        let blob = m.encrypt(&json!(1), Some("secret")).unwrap();
        assert!(matches!(
            m.try_decrypt(&blob, Some("wrong")),
            Err(CryptoError::Authentication)
        ));
        assert!(matches!(
            m.try_decrypt("AAAA", Some("secret")),
            Err(CryptoError::MalformedBlob(_))
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = CryptoConfig {
            kdf_iterations: 0,
            ..CryptoConfig::default()
        };
        assert!(CryptoManager::new(config).is_err());
    }

    #[test]
    fn default_password_uses_configured_length() {
        let m = CryptoManager::new(CryptoConfig {
            default_password_length: 24,
            ..CryptoConfig::test()
        })
        .unwrap();
        assert_eq!(m.generate_default_password().unwrap().len(), 24);
    }

    #[test]
    fn typed_values_round_trip() {
        #[derive(Serialize, serde::Deserialize, Debug, PartialEq)]
        struct Login {
            service: String,
            username: String,
        }

        let m = manager();
        let login = Login {
            service: "mail".into(),
            username: "alice".into(),
        };
        let blob = m.encrypt_value(&login, Some("pw")).unwrap();
        let back: Login = m.decrypt_value(&blob, Some("pw")).unwrap();
        assert_eq!(back, login);
    }
}
