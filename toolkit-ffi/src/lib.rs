//! C ABI exports for embedding the toolkit core.
//!
//! Lets a host (browser shell, desktop wrapper, mobile app) drive the blob
//! codec, password utilities and global search through C-compatible types.
//!
//! All functions return a [`ToolkitError`] code. Values cross the boundary
//! as JSON strings; strings returned through `out_*` pointers are owned by
//! the caller and must be released with [`toolkit_free_string`].
//!
//! There is no global state: the host creates a [`CryptoHandle`] with
//! [`toolkit_crypto_new`] and passes it to every crypto call.

use std::ffi::{c_char, CStr, CString};
use toolkit_crypto::{CryptoConfig, CryptoError, CryptoManager, PasswordOptions};
use toolkit_widgets::search::search_data;
use toolkit_widgets::ToolkitData;
use tracing::warn;

/// Error codes returned by FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolkitError {
    /// Operation succeeded.
    Ok = 0,
    /// Null pointer argument.
    NullPointer = 1,
    /// Invalid UTF-8 string.
    InvalidUtf8 = 2,
    /// JSON parse or serialization error.
    JsonError = 3,
    /// Invalid argument or configuration.
    InvalidArgument = 4,
    /// Encryption, key derivation or random source failure.
    CryptoError = 5,
    /// Blob could not be decrypted (wrong password, tampered or malformed).
    DecryptFailed = 6,
    /// Every password character class was disabled.
    EmptyCharset = 7,
    /// Unknown error.
    Unknown = 99,
}

impl From<&CryptoError> for ToolkitError {
    fn from(err: &CryptoError) -> Self {
        match err {
            e if e.is_decode_failure() => ToolkitError::DecryptFailed,
            CryptoError::EmptyCharset => ToolkitError::EmptyCharset,
            CryptoError::InvalidConfig(_) | CryptoError::InvalidLength(_) => {
                ToolkitError::InvalidArgument
            }
            CryptoError::KeyDerivation(_)
            | CryptoError::Encryption(_)
            | CryptoError::Random(_) => ToolkitError::CryptoError,
            _ => ToolkitError::Unknown,
        }
    }
}

/// Opaque handle owning a configured [`CryptoManager`].
pub struct CryptoHandle {
    manager: CryptoManager,
}

/// Reads a required C string argument.
unsafe fn read_str<'a>(ptr: *const c_char) -> Result<&'a str, ToolkitError> { unsafe {
    if ptr.is_null() {
        return Err(ToolkitError::NullPointer);
    }
    CStr::from_ptr(ptr).to_str().map_err(|_| ToolkitError::InvalidUtf8)
}}

/// Reads an optional C string argument (null means absent).
unsafe fn read_opt_str<'a>(ptr: *const c_char) -> Result<Option<&'a str>, ToolkitError> { unsafe {
    if ptr.is_null() {
        return Ok(None);
    }
    read_str(ptr).map(Some)
}}

/// Hands `value` to the caller through `out`.
unsafe fn write_out(out: *mut *mut c_char, value: String) -> ToolkitError { unsafe {
    match CString::new(value) {
        Ok(s) => {
            *out = s.into_raw();
            ToolkitError::Ok
        }
        Err(_) => ToolkitError::Unknown,
    }
}}

// ============================================================================
// Core Functions
// ============================================================================

/// Installs a stderr `tracing` subscriber honouring `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
#[unsafe(no_mangle)]
pub extern "C" fn toolkit_init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns the library version as a string.
///
/// # Safety
/// - The returned string is statically allocated and must not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn toolkit_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

/// Frees a string allocated by this library.
///
/// # Safety
/// - `s` must be a string allocated by this library, or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn toolkit_free_string(s: *mut c_char) { unsafe {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}}

// ============================================================================
// Crypto Handle
// ============================================================================

/// Creates a crypto handle.
///
/// `config_json` may be null for the default configuration. Returns null if
/// the configuration is not valid UTF-8, not valid JSON, or fails validation.
///
/// # Safety
/// - `config_json` must be null or a valid null-terminated string.
/// - The handle must be released with [`toolkit_crypto_free`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn toolkit_crypto_new(config_json: *const c_char) -> *mut CryptoHandle { unsafe {
    let config = match read_opt_str(config_json) {
        Ok(Some(json)) => match CryptoConfig::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                warn!("rejected crypto config: {e}");
                return std::ptr::null_mut();
            }
        },
        Ok(None) => CryptoConfig::default(),
        Err(_) => return std::ptr::null_mut(),
    };

    match CryptoManager::new(config) {
        Ok(manager) => Box::into_raw(Box::new(CryptoHandle { manager })),
        Err(e) => {
            warn!("rejected crypto config: {e}");
            std::ptr::null_mut()
        }
    }
}}

/// Releases a crypto handle.
///
/// # Safety
/// - `handle` must come from [`toolkit_crypto_new`] and not be used afterwards, or be null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn toolkit_crypto_free(handle: *mut CryptoHandle) { unsafe {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}}

// ============================================================================
// Blob Codec
// ============================================================================

/// Encrypts a JSON value into a base64 blob.
///
/// `password` may be null to use the configured default password.
///
/// # Safety
/// - `handle` must be a live handle from [`toolkit_crypto_new`].
/// - `value_json` must be a valid null-terminated UTF-8 string; `password` may be null.
/// - `out_blob` must be a valid pointer. The result must be freed with `toolkit_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn toolkit_encrypt(
    handle: *const CryptoHandle,
    value_json: *const c_char,
    password: *const c_char,
    out_blob: *mut *mut c_char,
) -> ToolkitError { unsafe {
    if handle.is_null() || out_blob.is_null() {
        return ToolkitError::NullPointer;
    }
    let handle = &*handle;

    let json = match read_str(value_json) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let password = match read_opt_str(password) {
        Ok(p) => p,
        Err(e) => return e,
    };
    let value: serde_json::Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(_) => return ToolkitError::JsonError,
    };

    match handle.manager.encrypt(&value, password) {
        Ok(blob) => write_out(out_blob, blob),
        Err(e) => ToolkitError::from(&e),
    }
}}

/// Decrypts a base64 blob back into a JSON string.
///
/// Every decode failure (wrong password, tampering, malformed input) returns
/// [`ToolkitError::DecryptFailed`]; the reason is only logged.
///
/// # Safety
/// - `handle` must be a live handle from [`toolkit_crypto_new`].
/// - `blob` must be a valid null-terminated UTF-8 string; `password` may be null.
/// - `out_json` must be a valid pointer. The result must be freed with `toolkit_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn toolkit_decrypt(
    handle: *const CryptoHandle,
    blob: *const c_char,
    password: *const c_char,
    out_json: *mut *mut c_char,
) -> ToolkitError { unsafe {
    if handle.is_null() || out_json.is_null() {
        return ToolkitError::NullPointer;
    }
    let handle = &*handle;

    let blob = match read_str(blob) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let password = match read_opt_str(password) {
        Ok(p) => p,
        Err(e) => return e,
    };

    let Some(value) = handle.manager.decrypt(blob, password) else {
        return ToolkitError::DecryptFailed;
    };
    match serde_json::to_string(&value) {
        Ok(json) => write_out(out_json, json),
        Err(_) => ToolkitError::JsonError,
    }
}}

// ============================================================================
// Password Utilities
// ============================================================================

/// Generates a random password.
///
/// `options_json` may be null (all character classes enabled); missing
/// fields default to enabled.
///
/// # Safety
/// - `handle` must be a live handle from [`toolkit_crypto_new`].
/// - `options_json` must be null or a valid null-terminated UTF-8 string.
/// - `out_password` must be a valid pointer. The result must be freed with `toolkit_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn toolkit_generate_password(
    handle: *const CryptoHandle,
    length: usize,
    options_json: *const c_char,
    out_password: *mut *mut c_char,
) -> ToolkitError { unsafe {
    if handle.is_null() || out_password.is_null() {
        return ToolkitError::NullPointer;
    }
    let handle = &*handle;

    let options = match read_opt_str(options_json) {
        Ok(Some(json)) => match serde_json::from_str::<PasswordOptions>(json) {
            Ok(o) => o,
            Err(_) => return ToolkitError::JsonError,
        },
        Ok(None) => PasswordOptions::default(),
        Err(e) => return e,
    };

    match handle.manager.generate_password(length, &options) {
        Ok(password) => write_out(out_password, password),
        Err(e) => ToolkitError::from(&e),
    }
}}

/// Scores a password, writing `{"score", "label", "color"}` JSON.
///
/// # Safety
/// - `password` must be a valid null-terminated UTF-8 string.
/// - `out_json` must be a valid pointer. The result must be freed with `toolkit_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn toolkit_password_strength(
    password: *const c_char,
    out_json: *mut *mut c_char,
) -> ToolkitError { unsafe {
    if out_json.is_null() {
        return ToolkitError::NullPointer;
    }
    let password = match read_str(password) {
        Ok(s) => s,
        Err(e) => return e,
    };

    let report = toolkit_crypto::calculate_strength(password);
    match serde_json::to_string(&report) {
        Ok(json) => write_out(out_json, json),
        Err(_) => ToolkitError::JsonError,
    }
}}

// ============================================================================
// Global Search
// ============================================================================

/// Searches the toolkit data document, writing a JSON array of results.
///
/// # Safety
/// - `data_json` and `query` must be valid null-terminated UTF-8 strings.
/// - `out_json` must be a valid pointer. The result must be freed with `toolkit_free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn toolkit_search(
    data_json: *const c_char,
    query: *const c_char,
    out_json: *mut *mut c_char,
) -> ToolkitError { unsafe {
    if out_json.is_null() {
        return ToolkitError::NullPointer;
    }
    let json = match read_str(data_json) {
        Ok(s) => s,
        Err(e) => return e,
    };
    let query = match read_str(query) {
        Ok(s) => s,
        Err(e) => return e,
    };

    let data = match ToolkitData::from_json(json) {
        Ok(d) => d,
        Err(_) => return ToolkitError::JsonError,
    };
    match serde_json::to_string(&search_data(query, &data)) {
        Ok(json) => write_out(out_json, json),
        Err(_) => ToolkitError::JsonError,
    }
}}
