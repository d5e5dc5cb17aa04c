use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pretty_assertions::assert_eq;
use serde_json::json;
use toolkit_crypto::{
    calculate_strength, generate_password, CryptoConfig, CryptoError, CryptoManager,
    EncryptedBlob, PasswordOptions, StrengthLabel, HEADER_SIZE, MIN_BLOB_SIZE,
};

fn fast_manager() -> CryptoManager {
    CryptoManager::new(CryptoConfig {
        kdf_iterations: 1_000,
        ..CryptoConfig::default()
    })
    .unwrap()
}

fn sample() -> serde_json::Value {
    json!({
        "passwords": [
            {"id": 1, "service": "mail", "username": "alice", "password": "s3cr3t!"},
            {"id": "b2", "service": "bank", "username": "alice@example.com"}
        ],
        "nested": {"list": [1, 2.5, null, true, "ünïcødé"]},
        "empty": {}
    })
}

// ── Round trip ───────────────────────────────────────────────────

#[test]
fn round_trip_with_production_iterations() {
    let manager = CryptoManager::default();
    let blob = manager.encrypt(&sample(), Some("correct horse")).unwrap();
    assert_eq!(manager.decrypt(&blob, Some("correct horse")), Some(sample()));
}

#[test]
fn round_trip_scalars() {
    let manager = fast_manager();
    for value in [json!(null), json!(0), json!(-1.5), json!("text"), json!([]), json!(false)] {
        let blob = manager.encrypt(&value, Some("pw")).unwrap();
        assert_eq!(manager.decrypt(&blob, Some("pw")), Some(value));
    }
}

#[test]
fn empty_password_still_round_trips() {
    let manager = fast_manager();
    let blob = manager.encrypt(&json!("x"), Some("")).unwrap();
    assert_eq!(manager.decrypt(&blob, Some("")), Some(json!("x")));
}

// ── Rejection ────────────────────────────────────────────────────

#[test]
fn wrong_password_yields_none() {
    let manager = fast_manager();
    let blob = manager.encrypt(&sample(), Some("right")).unwrap();
    assert_eq!(manager.decrypt(&blob, Some("wrong")), None);
}

#[test]
fn flipping_any_ciphertext_byte_yields_none() {
    let manager = fast_manager();
    let blob = manager.encrypt(&json!({"a": "b"}), Some("pw")).unwrap();
    let bytes = STANDARD.decode(&blob).unwrap();

    for i in HEADER_SIZE..bytes.len() {
        let mut tampered = bytes.clone();
        tampered[i] ^= 0x01;
        let encoded = STANDARD.encode(&tampered);
        assert_eq!(manager.decrypt(&encoded, Some("pw")), None, "byte {i} flipped");
    }
}

#[test]
fn flipping_salt_or_nonce_yields_none() {
    let manager = fast_manager();
    let blob = manager.encrypt(&json!([1, 2, 3]), Some("pw")).unwrap();
    let bytes = STANDARD.decode(&blob).unwrap();

    for i in [0, 15, 16, 27] {
        let mut tampered = bytes.clone();
        tampered[i] ^= 0x80;
        assert_eq!(manager.decrypt(&STANDARD.encode(&tampered), Some("pw")), None);
    }
}

#[test]
fn garbage_inputs_yield_none() {
    let manager = fast_manager();
    for input in ["", "!!!", "AAAA", "aGVsbG8gd29ybGQ="] {
        assert_eq!(manager.decrypt(input, Some("pw")), None, "input {input:?}");
    }
}

#[test]
fn truncated_blob_is_malformed() {
    let manager = fast_manager();
    let blob = manager.encrypt(&json!("x"), Some("pw")).unwrap();
    let bytes = STANDARD.decode(&blob).unwrap();
    let truncated = STANDARD.encode(&bytes[..MIN_BLOB_SIZE - 1]);

    assert!(matches!(
        manager.try_decrypt(&truncated, Some("pw")),
        Err(CryptoError::MalformedBlob(_))
    ));
}

#[test]
fn collapsed_errors_are_all_decode_failures() {
    let manager = fast_manager();
    let blob = manager.encrypt(&json!("x"), Some("pw")).unwrap();
    let not_json = EncryptedBlob::seal(b"{{", "pw", &manager.config().kdf_params())
        .unwrap()
        .encode();

    for (input, password) in [("%%%", "pw"), (blob.as_str(), "nope"), (not_json.as_str(), "pw")] {
        let err = manager.try_decrypt(input, Some(password)).unwrap_err();
        assert!(err.is_decode_failure(), "{err}");
    }
}

// ── Freshness ────────────────────────────────────────────────────

#[test]
fn each_encryption_is_fresh() {
    let manager = fast_manager();
    let a = manager.encrypt(&sample(), Some("pw")).unwrap();
    let b = manager.encrypt(&sample(), Some("pw")).unwrap();
    assert_ne!(a, b);

    let a = EncryptedBlob::decode(&a).unwrap();
    let b = EncryptedBlob::decode(&b).unwrap();
    assert_ne!(a.salt, b.salt);
    assert_ne!(a.sealed.nonce, b.sealed.nonce);
}

#[test]
fn concurrent_encryptions_never_share_salt_or_nonce() {
    let manager = fast_manager();
    let blobs: Vec<EncryptedBlob> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| manager.encrypt(&json!("same"), Some("pw")).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|h| EncryptedBlob::decode(&h.join().unwrap()).unwrap())
            .collect()
    });

    for (i, a) in blobs.iter().enumerate() {
        for b in &blobs[i + 1..] {
            assert_ne!(a.salt, b.salt);
            assert_ne!(a.sealed.nonce, b.sealed.nonce);
        }
    }
}

// ── Async ────────────────────────────────────────────────────────

#[tokio::test]
async fn async_round_trip() {
    let manager = fast_manager();
    let blob = manager
        .encrypt_async(sample(), Some("pw".to_string()))
        .await
        .unwrap();
    assert_eq!(
        manager.decrypt_async(blob.clone(), Some("pw".to_string())).await,
        Some(sample())
    );
    assert_eq!(manager.decrypt_async(blob, None).await, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_async_encryptions_are_independent() {
    let manager = fast_manager();
    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let m = manager.clone();
            tokio::spawn(async move { (i, m.encrypt_async(json!(i), None).await.unwrap()) })
        })
        .collect();

    let mut seen = std::collections::HashSet::new();
    for task in tasks {
        let (i, blob) = task.await.unwrap();
        assert!(seen.insert(blob.clone()));
        assert_eq!(manager.decrypt(&blob, None), Some(json!(i)));
    }
}

// ── Password utilities ───────────────────────────────────────────

#[test]
fn strength_examples() {
    let weak = calculate_strength("aaaaaaaa");
    assert_eq!((weak.score, weak.label), (30, StrengthLabel::Weak));

    let strong = calculate_strength("Aa1!aaaaaaaa");
    assert_eq!(strong.label, StrengthLabel::Strong);
}

#[test]
fn generator_with_no_classes_fails_explicitly() {
    let none = PasswordOptions {
        uppercase: false,
        lowercase: false,
        numbers: false,
        symbols: false,
    };
    assert!(matches!(generate_password(16, &none), Err(CryptoError::EmptyCharset)));
}

#[test]
fn generated_default_password_is_strong() {
    let manager = fast_manager();
    // 16 chars from the full set always reaches at least the length bonus of 50.
    let pw = manager.generate_default_password().unwrap();
    assert!(manager.calculate_strength(&pw).score >= 50);
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn encrypt_decrypt_always_roundtrips(
            text in ".*",
            number in any::<i64>(),
            flag in any::<bool>(),
            password in "[ -~]{1,24}",
        ) {
            let manager = fast_manager();
            let value = json!({"text": text, "number": number, "flag": flag});
            let blob = manager.encrypt(&value, Some(password.as_str())).unwrap();
            prop_assert_eq!(manager.decrypt(&blob, Some(password.as_str())), Some(value));
        }

        #[test]
        fn different_password_never_decrypts(
            p1 in "[a-z]{1,12}",
            p2 in "[a-z]{1,12}",
        ) {
            prop_assume!(p1 != p2);
            let manager = fast_manager();
            let blob = manager.encrypt(&json!("secret"), Some(p1.as_str())).unwrap();
            prop_assert_eq!(manager.decrypt(&blob, Some(p2.as_str())), None);
        }

        #[test]
        fn strength_score_never_exceeds_hundred(password in ".*") {
            prop_assert!(calculate_strength(&password).score <= 100);
        }
    }
}
