//! Integration tests for the DataVault crypto module.

use datavault::crypto::cipher::CipherProvider;
use datavault::crypto::digest::digest_passkey;
use datavault::errors::DataVaultError;

// ---------------------------------------------------------------------------
// Encrypt / decrypt round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let cipher = CipherProvider::generate();

    let token = cipher.encrypt(b"hello world").expect("encrypt");
    let plaintext = cipher.decrypt(&token).expect("decrypt");

    assert_eq!(plaintext, b"hello world");
}

#[test]
fn token_is_printable_and_key_safe() {
    let cipher = CipherProvider::generate();
    let token = cipher.encrypt(b"payload").unwrap();

    // URL-safe base64: no padding, no whitespace, usable as a map key.
    assert!(token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
}

// ---------------------------------------------------------------------------
// Non-determinism: same plaintext, distinct tokens
// ---------------------------------------------------------------------------

#[test]
fn same_plaintext_yields_distinct_tokens() {
    let cipher = CipherProvider::generate();

    let a = cipher.encrypt(b"same data").unwrap();
    let b = cipher.encrypt(b"same data").unwrap();

    assert_ne!(a, b, "fresh nonce per call must produce distinct tokens");
    assert_eq!(cipher.decrypt(&a).unwrap(), b"same data");
    assert_eq!(cipher.decrypt(&b).unwrap(), b"same data");
}

// ---------------------------------------------------------------------------
// Integrity failures
// ---------------------------------------------------------------------------

#[test]
fn tampered_token_fails_integrity() {
    let cipher = CipherProvider::generate();
    let token = cipher.encrypt(b"secret").unwrap();

    // Flip one character near the end (inside the ciphertext/tag region).
    let mut tampered: Vec<char> = token.chars().collect();
    let last = tampered.len() - 1;
    tampered[last] = if tampered[last] == 'A' { 'B' } else { 'A' };
    let tampered: String = tampered.into_iter().collect();

    let result = cipher.decrypt(&tampered);
    assert!(matches!(result, Err(DataVaultError::Integrity)));
}

#[test]
fn foreign_key_token_fails_integrity() {
    // A token minted under a different key must not decrypt — this is
    // exactly what happens to persisted tokens after a process restart.
    let old = CipherProvider::generate();
    let new = CipherProvider::generate();

    let token = old.encrypt(b"from a previous run").unwrap();
    let result = new.decrypt(&token);

    assert!(matches!(result, Err(DataVaultError::Integrity)));
}

#[test]
fn garbage_input_fails_integrity_not_panics() {
    let cipher = CipherProvider::generate();

    for garbage in ["", "not base64 !!!", "AAAA", "YWJj"] {
        let result = cipher.decrypt(garbage);
        assert!(
            matches!(result, Err(DataVaultError::Integrity)),
            "input {garbage:?} should fail cleanly"
        );
    }
}

// ---------------------------------------------------------------------------
// Passkey digests
// ---------------------------------------------------------------------------

#[test]
fn digest_is_deterministic_across_providers() {
    // Unlike encryption, hashing has no per-call randomness — a stored
    // digest must equal a freshly computed one.
    let a = digest_passkey("my-passkey");
    let b = digest_passkey("my-passkey");
    assert!(a.matches(&b));
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn digest_is_not_the_passkey() {
    let d = digest_passkey("plaintext-passkey");
    assert_ne!(d.as_bytes().as_slice(), b"plaintext-passkey");
    assert_eq!(d.as_bytes().len(), 32);
}
