//! AES-256-GCM authenticated encryption with a process-lifetime key.
//!
//! The key is generated fresh when the provider is constructed and is
//! never written anywhere, so ciphertext tokens minted in one process
//! run cannot be decrypted after a restart.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext, then encodes the whole buffer as
//! URL-safe base64 to form the token.  Because the nonce is random per
//! call, encrypting identical plaintext twice yields distinct tokens —
//! the token doubles as the vault's lookup key, so this is required.
//!
//! Layout of the decoded token bytes:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::URL_SAFE_NO_PAD as TOKEN_BASE64;
use base64::Engine;

use crate::errors::{DataVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Holds the symmetric key for the lifetime of the process.
///
/// Safe to share read-only across sessions: `encrypt` and `decrypt`
/// take `&self` and keep no mutable state.
pub struct CipherProvider {
    cipher: Aes256Gcm,
}

impl CipherProvider {
    /// Generate a fresh random key.  Called once at startup; the key
    /// lives exactly as long as the provider.
    pub fn generate() -> Self {
        let key = Aes256Gcm::generate_key(&mut OsRng);
        Self {
            cipher: Aes256Gcm::new(&key),
        }
    }

    /// Encrypt `plaintext` and return the ciphertext token.
    ///
    /// Non-deterministic: a fresh nonce is drawn per call, so the same
    /// plaintext never produces the same token twice.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| DataVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

        // Prepend the nonce so the token is self-contained.
        let mut buf = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(&ciphertext);

        Ok(TOKEN_BASE64.encode(buf))
    }

    /// Decrypt a token produced by `encrypt`.
    ///
    /// Any failure — malformed base64, truncated buffer, or a bad
    /// authentication tag — is reported as `Integrity`.  A token minted
    /// under a different key (a previous process run, or tampered
    /// input) always lands here.
    pub fn decrypt(&self, token: &str) -> Result<Vec<u8>> {
        let raw = TOKEN_BASE64
            .decode(token)
            .map_err(|_| DataVaultError::Integrity)?;

        // Make sure we have at least a nonce worth of bytes.
        if raw.len() < NONCE_LEN {
            return Err(DataVaultError::Integrity);
        }

        // Split nonce from ciphertext.
        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        // Decrypt and verify the auth tag.
        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| DataVaultError::Integrity)
    }
}
