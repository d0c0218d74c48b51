//! High-level vault operations: store, retrieve, admin unlock.
//!
//! `VaultService` composes the cipher provider, entry store, lockout
//! tracker, and persistence so the presentation layer can work with
//! simple method calls.  Operations return result enums — nothing in
//! here renders output or terminates the process.

use std::path::Path;

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::config::Settings;
use crate::crypto::cipher::CipherProvider;
use crate::crypto::digest::digest_passkey;
use crate::errors::{DataVaultError, Result};

use super::clock::{Clock, SystemClock};
use super::entry::VaultEntry;
use super::lockout::{LockStatus, LockoutTracker};
use super::persistence::Persistence;
use super::store::VaultStore;

/// Result of a retrieve operation.
///
/// `lock_expired` rides along on `Success` and `Failure` so the
/// presentation layer can mention that a lock lapsed before this
/// attempt was verified.
#[derive(Debug)]
pub enum RetrieveOutcome {
    /// Verification passed and the token decrypted.
    Success { plaintext: String, lock_expired: bool },

    /// Wrong passkey or unknown token — deliberately indistinguishable,
    /// so an attacker cannot probe which tokens exist.
    Failure {
        attempts_remaining: u32,
        /// This failure put (or kept) the token under lockout.
        locked_now: bool,
        lock_expired: bool,
    },

    /// The token is under an unexpired lockout; no verification was
    /// attempted.
    Locked { remaining_seconds: u64 },
}

/// Result of an admin unlock operation.
#[derive(Debug, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// Admin secret matched: counter reset, and `token_cleared` tells
    /// whether a lock record was removed.
    Reauthorized { token_cleared: bool },

    /// Admin secret did not match.  No state changed.
    Denied,
}

/// The vault orchestrator.  One instance per session.
pub struct VaultService {
    cipher: CipherProvider,
    store: VaultStore,
    tracker: LockoutTracker,
    persistence: Persistence,
    clock: Box<dyn Clock>,
    admin_secret: String,

    /// Count of authenticated-decryption failures on entries whose
    /// digest verified.  Surfaced to the caller as a plain verification
    /// failure, but tracked separately because it signals tampering or
    /// a token minted under a previous process key, not a typo.
    integrity_failures: u32,
}

impl VaultService {
    /// Open the vault with the system clock.  Loads any persisted
    /// entries and lock records; generates a fresh cipher key, so
    /// entries from previous runs are listed but not decryptable.
    pub fn open(settings: &Settings, project_dir: &Path) -> Self {
        Self::with_clock(settings, project_dir, Box::new(SystemClock))
    }

    /// Open the vault with an explicit clock (tests drive lock expiry
    /// through this).
    pub fn with_clock(settings: &Settings, project_dir: &Path, clock: Box<dyn Clock>) -> Self {
        let persistence = Persistence::new(
            &project_dir.join(&settings.vault_dir),
            &settings.data_file,
            &settings.lock_file,
        );

        let store = VaultStore::from_entries(persistence.load_entries());
        let tracker = LockoutTracker::new(
            persistence.load_locks(),
            settings.max_attempts,
            settings.lockout_seconds,
        );

        Self {
            cipher: CipherProvider::generate(),
            store,
            tracker,
            persistence,
            clock,
            admin_secret: settings.admin_secret.clone(),
            integrity_failures: 0,
        }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` under the process key and index it by the
    /// resulting token.  Returns the token for display.
    pub fn store(&mut self, owner: &str, plaintext: &str, passkey: &str) -> Result<String> {
        if owner.trim().is_empty() {
            return Err(DataVaultError::Validation("owner name is required".into()));
        }
        if plaintext.is_empty() {
            return Err(DataVaultError::Validation("secret data is required".into()));
        }
        if passkey.is_empty() {
            return Err(DataVaultError::Validation("passkey is required".into()));
        }

        let passkey_digest = digest_passkey(passkey);
        let token = self.cipher.encrypt(plaintext.as_bytes())?;

        self.store.put(VaultEntry {
            token: token.clone(),
            passkey_digest,
            owner: owner.to_string(),
            created_at: self.clock.now(),
        });
        self.persistence.save_entries(self.store.list())?;

        Ok(token)
    }

    /// Verify `passkey` against the entry for `token` and decrypt it,
    /// subject to the lockout gate.
    pub fn retrieve(&mut self, token: &str, passkey: &str) -> Result<RetrieveOutcome> {
        if token.is_empty() {
            return Err(DataVaultError::Validation(
                "ciphertext token is required".into(),
            ));
        }
        if passkey.is_empty() {
            return Err(DataVaultError::Validation("passkey is required".into()));
        }

        let now = self.clock.now();

        // 1. Lockout gate, before any verification work.
        let mut lock_expired = false;
        match self.tracker.status(token, now) {
            LockStatus::Locked { remaining_seconds } => {
                return Ok(RetrieveOutcome::Locked { remaining_seconds });
            }
            LockStatus::Expired => {
                self.tracker.clear_expired(token);
                self.persistence.save_locks(self.tracker.locks())?;
                lock_expired = true;
            }
            LockStatus::Unlocked => {}
        }

        // 2. Verify.  The digest is computed whether or not the token
        //    exists, and compared in constant time, so an unknown token
        //    is indistinguishable from a wrong passkey.
        let supplied = digest_passkey(passkey);
        let verified = match self.store.get(token) {
            Some(entry) => entry.passkey_digest.matches(&supplied),
            None => false,
        };

        if verified {
            match self.cipher.decrypt(token) {
                Ok(bytes) => {
                    self.tracker.record_success();
                    let plaintext = String::from_utf8(bytes).map_err(|e| {
                        let mut bad_bytes = e.into_bytes();
                        bad_bytes.zeroize();
                        DataVaultError::SerializationError(
                            "decrypted data is not valid UTF-8".to_string(),
                        )
                    })?;
                    return Ok(RetrieveOutcome::Success {
                        plaintext,
                        lock_expired,
                    });
                }
                Err(DataVaultError::Integrity) => {
                    // Digest matched but the token would not decrypt:
                    // tampered input or a token from a previous process
                    // key.  Falls through to the failure path so the
                    // caller sees a generic verification failure.
                    self.integrity_failures += 1;
                }
                Err(e) => return Err(e),
            }
        }

        // 3. Failure transition.
        let outcome = self.tracker.record_failure(token, now);
        if outcome.locked_now {
            self.persistence.save_locks(self.tracker.locks())?;
        }

        Ok(RetrieveOutcome::Failure {
            attempts_remaining: outcome.attempts_remaining,
            locked_now: outcome.locked_now,
            lock_expired,
        })
    }

    /// Compare `admin_secret` against the configured credential and,
    /// on a match, reset the failure counter and clear the given
    /// token's lock.  A mismatch changes nothing — admin failures do
    /// not feed the attempt counter.
    pub fn admin_unlock(&mut self, admin_secret: &str, token: Option<&str>) -> Result<UnlockOutcome> {
        let authorized: bool = admin_secret
            .as_bytes()
            .ct_eq(self.admin_secret.as_bytes())
            .into();
        if !authorized {
            return Ok(UnlockOutcome::Denied);
        }

        let token_cleared = self.tracker.admin_clear(token);
        self.persistence.save_locks(self.tracker.locks())?;

        Ok(UnlockOutcome::Reauthorized { token_cleared })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All entries in insertion order, for display.
    pub fn entries(&self) -> &[VaultEntry] {
        self.store.list()
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    /// Current global failed-attempt count.
    pub fn failed_attempts(&self) -> u32 {
        self.tracker.failed_attempts()
    }

    /// How many integrity failures (tamper signals) this session saw.
    pub fn integrity_failures(&self) -> u32 {
        self.integrity_failures
    }
}
