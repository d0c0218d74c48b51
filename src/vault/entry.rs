//! Record types stored by the vault.
//!
//! A `VaultEntry` is immutable once created: the ciphertext token is
//! both the encrypted payload and the lookup key, so there is nothing
//! to mutate without invalidating the entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crypto::digest::PasskeyDigest;

/// A single encrypted entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    /// The ciphertext token — encryption output doubling as the lookup key.
    pub token: String,

    /// One-way digest of the passkey chosen at store time.
    /// The plaintext passkey is never retained.
    pub passkey_digest: PasskeyDigest,

    /// Who stored the entry (display label, not an identity).
    pub owner: String,

    /// When the entry was stored.
    pub created_at: DateTime<Utc>,
}

/// A timed lockout on a single ciphertext token.
///
/// At most one record exists per token.  The record is removed when an
/// expired lock is hit by a retrieve, or when an admin clears it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockRecord {
    /// The token this lock applies to.
    pub token: String,

    /// Retrieval is denied until this instant.
    pub unlock_at: DateTime<Utc>,
}
