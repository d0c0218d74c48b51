//! SHA-256 passkey digests.
//!
//! A passkey is never stored; only its digest is.  The digest is
//! deterministic (no salt, no per-call randomness) because stored
//! digests must be compared against freshly computed ones on every
//! retrieve, within and across sessions.
//!
//! Comparison goes through `subtle::ConstantTimeEq` so a mismatch in
//! the first byte takes as long as a mismatch in the last.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Length of a digest in bytes (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// A fixed-length one-way digest of a passkey.
///
/// Serialized as a base64 string in JSON.
#[derive(Debug, Clone)]
pub struct PasskeyDigest([u8; DIGEST_LEN]);

/// Compute the digest of a passkey.
///
/// Empty strings are valid (if weak) passkeys and hash normally —
/// passkey strength policy is not this layer's concern.
pub fn digest_passkey(passkey: &str) -> PasskeyDigest {
    let mut hasher = Sha256::new();
    hasher.update(passkey.as_bytes());
    PasskeyDigest(hasher.finalize().into())
}

impl PasskeyDigest {
    /// Constant-time equality check against another digest.
    pub fn matches(&self, other: &PasskeyDigest) -> bool {
        self.0.ct_eq(&other.0).into()
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl Serialize for PasskeyDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(self.0))
    }
}

impl<'de> Deserialize<'de> for PasskeyDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = BASE64.decode(&s).map_err(serde::de::Error::custom)?;
        let array: [u8; DIGEST_LEN] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("digest must be exactly 32 bytes"))?;
        Ok(PasskeyDigest(array))
    }
}
