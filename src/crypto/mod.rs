//! Cryptographic primitives for DataVault.
//!
//! This module provides:
//! - AES-256-GCM encryption behind a process-lifetime key (`cipher`)
//! - SHA-256 passkey digests with constant-time comparison (`digest`)

pub mod cipher;
pub mod digest;

// Re-export the most commonly used items.
pub use cipher::CipherProvider;
pub use digest::{digest_passkey, PasskeyDigest};
