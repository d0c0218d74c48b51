//! Vault module — the credential-gated encryption core.
//!
//! This module provides:
//! - `VaultEntry` and `LockRecord` types (`entry`)
//! - Insertion-ordered entry storage (`store`)
//! - Failed-attempt tracking and timed lockout (`lockout`)
//! - JSON persistence with degrade-to-empty loads (`persistence`)
//! - The `VaultService` orchestrator (`service`)
//! - A wall-clock seam for testing lock expiry (`clock`)

pub mod clock;
pub mod entry;
pub mod lockout;
pub mod persistence;
pub mod service;
pub mod store;

// Re-export the most commonly used items.
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{LockRecord, VaultEntry};
pub use lockout::{LockStatus, LockoutTracker, SessionState};
pub use service::{RetrieveOutcome, UnlockOutcome, VaultService};
pub use store::VaultStore;
