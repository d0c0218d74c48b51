//! Failed-attempt tracking and the timed lockout state machine.
//!
//! Per token, the states are Unlocked (no record) -> Locked (record
//! with an unlock instant) -> back to Unlocked on expiry or admin
//! clear.  The failed-attempt counter is **global to the session**
//! while locks are scoped per token: a run of failures against any mix
//! of tokens locks whichever token was attempted when the counter hit
//! the threshold.  That coupling reproduces the observed behavior of
//! the system this replaces; it is deliberate, not an oversight.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::entry::LockRecord;

/// Mutable per-session state.  Never persisted.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    /// Consecutive failed verifications this session, across all tokens.
    /// Reset to 0 on any successful decryption or admin reauthorization.
    pub failed_attempts: u32,
}

/// Lock state of one token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    /// No lock record exists.
    Unlocked,
    /// A lock record exists and has not yet expired.
    Locked { remaining_seconds: u64 },
    /// A lock record exists but its unlock instant has passed.
    Expired,
}

/// What a recorded failure did to the session.
#[derive(Debug, Clone, Copy)]
pub struct FailureOutcome {
    /// `max(0, threshold - failed_attempts)` after this failure.
    pub attempts_remaining: u32,
    /// Whether this failure put (or kept) the token under lockout.
    pub locked_now: bool,
}

/// Tracks lock records and the global failure counter.
pub struct LockoutTracker {
    locks: HashMap<String, LockRecord>,
    session: SessionState,
    max_attempts: u32,
    lockout: Duration,
}

impl LockoutTracker {
    /// Build a tracker over previously persisted lock records.
    pub fn new(locks: HashMap<String, LockRecord>, max_attempts: u32, lockout_seconds: u64) -> Self {
        Self {
            locks,
            session: SessionState::default(),
            max_attempts,
            lockout: Duration::seconds(lockout_seconds as i64),
        }
    }

    /// Lock state of `token` as of `now`.
    ///
    /// `now` must be the current time at the moment of the check —
    /// callers never cache it across operations.
    pub fn status(&self, token: &str, now: DateTime<Utc>) -> LockStatus {
        match self.locks.get(token) {
            None => LockStatus::Unlocked,
            Some(record) => {
                let remaining = record.unlock_at - now;
                if remaining > Duration::zero() {
                    LockStatus::Locked {
                        remaining_seconds: remaining.num_seconds().max(0) as u64,
                    }
                } else {
                    LockStatus::Expired
                }
            }
        }
    }

    /// Remove an expired lock record.  Returns `true` if one existed.
    pub fn clear_expired(&mut self, token: &str) -> bool {
        self.locks.remove(token).is_some()
    }

    /// Record a failed verification against `token`.
    ///
    /// Increments the global counter; once it reaches the threshold,
    /// a lock record is created (or refreshed) for this token with
    /// `unlock_at = now + lockout`.
    pub fn record_failure(&mut self, token: &str, now: DateTime<Utc>) -> FailureOutcome {
        self.session.failed_attempts += 1;

        let locked_now = self.session.failed_attempts >= self.max_attempts;
        if locked_now {
            self.locks.insert(
                token.to_string(),
                LockRecord {
                    token: token.to_string(),
                    unlock_at: now + self.lockout,
                },
            );
        }

        FailureOutcome {
            attempts_remaining: self.max_attempts.saturating_sub(self.session.failed_attempts),
            locked_now,
        }
    }

    /// Record a successful verification: the global counter resets.
    /// Other tokens' lock records are untouched.
    pub fn record_success(&mut self) {
        self.session.failed_attempts = 0;
    }

    /// Admin reauthorization: reset the counter and, if a token is
    /// given, clear its lock unconditionally (expired or not).
    /// Returns `true` if a lock record was removed.
    pub fn admin_clear(&mut self, token: Option<&str>) -> bool {
        self.session.failed_attempts = 0;
        match token {
            Some(t) => self.locks.remove(t).is_some(),
            None => false,
        }
    }

    /// Current value of the global failure counter.
    pub fn failed_attempts(&self) -> u32 {
        self.session.failed_attempts
    }

    /// All lock records, for persistence.
    pub fn locks(&self) -> &HashMap<String, LockRecord> {
        &self.locks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> LockoutTracker {
        LockoutTracker::new(HashMap::new(), 3, 300)
    }

    #[test]
    fn unlocked_until_threshold() {
        let mut t = tracker();
        let now = Utc::now();

        let first = t.record_failure("tok", now);
        assert_eq!(first.attempts_remaining, 2);
        assert!(!first.locked_now);
        assert_eq!(t.status("tok", now), LockStatus::Unlocked);

        let second = t.record_failure("tok", now);
        assert_eq!(second.attempts_remaining, 1);
        assert!(!second.locked_now);
    }

    #[test]
    fn third_failure_locks_the_token() {
        let mut t = tracker();
        let now = Utc::now();

        t.record_failure("tok", now);
        t.record_failure("tok", now);
        let third = t.record_failure("tok", now);

        assert_eq!(third.attempts_remaining, 0);
        assert!(third.locked_now);
        match t.status("tok", now) {
            LockStatus::Locked { remaining_seconds } => {
                assert!(remaining_seconds <= 300);
                assert!(remaining_seconds >= 299);
            }
            other => panic!("expected Locked, got {other:?}"),
        }
    }

    #[test]
    fn global_counter_locks_last_attempted_token() {
        // Two failures on one token plus one on another locks the
        // second token only.
        let mut t = tracker();
        let now = Utc::now();

        t.record_failure("first", now);
        t.record_failure("first", now);
        let third = t.record_failure("second", now);

        assert!(third.locked_now);
        assert_eq!(t.status("first", now), LockStatus::Unlocked);
        assert!(matches!(
            t.status("second", now),
            LockStatus::Locked { .. }
        ));
    }

    #[test]
    fn lock_expires_after_duration() {
        let mut t = tracker();
        let now = Utc::now();

        for _ in 0..3 {
            t.record_failure("tok", now);
        }

        let later = now + Duration::seconds(301);
        assert_eq!(t.status("tok", later), LockStatus::Expired);
        assert!(t.clear_expired("tok"));
        assert_eq!(t.status("tok", later), LockStatus::Unlocked);
    }

    #[test]
    fn success_resets_counter_but_keeps_other_locks() {
        let mut t = tracker();
        let now = Utc::now();

        for _ in 0..3 {
            t.record_failure("locked-tok", now);
        }
        t.record_success();

        assert_eq!(t.failed_attempts(), 0);
        assert!(matches!(
            t.status("locked-tok", now),
            LockStatus::Locked { .. }
        ));
    }

    #[test]
    fn admin_clear_removes_unexpired_lock() {
        let mut t = tracker();
        let now = Utc::now();

        for _ in 0..3 {
            t.record_failure("tok", now);
        }

        assert!(t.admin_clear(Some("tok")));
        assert_eq!(t.failed_attempts(), 0);
        assert_eq!(t.status("tok", now), LockStatus::Unlocked);
    }

    #[test]
    fn admin_clear_without_token_only_resets_counter() {
        let mut t = tracker();
        let now = Utc::now();

        for _ in 0..3 {
            t.record_failure("tok", now);
        }

        assert!(!t.admin_clear(None));
        assert_eq!(t.failed_attempts(), 0);
        assert!(matches!(t.status("tok", now), LockStatus::Locked { .. }));
    }

    #[test]
    fn counter_persists_across_expiry() {
        // Expiry clears the record but not the counter, so the next
        // failure re-locks immediately.
        let mut t = tracker();
        let now = Utc::now();

        for _ in 0..3 {
            t.record_failure("tok", now);
        }
        let later = now + Duration::seconds(400);
        t.clear_expired("tok");

        let next = t.record_failure("tok", later);
        assert!(next.locked_now);
        assert_eq!(next.attempts_remaining, 0);
    }
}
