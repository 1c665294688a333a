//! Storage-backed lockout policy.
//!
//! Wraps the pure [`LockState`] machine with the persisted per-username
//! table under `loginLockout`. Lockout records are independent of the user
//! registry: the gate runs before credentials are even looked up, so a
//! record can exist for a username that was never registered.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::config::LockoutConfig;
use crate::models::{FailureOutcome, Gate, LockState, LockoutRecord};
use crate::storage::{Storage, StorageError, StorageExt, keys};

/// Per-username failed-attempt tracking and timed locking.
pub struct LockoutPolicy<'a, S: Storage> {
    storage: &'a S,
    config: LockoutConfig,
}

impl<'a, S: Storage> LockoutPolicy<'a, S> {
    /// Create a policy over `storage` with the given rules.
    #[must_use]
    pub const fn new(storage: &'a S, config: LockoutConfig) -> Self {
        Self { storage, config }
    }

    /// The current state for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be read.
    pub fn state(&self, username: &str) -> Result<LockState, StorageError> {
        let table = self.table()?;
        Ok(LockState::from_record(table.get(username)))
    }

    /// Gate a login attempt for `username` at `now`.
    ///
    /// A live lock denies the attempt without counting it. An expired lock
    /// is deleted here, and the attempt proceeds as if the state were
    /// clear.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the table cannot be read or written.
    pub fn gate(&self, username: &str, now: DateTime<Utc>) -> Result<Gate, StorageError> {
        let state = self.state(username)?;
        let (next, gate) = state.gate(now, self.config.lock_duration);
        if next != state {
            tracing::info!(username, "lock window elapsed, clearing record");
            self.store_state(username, next)?;
        }
        Ok(gate)
    }

    /// Count a failed credential check for `username` at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the table cannot be read or written.
    pub fn record_failure(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<FailureOutcome, StorageError> {
        let state = self.state(username)?;
        let (next, outcome) = state.on_failure(now, self.config.max_attempts);
        if matches!(outcome, FailureOutcome::LockedOut) {
            tracing::warn!(username, "account locked after repeated failures");
        }
        self.store_state(username, next)?;
        Ok(outcome)
    }

    /// Reset `username` after a successful login, deleting its record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the table cannot be read or written.
    pub fn record_success(&self, username: &str) -> Result<(), StorageError> {
        let state = self.state(username)?;
        self.store_state(username, state.on_success())
    }

    /// Full minutes in the configured lock window, rounded up.
    #[must_use]
    pub const fn lock_window_minutes(&self) -> i64 {
        self.config.lock_duration.num_minutes()
    }

    fn table(&self) -> Result<BTreeMap<String, LockoutRecord>, StorageError> {
        self.storage.get_or_default(keys::LOGIN_LOCKOUT)
    }

    fn store_state(&self, username: &str, state: LockState) -> Result<(), StorageError> {
        let mut table = self.table()?;
        match state.to_record(self.config.max_attempts) {
            Some(record) => {
                table.insert(username.to_owned(), record);
            }
            None => {
                table.remove(username);
            }
        }
        self.storage.set(keys::LOGIN_LOCKOUT, &table)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    use crate::storage::MemoryStorage;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn policy(storage: &MemoryStorage) -> LockoutPolicy<'_, MemoryStorage> {
        LockoutPolicy::new(storage, LockoutConfig::default())
    }

    #[test]
    fn test_fresh_username_is_clear_and_allowed() {
        let storage = MemoryStorage::new();
        let p = policy(&storage);
        assert_eq!(p.state("alice").unwrap(), LockState::Clear);
        assert_eq!(p.gate("alice", t0()).unwrap(), Gate::Allow);
    }

    #[test]
    fn test_three_failures_lock_and_persist() {
        let storage = MemoryStorage::new();
        let p = policy(&storage);

        assert_eq!(
            p.record_failure("alice", t0()).unwrap(),
            FailureOutcome::AttemptsRemaining(2)
        );
        assert_eq!(
            p.record_failure("alice", t0()).unwrap(),
            FailureOutcome::AttemptsRemaining(1)
        );
        assert_eq!(
            p.record_failure("alice", t0()).unwrap(),
            FailureOutcome::LockedOut
        );

        // A second policy over the same storage sees the lock
        let p2 = policy(&storage);
        assert_eq!(p2.state("alice").unwrap(), LockState::Locked(t0()));
    }

    #[test]
    fn test_gate_denies_during_window_without_counting() {
        let storage = MemoryStorage::new();
        let p = policy(&storage);
        for _ in 0..3 {
            p.record_failure("alice", t0()).unwrap();
        }

        let gate = p.gate("alice", t0() + TimeDelta::minutes(5)).unwrap();
        assert_eq!(gate, Gate::Deny {
            remaining_minutes: 10
        });
        // State unchanged: still locked at t0
        assert_eq!(p.state("alice").unwrap(), LockState::Locked(t0()));
    }

    #[test]
    fn test_gate_deletes_expired_lock() {
        let storage = MemoryStorage::new();
        let p = policy(&storage);
        for _ in 0..3 {
            p.record_failure("alice", t0()).unwrap();
        }

        let after = t0() + TimeDelta::minutes(15) + TimeDelta::seconds(1);
        assert_eq!(p.gate("alice", after).unwrap(), Gate::Allow);
        assert_eq!(p.state("alice").unwrap(), LockState::Clear);
    }

    #[test]
    fn test_success_deletes_record() {
        let storage = MemoryStorage::new();
        let p = policy(&storage);
        p.record_failure("alice", t0()).unwrap();
        p.record_failure("alice", t0()).unwrap();

        p.record_success("alice").unwrap();
        assert_eq!(p.state("alice").unwrap(), LockState::Clear);
    }

    #[test]
    fn test_usernames_tracked_independently() {
        let storage = MemoryStorage::new();
        let p = policy(&storage);
        for _ in 0..3 {
            p.record_failure("alice", t0()).unwrap();
        }
        p.record_failure("bob", t0()).unwrap();

        assert_eq!(p.state("alice").unwrap(), LockState::Locked(t0()));
        assert_eq!(p.state("bob").unwrap(), LockState::Warning(1));
    }

    #[test]
    fn test_lockout_applies_to_unregistered_usernames() {
        // The gate runs before credential lookup, so a never-registered
        // name still accumulates a record.
        let storage = MemoryStorage::new();
        let p = policy(&storage);
        for _ in 0..3 {
            p.record_failure("nobody", t0()).unwrap();
        }
        assert!(matches!(
            p.gate("nobody", t0()).unwrap(),
            Gate::Deny { .. }
        ));
    }
}
