//! Login lockout state machine.
//!
//! The lockout logic is a small state machine per username:
//!
//! ```text
//! Clear --failure--> Warning(1) --failure--> Warning(2) --failure--> Locked(now)
//!   ^                    |                       |                      |
//!   +------success-------+-----------success----+     window elapsed---+
//! ```
//!
//! [`LockState`] models it explicitly, and every transition is a pure
//! function of `(state, now)` so the machine is testable without storage,
//! a clock, or a UI. The persisted shape is [`LockoutRecord`]; conversions
//! between the two live here as well.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Per-username lockout record as persisted under `loginLockout`.
///
/// Created on the first failed attempt, deleted on a successful login or
/// once an expired lock is hit by a new attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockoutRecord {
    /// Consecutive failed attempts so far.
    pub attempts: u32,
    /// Whether the account is currently locked.
    pub locked: bool,
    /// When the lock was applied. Present only while `locked`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_time: Option<DateTime<Utc>>,
}

/// Tagged lockout state for one username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// No failed attempts on record.
    Clear,
    /// `n` consecutive failures, below the lock threshold.
    Warning(u32),
    /// Locked since the given instant.
    Locked(DateTime<Utc>),
}

/// Result of gating a login attempt against the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// The attempt may proceed to the credential check.
    Allow,
    /// The account is locked; the attempt is rejected without being counted.
    Deny {
        /// Whole minutes until the lock expires, rounded up. Always >= 1.
        remaining_minutes: i64,
    },
}

/// Result of recording a failed credential check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Still below the threshold; this many attempts remain.
    AttemptsRemaining(u32),
    /// This failure hit the threshold and locked the account.
    LockedOut,
}

impl LockState {
    /// Gate a login attempt at `now`.
    ///
    /// A live lock denies the attempt with the remaining time; an expired
    /// lock clears and the attempt is re-evaluated against [`Self::Clear`].
    /// Any other state allows the attempt.
    #[must_use]
    pub fn gate(self, now: DateTime<Utc>, lock_duration: TimeDelta) -> (Self, Gate) {
        match self {
            Self::Locked(lock_time) => {
                let elapsed = now - lock_time;
                if elapsed < lock_duration {
                    let remaining = lock_duration - elapsed;
                    (
                        self,
                        Gate::Deny {
                            remaining_minutes: minutes_ceil(remaining),
                        },
                    )
                } else {
                    (Self::Clear, Gate::Allow)
                }
            }
            Self::Clear | Self::Warning(_) => (self, Gate::Allow),
        }
    }

    /// Record a failed credential check at `now`.
    ///
    /// Increments the attempt count; reaching `max_attempts` locks the
    /// account as of `now`.
    #[must_use]
    pub fn on_failure(self, now: DateTime<Utc>, max_attempts: u32) -> (Self, FailureOutcome) {
        let attempts = match self {
            Self::Clear => 1,
            Self::Warning(n) => n + 1,
            // A live lock is handled by `gate` before credentials are ever
            // checked; treat a failure here as a fresh first attempt.
            Self::Locked(_) => 1,
        };

        if attempts >= max_attempts {
            (Self::Locked(now), FailureOutcome::LockedOut)
        } else {
            (
                Self::Warning(attempts),
                FailureOutcome::AttemptsRemaining(max_attempts - attempts),
            )
        }
    }

    /// Record a successful login. Always resets to [`Self::Clear`].
    #[must_use]
    pub const fn on_success(self) -> Self {
        Self::Clear
    }

    /// Build the state from a persisted record (absent record means clear).
    #[must_use]
    pub fn from_record(record: Option<&LockoutRecord>) -> Self {
        match record {
            Some(&LockoutRecord {
                locked: true,
                lock_time: Some(lock_time),
                ..
            }) => Self::Locked(lock_time),
            Some(&LockoutRecord { attempts, .. }) if attempts > 0 => Self::Warning(attempts),
            _ => Self::Clear,
        }
    }

    /// Convert back to the persisted shape. `Clear` maps to no record at
    /// all; `max_attempts` fills in the attempt count for a locked state.
    #[must_use]
    pub const fn to_record(self, max_attempts: u32) -> Option<LockoutRecord> {
        match self {
            Self::Clear => None,
            Self::Warning(attempts) => Some(LockoutRecord {
                attempts,
                locked: false,
                lock_time: None,
            }),
            Self::Locked(lock_time) => Some(LockoutRecord {
                attempts: max_attempts,
                locked: true,
                lock_time: Some(lock_time),
            }),
        }
    }
}

/// Whole minutes in `delta`, rounded up.
fn minutes_ceil(delta: TimeDelta) -> i64 {
    let ms = delta.num_milliseconds().max(0);
    (ms + 59_999) / 60_000
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const MAX_ATTEMPTS: u32 = 3;

    fn lock_duration() -> TimeDelta {
        TimeDelta::minutes(15)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_three_failures_lock() {
        let now = t0();
        let (state, outcome) = LockState::Clear.on_failure(now, MAX_ATTEMPTS);
        assert_eq!(outcome, FailureOutcome::AttemptsRemaining(2));

        let (state, outcome) = state.on_failure(now, MAX_ATTEMPTS);
        assert_eq!(outcome, FailureOutcome::AttemptsRemaining(1));
        assert_eq!(state, LockState::Warning(2));

        let (state, outcome) = state.on_failure(now, MAX_ATTEMPTS);
        assert_eq!(outcome, FailureOutcome::LockedOut);
        assert_eq!(state, LockState::Locked(now));
    }

    #[test]
    fn test_gate_denies_inside_window() {
        let locked = LockState::Locked(t0());
        let just_before = t0() + TimeDelta::minutes(14) + TimeDelta::seconds(59);

        let (state, gate) = locked.gate(just_before, lock_duration());
        assert_eq!(state, locked);
        assert_eq!(gate, Gate::Deny {
            remaining_minutes: 1
        });
    }

    #[test]
    fn test_gate_clears_after_window() {
        let locked = LockState::Locked(t0());
        let just_after = t0() + TimeDelta::minutes(15) + TimeDelta::seconds(1);

        let (state, gate) = locked.gate(just_after, lock_duration());
        assert_eq!(state, LockState::Clear);
        assert_eq!(gate, Gate::Allow);
    }

    #[test]
    fn test_gate_remaining_minutes_rounds_up() {
        let locked = LockState::Locked(t0());
        let shortly_after_lock = t0() + TimeDelta::seconds(30);

        let (_, gate) = locked.gate(shortly_after_lock, lock_duration());
        assert_eq!(gate, Gate::Deny {
            remaining_minutes: 15
        });
    }

    #[test]
    fn test_gate_allows_clear_and_warning() {
        let now = t0();
        assert_eq!(LockState::Clear.gate(now, lock_duration()).1, Gate::Allow);
        assert_eq!(
            LockState::Warning(2).gate(now, lock_duration()).1,
            Gate::Allow
        );
    }

    #[test]
    fn test_success_resets_any_state() {
        assert_eq!(LockState::Warning(2).on_success(), LockState::Clear);
        assert_eq!(LockState::Locked(t0()).on_success(), LockState::Clear);
        assert_eq!(LockState::Clear.on_success(), LockState::Clear);
    }

    #[test]
    fn test_record_roundtrip() {
        let warning = LockState::Warning(2);
        let record = warning.to_record(MAX_ATTEMPTS).unwrap();
        assert_eq!(record.attempts, 2);
        assert!(!record.locked);
        assert_eq!(LockState::from_record(Some(&record)), warning);

        let locked = LockState::Locked(t0());
        let record = locked.to_record(MAX_ATTEMPTS).unwrap();
        assert!(record.locked);
        assert_eq!(record.attempts, MAX_ATTEMPTS);
        assert_eq!(LockState::from_record(Some(&record)), locked);

        assert!(LockState::Clear.to_record(MAX_ATTEMPTS).is_none());
        assert_eq!(LockState::from_record(None), LockState::Clear);
    }

    #[test]
    fn test_record_serde_shape() {
        let record = LockState::Locked(t0()).to_record(MAX_ATTEMPTS).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["attempts"], 3);
        assert_eq!(json["locked"], true);
        assert!(json.get("lockTime").is_some());
    }
}
