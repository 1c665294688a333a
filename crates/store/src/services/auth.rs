//! Login, logout, and the current-user session slot.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::LockoutConfig;
use crate::models::{FailureOutcome, Gate, User};
use crate::services::lockout::LockoutPolicy;
use crate::services::registry::UserRegistry;
use crate::storage::{Storage, StorageError, StorageExt, keys};

/// Errors that can occur during login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password was left empty. Checked before the lockout
    /// gate; no attempt is counted.
    #[error("please enter both username and password")]
    MissingCredentials,

    /// The credentials did not match any account.
    #[error("invalid username or password; {attempts_remaining} attempt(s) remaining")]
    InvalidCredentials {
        /// Failed attempts left before the account locks.
        attempts_remaining: u32,
    },

    /// The account is locked out.
    #[error("account locked; try again in {remaining_minutes} minute(s)")]
    AccountLocked {
        /// Whole minutes until the lock expires, rounded up.
        remaining_minutes: i64,
    },

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Resolves credentials and manages the single session slot.
///
/// Login runs the lockout gate before the credential check and reports the
/// outcome back to the policy afterward; logout touches only the session
/// slot.
pub struct AuthSession<'a, S: Storage> {
    storage: &'a S,
    lockout: LockoutPolicy<'a, S>,
}

impl<'a, S: Storage> AuthSession<'a, S> {
    /// Create an auth session over `storage` with the given lockout rules.
    #[must_use]
    pub const fn new(storage: &'a S, lockout: LockoutConfig) -> Self {
        Self {
            storage,
            lockout: LockoutPolicy::new(storage, lockout),
        }
    }

    /// Attempt to log in with `username` and `password` at `now`.
    ///
    /// On success the matched user becomes the current session (overwriting
    /// any previous one) and the username's lockout record is deleted. On
    /// failure the attempt is counted, which may lock the account.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredentials`] if either field is empty
    /// - [`AuthError::AccountLocked`] while the lock window is live, or at
    ///   the moment the third failure locks the account
    /// - [`AuthError::InvalidCredentials`] on a non-locking failure
    /// - [`AuthError::Storage`] if persistence fails
    pub fn login(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<User, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        if let Gate::Deny { remaining_minutes } = self.lockout.gate(username, now)? {
            return Err(AuthError::AccountLocked { remaining_minutes });
        }

        let users = UserRegistry::new(self.storage).users()?;
        let matched = users
            .into_iter()
            .find(|u| u.username == *username && u.password == password);

        let Some(user) = matched else {
            return Err(match self.lockout.record_failure(username, now)? {
                FailureOutcome::LockedOut => AuthError::AccountLocked {
                    remaining_minutes: self.lockout.lock_window_minutes(),
                },
                FailureOutcome::AttemptsRemaining(attempts_remaining) => {
                    AuthError::InvalidCredentials { attempts_remaining }
                }
            });
        };

        self.lockout.record_success(username)?;
        self.storage.set(keys::CURRENT_USER, &user)?;
        tracing::info!(username, "login succeeded");
        Ok(user)
    }

    /// Clear the session slot. Lockout records are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be written.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.storage.remove(keys::CURRENT_USER)
    }

    /// The currently authenticated user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be read.
    pub fn current_user(&self) -> Result<Option<User>, StorageError> {
        self.storage.get_or_default(keys::CURRENT_USER)
    }
}
