//! Account registration.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use paperback_core::Trn;

use crate::models::User;
use crate::storage::{Storage, StorageError, StorageExt, keys};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum age, in calendar years, to register.
const MIN_AGE_YEARS: i32 = 18;

/// Errors that can occur during registration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// A required form field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The date of birth does not parse as `YYYY-MM-DD`.
    #[error("date of birth is not a valid date")]
    InvalidDateOfBirth,

    /// The applicant is under the minimum age.
    #[error("you must be at least {MIN_AGE_YEARS} years old to register")]
    UnderageApplicant,

    /// The TRN is not exactly nine digits.
    #[error("TRN must be exactly 9 digits")]
    InvalidTrnFormat,

    /// The TRN is already registered.
    #[error("this TRN is already registered")]
    DuplicateTrn,

    /// The password is shorter than the minimum.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    WeakPassword,

    /// The password and its confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The derived username is already taken.
    #[error("that username is already taken")]
    DuplicateUsername,

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Raw registration form input.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
    pub email: String,
    pub trn: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validates and stores new accounts.
pub struct UserRegistry<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> UserRegistry<'a, S> {
    /// Create a registry over `storage`.
    #[must_use]
    pub const fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    /// All registered users. Absent or malformed storage reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backing store cannot be read.
    pub fn users(&self) -> Result<Vec<User>, StorageError> {
        self.storage.get_or_default(keys::USERS)
    }

    /// Validate `form` and store the new account.
    ///
    /// Rules run in order, first failure wins:
    ///
    /// 1. All fields present (names, dob, email, TRN, both passwords)
    /// 2. Age at least 18, by calendar-year difference against `today` -
    ///    month and day are ignored
    /// 3. TRN is exactly nine digits
    /// 4. TRN not already registered
    /// 5. Password at least eight characters
    /// 6. Password and confirmation match
    /// 7. Derived username (the TRN) not already taken - checked on its own
    ///    even though rule 4 already implies it
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistrationError`] a rule produces, or
    /// `Storage` if persistence fails.
    pub fn register(
        &self,
        form: &RegistrationForm,
        today: NaiveDate,
    ) -> Result<User, RegistrationError> {
        let first_name = require(&form.first_name, "first name")?;
        let last_name = require(&form.last_name, "last name")?;
        let dob = require(&form.dob, "date of birth")?;
        let email = require(&form.email, "email")?;
        let trn_raw = require(&form.trn, "TRN")?;
        if form.password.is_empty() {
            return Err(RegistrationError::MissingField("password"));
        }
        if form.confirm_password.is_empty() {
            return Err(RegistrationError::MissingField("confirm password"));
        }

        let birth_date = NaiveDate::parse_from_str(&dob, "%Y-%m-%d")
            .map_err(|_| RegistrationError::InvalidDateOfBirth)?;
        // Year difference only; an applicant turning 18 in December passes
        // from January 1 of that year.
        if today.year() - birth_date.year() < MIN_AGE_YEARS {
            return Err(RegistrationError::UnderageApplicant);
        }

        let trn = Trn::parse(&trn_raw).map_err(|_| RegistrationError::InvalidTrnFormat)?;

        let mut users = self.users()?;
        if users.iter().any(|u| u.trn == trn) {
            return Err(RegistrationError::DuplicateTrn);
        }

        if form.password.len() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::WeakPassword);
        }
        if form.password != form.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        // The username is the TRN, so rule 4 already covers this; it is
        // still checked independently.
        if users.iter().any(|u| u.username == trn) {
            return Err(RegistrationError::DuplicateUsername);
        }

        let user = User {
            full_name: format!("{first_name} {last_name}"),
            dob,
            email,
            username: trn.clone(),
            trn,
            password: form.password.clone(),
        };

        users.push(user.clone());
        self.storage.set(keys::USERS, &users)?;

        tracing::info!(trn = %user.trn, "registered new account");
        Ok(user)
    }
}

/// Trim a field and reject it when empty.
fn require(value: &str, field: &'static str) -> Result<String, RegistrationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}
