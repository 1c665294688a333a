//! User account type.

use serde::{Deserialize, Serialize};

use paperback_core::Trn;

/// A registered account.
///
/// The TRN is the uniqueness key and doubles as the username, so `username`
/// always equals `trn`. Both are kept because both have always been
/// persisted.
///
/// The password is stored exactly as entered - plaintext, no hashing. That
/// reproduces the historical data shape; hardening it would break every
/// existing data file and is deliberately not done here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// First and last name, space-joined.
    pub full_name: String,
    /// Date of birth as entered (`YYYY-MM-DD`).
    pub dob: String,
    /// Contact email. Format is not validated by the core.
    pub email: String,
    /// Taxpayer Registration Number - the account's uniqueness key.
    pub trn: Trn,
    /// Login name. Always equal to `trn`.
    pub username: Trn,
    /// Plaintext password, stored as given.
    pub password: String,
}
