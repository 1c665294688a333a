//! Taxpayer Registration Number (TRN) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Trn`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum TrnError {
    /// The input string is empty.
    #[error("TRN cannot be empty")]
    Empty,
    /// The input does not have exactly nine characters.
    #[error("TRN must be exactly {expected} digits")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
    },
    /// The input contains a character that is not a decimal digit.
    #[error("TRN must contain only digits")]
    NonDigit,
}

/// A Taxpayer Registration Number.
///
/// A TRN is a nine-digit numeric identifier. It serves as the uniqueness key
/// for registered accounts and doubles as the account's username.
///
/// ## Constraints
///
/// - Exactly 9 characters
/// - ASCII decimal digits only
///
/// ## Examples
///
/// ```
/// use paperback_core::Trn;
///
/// assert!(Trn::parse("123456789").is_ok());
///
/// assert!(Trn::parse("").is_err());          // empty
/// assert!(Trn::parse("12345678").is_err());  // too short
/// assert!(Trn::parse("12345678x").is_err()); // non-digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Trn(String);

impl Trn {
    /// Required number of digits in a TRN.
    pub const LENGTH: usize = 9;

    /// Parse a `Trn` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly 9 characters long
    /// - Contains a non-digit character
    pub fn parse(s: &str) -> Result<Self, TrnError> {
        if s.is_empty() {
            return Err(TrnError::Empty);
        }

        if s.len() != Self::LENGTH {
            return Err(TrnError::WrongLength {
                expected: Self::LENGTH,
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TrnError::NonDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the TRN as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Trn` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Trn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Trn {
    type Err = TrnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Trn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Trn {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
