//! Registration, login, logout, and session commands.

use chrono::{Local, Utc};

use paperback_store::StoreError;
use paperback_store::config::LockoutConfig;
use paperback_store::services::{AuthSession, RegistrationForm, UserRegistry};
use paperback_store::storage::Storage;

/// Register a new account.
#[allow(clippy::print_stdout, clippy::too_many_arguments)]
pub fn register<S: Storage>(
    storage: &S,
    first_name: String,
    last_name: String,
    dob: String,
    email: String,
    trn: String,
    password: String,
    confirm_password: Option<String>,
) -> Result<(), StoreError> {
    let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
    let form = RegistrationForm {
        first_name,
        last_name,
        dob,
        email,
        trn,
        password,
        confirm_password,
    };

    let user = UserRegistry::new(storage).register(&form, Local::now().date_naive())?;
    println!(
        "Welcome, {}! Your username is {}.",
        user.full_name, user.username
    );
    Ok(())
}

/// Log in and set the session.
#[allow(clippy::print_stdout)]
pub fn login<S: Storage>(
    storage: &S,
    lockout: LockoutConfig,
    username: &str,
    password: &str,
) -> Result<(), StoreError> {
    let user = AuthSession::new(storage, lockout).login(username, password, Utc::now())?;
    println!("Welcome back, {}.", user.full_name);
    Ok(())
}

/// Clear the session.
#[allow(clippy::print_stdout)]
pub fn logout<S: Storage>(storage: &S, lockout: LockoutConfig) -> Result<(), StoreError> {
    AuthSession::new(storage, lockout).logout()?;
    println!("Logged out.");
    Ok(())
}

/// Print the logged-in user, if any.
#[allow(clippy::print_stdout)]
pub fn whoami<S: Storage>(storage: &S, lockout: LockoutConfig) -> Result<(), StoreError> {
    match AuthSession::new(storage, lockout).current_user()? {
        Some(user) => println!("Logged in as {} ({}).", user.full_name, user.username),
        None => println!("Not logged in."),
    }
    Ok(())
}
