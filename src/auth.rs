//! Authentication - signup, login, validation
//!
//! Passwords are stored as unsalted SHA-256 hex. Good enough for a
//! class project, not for anything holding real accounts.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::error::{Error, Result};
use crate::store::{UserProfile, UserStore};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});

/// SHA-256 hex digest of a password.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

pub fn verify_password(password: &str, hashed: &str) -> bool {
    hash_password(password) == hashed
}

pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Password policy: at least 8 chars, one uppercase, one lowercase,
/// one digit. Returns the first failing rule's message.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < 8 {
        return Err(Error::WeakPassword("Password must be at least 8 characters long"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(Error::WeakPassword("Password must contain at least one uppercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(Error::WeakPassword("Password must contain at least one lowercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::WeakPassword("Password must contain at least one number"));
    }
    Ok(())
}

/// Create the minimal account record. Profile completion fills in the
/// rest through `UserStore::update_user`.
pub fn signup(
    store: &UserStore,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<UserProfile> {
    if !validate_email(email) {
        return Err(Error::InvalidEmail);
    }
    validate_password(password)?;

    let profile = UserProfile {
        email: email.to_string(),
        password: hash_password(password),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        created_at: Some(Utc::now().to_rfc3339()),
        ..UserProfile::default()
    };
    store.create_user(profile.clone())?;
    info!(email, "account created");
    Ok(profile)
}

/// Verify credentials, stamp last_login, and return the fresh profile.
pub fn login(store: &UserStore, email: &str, password: &str) -> Result<UserProfile> {
    let Some(profile) = store.get_user(email)? else {
        return Err(Error::InvalidCredentials);
    };
    if !verify_password(password, &profile.password) {
        return Err(Error::InvalidCredentials);
    }
    let profile = store.update_user(email, |p| {
        p.last_login = Some(Utc::now().to_rfc3339());
    })?;
    info!(email, "login ok");
    Ok(profile)
}
