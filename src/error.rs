//! Error types for mygymbro
//!
//! Domain errors the CLI needs to tell apart (validation vs storage vs
//! upstream API). Everything else bubbles up through anyhow at the
//! binary edge.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === Validation ===
    /// Signup attempted with an email that already has a record.
    #[error("email already exists")]
    DuplicateEmail,

    /// Email failed the format check.
    #[error("invalid email format")]
    InvalidEmail,

    /// Password failed the strength policy.
    #[error("{0}")]
    WeakPassword(&'static str),

    /// Login with wrong email or password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Profile operation for an email with no record.
    #[error("no account for {email}")]
    UnknownUser { email: String },

    // === Storage ===
    /// User store file exists but could not be read or parsed.
    #[error("failed to read user store at {path}: {message}")]
    StoreRead { path: PathBuf, message: String },

    /// User store could not be written back.
    #[error("failed to write user store at {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// User store could not be serialized.
    #[error("failed to serialize user store: {0}")]
    StoreSerialize(#[from] serde_json::Error),

    // === Upstream API ===
    /// Chat completions call failed (network, auth, or bad payload).
    /// The CLI converts this into a localized canned message.
    #[error("chat completions request failed: {message}")]
    ChatApi { message: String },

    /// OPENAI_API_KEY missing from the environment.
    #[error("no API key configured")]
    MissingApiKey,
}
