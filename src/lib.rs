//! mygymbro - AI-powered gym routine builder for students
//!
//! Profile-aware fitness calculators, a workout-text parser, and an
//! OpenAI-backed chat assistant grounded in the gym's equipment sheet.

pub mod auth;
pub mod calc;
pub mod chat;
pub mod equipment;
pub mod error;
pub mod i18n;
pub mod parser;
pub mod prompts;
pub mod session;
pub mod store;

pub use error::{Error, Result};
pub use store::UserStore;
