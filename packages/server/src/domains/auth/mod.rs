//! Auth domain - phone-based OTP authentication
//!
//! Responsibilities:
//! - Sending and verifying one-time codes via Twilio
//! - Session token management (explicit store, no ambient current-user)
//! - Phone number hashing for privacy

pub mod errors;
pub mod models;
pub mod service;
pub mod session;
pub mod types;

pub use errors::AuthError;
pub use session::{Session, SessionStore};
pub use types::{PendingVerification, SignedIn};
