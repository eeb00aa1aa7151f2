//! Auth domain data types
//!
//! Simple, serializable types returned by auth operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::member::models::Member;

/// Handle returned by `send_code`: an OTP is on its way to this number.
///
/// Redeem it with `verify_code`. Requesting a new code for the same number
/// simply replaces the pending verification on the provider side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingVerification {
    pub phone_number: String,
    pub requested_at: DateTime<Utc>,
}

impl PendingVerification {
    pub fn new(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            requested_at: Utc::now(),
        }
    }
}

/// Result of a successful `verify_code`: a session token plus the member it
/// belongs to (created on first sign-in).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedIn {
    pub token: String,
    pub member: Member,
}
