//! Response shapes for the Twilio Verify v2 API.
//!
//! Only the fields the application reads are modeled; Twilio sends many more.

use serde::{Deserialize, Serialize};

/// Response from POST /Services/{sid}/Verifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub sid: String,
    pub to: String,
    pub channel: String,
    /// "pending" until the code is checked.
    pub status: String,
}

/// Response from POST /Services/{sid}/VerificationCheck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCheckResponse {
    pub to: String,
    /// "approved" when the code matched, "pending" otherwise.
    pub status: String,
}
