use thiserror::Error;

/// Errors surfaced by auth operations.
///
/// Every auth operation returns one of these explicitly - callers decide
/// what the user sees. Nothing in this domain logs-and-swallows.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The OTP could not be dispatched (malformed number or provider down).
    #[error("failed to send verification code: {reason}")]
    Initiation { reason: String },

    /// The code did not match or the verification expired.
    #[error("invalid verification code: {reason}")]
    InvalidCode { reason: String },

    /// The session token does not resolve to an active session.
    #[error("no active session for the given token")]
    SessionNotFound,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
