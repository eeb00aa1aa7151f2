//! Auth service functions - the sign-in flow
//!
//! State machine per attempt: awaiting phone number -> awaiting code (after
//! `send_code`) -> authenticated (after `verify_code`). Restarting the flow
//! is the only way back; re-requesting a code is just calling `send_code`
//! again.

use tracing::{error, info};

use crate::domains::auth::models::{
    hash_phone_number, is_test_identifier, Identifier, TEST_VERIFICATION_CODE,
};
use crate::domains::auth::types::{PendingVerification, SignedIn};
use crate::domains::auth::{AuthError, Session};
use crate::domains::member::models::Member;
use crate::kernel::ServerDeps;

/// Request an OTP for the given phone number.
///
/// Returns a `PendingVerification` handle to redeem with `verify_code`.
/// Fails with `AuthError::Initiation` when the number is malformed or the
/// provider is unreachable - the caller must surface this.
pub async fn send_code(
    phone_number: &str,
    deps: &ServerDeps,
) -> Result<PendingVerification, AuthError> {
    if !looks_like_e164(phone_number) {
        return Err(AuthError::Initiation {
            reason: format!("not an E.164 phone number: {phone_number}"),
        });
    }

    let is_test = deps.test_identifier_enabled && is_test_identifier(phone_number);
    if is_test {
        info!(phone_number, "Test identifier: skipping OTP dispatch");
        return Ok(PendingVerification::new(phone_number));
    }

    if let Err(e) = deps.otp.send_otp(phone_number).await {
        error!(phone_number, error = %e, "Failed to send verification code");
        return Err(AuthError::Initiation {
            reason: e.to_string(),
        });
    }

    info!(phone_number, "Verification code sent");
    Ok(PendingVerification::new(phone_number))
}

/// Redeem a pending verification with the code the user received.
///
/// On success, finds or creates the member behind the (hashed) phone number
/// and opens a session. Fails with `AuthError::InvalidCode` on mismatch or
/// expiry.
pub async fn verify_code(
    pending: &PendingVerification,
    code: &str,
    deps: &ServerDeps,
) -> Result<SignedIn, AuthError> {
    let phone_number = pending.phone_number.as_str();
    let is_test = deps.test_identifier_enabled && is_test_identifier(phone_number);

    if is_test {
        if code != TEST_VERIFICATION_CODE {
            return Err(AuthError::InvalidCode {
                reason: "test identifier code mismatch".to_string(),
            });
        }
        info!(phone_number, "Test identifier: skipping OTP verification");
    } else if let Err(e) = deps.otp.verify_otp(phone_number, code).await {
        error!(phone_number, error = %e, "OTP verification failed");
        return Err(AuthError::InvalidCode {
            reason: e.to_string(),
        });
    }

    // Find or create member
    let phone_hash = hash_phone_number(phone_number);
    let member = match Identifier::find_by_phone_hash(&phone_hash, &deps.db_pool).await? {
        Some(identifier) => Member::find_by_id(identifier.member_id, &deps.db_pool)
            .await?
            .ok_or_else(|| {
                AuthError::Internal(anyhow::anyhow!(
                    "identifier {} points at a missing member",
                    identifier.id
                ))
            })?,
        None => {
            let member = Member::create(phone_number, &deps.db_pool).await?;
            Identifier::create(member.id, phone_hash, &deps.db_pool).await?;
            info!(member_id = %member.id, "Created new member on first sign-in");
            member
        }
    };

    let token = deps
        .sessions
        .create_session(Session {
            member_id: member.id,
            phone_number: phone_number.to_string(),
            created_at: chrono::Utc::now(),
        })
        .await;

    info!(member_id = %member.id, "OTP verified, session opened");
    Ok(SignedIn { token, member })
}

/// Read the session behind a token. In-memory only - never touches the
/// network or the database.
pub async fn current_session(token: &str, deps: &ServerDeps) -> Option<Session> {
    deps.sessions.get_session(token).await
}

/// Terminate a session.
///
/// Reports `AuthError::SessionNotFound` for unknown tokens instead of
/// silently succeeding, so callers can tell the user when sign-out failed.
pub async fn sign_out(token: &str, deps: &ServerDeps) -> Result<(), AuthError> {
    match deps.sessions.delete_session(token).await {
        Some(session) => {
            info!(member_id = %session.member_id, "Signed out");
            Ok(())
        }
        None => Err(AuthError::SessionNotFound),
    }
}

/// Loose E.164 shape check: leading '+', then 8 to 15 digits.
fn looks_like_e164(phone_number: &str) -> bool {
    let Some(digits) = phone_number.strip_prefix('+') else {
        return false;
    };
    (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
