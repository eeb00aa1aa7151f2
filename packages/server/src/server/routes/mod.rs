// HTTP routes
pub mod auth;
pub mod health;
pub mod parties;

pub use auth::*;
pub use health::*;
pub use parties::*;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::domains::auth::AuthError;
use crate::domains::parties::PartyError;

/// JSON error body returned by all failing handlers.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) fn error_body(message: impl Into<String>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error: message.into(),
    })
}

pub(crate) fn auth_error_response(err: AuthError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        AuthError::Initiation { .. } => StatusCode::BAD_GATEWAY,
        AuthError::InvalidCode { .. } => StatusCode::UNAUTHORIZED,
        AuthError::SessionNotFound => StatusCode::UNAUTHORIZED,
        AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error_body(err.to_string()))
}

pub(crate) fn party_error_response(err: PartyError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        PartyError::Persistence(_) => StatusCode::BAD_GATEWAY,
        PartyError::NotFound(_) => StatusCode::NOT_FOUND,
        PartyError::Upload { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, error_body(err.to_string()))
}

pub(crate) fn unauthorized() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::UNAUTHORIZED, error_body("sign in required"))
}
