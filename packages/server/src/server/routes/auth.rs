//! Sign-in flow endpoints.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;

use crate::domains::auth::types::{PendingVerification, SignedIn};
use crate::domains::auth::service as auth;
use crate::domains::member::models::Member;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::{auth_error_response, error_body, unauthorized, ErrorBody};

#[derive(Debug, Deserialize)]
pub struct SendCodeRequest {
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    pub phone_number: String,
    pub code: String,
}

/// POST /auth/send-code
pub async fn send_code_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<SendCodeRequest>,
) -> Result<Json<PendingVerification>, (StatusCode, Json<ErrorBody>)> {
    auth::send_code(&body.phone_number, &state.deps)
        .await
        .map(Json)
        .map_err(auth_error_response)
}

/// POST /auth/verify-code
pub async fn verify_code_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<VerifyCodeRequest>,
) -> Result<Json<SignedIn>, (StatusCode, Json<ErrorBody>)> {
    let pending = PendingVerification::new(&body.phone_number);
    auth::verify_code(&pending, &body.code, &state.deps)
        .await
        .map(Json)
        .map_err(auth_error_response)
}

/// POST /auth/sign-out
pub async fn sign_out_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
) -> Result<StatusCode, (StatusCode, Json<ErrorBody>)> {
    let Some(Extension(user)) = auth_user else {
        return Err(unauthorized());
    };
    auth::sign_out(&user.token, &state.deps)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(auth_error_response)
}

/// GET /me
pub async fn me_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
) -> Result<Json<Member>, (StatusCode, Json<ErrorBody>)> {
    let Some(Extension(user)) = auth_user else {
        return Err(unauthorized());
    };
    match Member::find_by_id(user.member_id, &state.deps.db_pool).await {
        Ok(Some(member)) => Ok(Json(member)),
        Ok(None) => Err((StatusCode::NOT_FOUND, error_body("member not found"))),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, error_body(e.to_string()))),
    }
}
