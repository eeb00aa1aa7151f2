use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::common::MemberId;
use crate::domains::auth::SessionStore;

/// Authenticated user information from session
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub member_id: MemberId,
    pub phone_number: String,
    /// The bearer token the session was resolved from (needed for sign-out).
    pub token: String,
}

/// Middleware to extract session and populate auth user
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Looks up the session in SessionStore
/// 3. Stores AuthUser in request extensions
///
/// Note: it does NOT block requests - handlers that require auth reject
/// requests where the extension is absent.
pub async fn session_auth_middleware(
    State(session_store): State<Arc<SessionStore>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(request.headers(), session_store.as_ref()).await;

    if let Some(user) = auth_user {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

/// Extract and verify auth user from request
async fn extract_auth_user(headers: &HeaderMap, session_store: &SessionStore) -> Option<AuthUser> {
    let auth_header = headers.get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let session = session_store.get_session(token).await?;

    Some(AuthUser {
        member_id: session.member_id,
        phone_number: session.phone_number,
        token: token.to_string(),
    })
}
