//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::session_auth_middleware;
use crate::server::routes::{
    attach_images_handler, create_party_handler, health_handler, hosted_parties_handler,
    invite_guests_handler, invited_parties_handler, me_handler, send_code_handler,
    sign_out_handler, verify_code_handler,
};

/// Uploads are capped at 25 MB per request.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    let state = AppState { deps: deps.clone() };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route("/auth/send-code", post(send_code_handler))
        .route("/auth/verify-code", post(verify_code_handler))
        .route("/auth/sign-out", post(sign_out_handler))
        .route("/me", get(me_handler))
        .route("/parties", post(create_party_handler))
        .route("/parties/hosted", get(hosted_parties_handler))
        .route("/parties/invited", get(invited_parties_handler))
        .route("/parties/:party_id/images", post(attach_images_handler))
        .route("/parties/:party_id/invite", post(invite_guests_handler))
        .layer(middleware::from_fn_with_state(
            deps.sessions.clone(),
            session_auth_middleware,
        ))
        .layer(Extension(state))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
