//! Party endpoints: create, attach images, list, invite.

use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{MemberId, PartyId};
use crate::domains::parties::models::{NewParty, Party};
use crate::domains::parties::service as parties;
use crate::domains::parties::PartyError;
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::{error_body, party_error_response, unauthorized, ErrorBody};

type HandlerError = (StatusCode, Json<ErrorBody>);

fn require_auth(auth_user: Option<Extension<AuthUser>>) -> Result<AuthUser, HandlerError> {
    auth_user.map(|Extension(user)| user).ok_or_else(unauthorized)
}

/// Fetch the party and confirm the caller hosts it.
async fn require_host(
    party_id: PartyId,
    user: &AuthUser,
    state: &AppState,
) -> Result<Party, HandlerError> {
    let party = Party::find_by_id(party_id, &state.deps.db_pool)
        .await
        .map_err(|e| party_error_response(PartyError::Persistence(e)))?
        .ok_or_else(|| party_error_response(PartyError::NotFound(party_id)))?;

    if party.host_id != user.member_id {
        return Err((
            StatusCode::FORBIDDEN,
            error_body("only the host can modify a party"),
        ));
    }
    Ok(party)
}

/// POST /parties
pub async fn create_party_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Json(body): Json<NewParty>,
) -> Result<(StatusCode, Json<Party>), HandlerError> {
    let user = require_auth(auth_user)?;
    let party = parties::create_party(user.member_id, &body, &state.deps)
        .await
        .map_err(party_error_response)?;
    Ok((StatusCode::CREATED, Json(party)))
}

#[derive(Debug, Serialize)]
pub struct AttachImagesResponse {
    pub image_urls: Vec<String>,
}

/// POST /parties/{party_id}/images (multipart)
///
/// Field order in the multipart body determines image order.
pub async fn attach_images_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(party_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<AttachImagesResponse>, HandlerError> {
    let user = require_auth(auth_user)?;
    let party_id = PartyId::from_uuid(party_id);
    require_host(party_id, &user, &state).await?;

    let mut images: Vec<Bytes> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, error_body(e.to_string())))?
    {
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, error_body(e.to_string())))?;
        images.push(bytes);
    }

    if images.is_empty() {
        return Err((StatusCode::BAD_REQUEST, error_body("no images in request")));
    }

    let image_urls = parties::attach_images(party_id, images, &state.deps)
        .await
        .map_err(party_error_response)?;

    Ok(Json(AttachImagesResponse { image_urls }))
}

/// GET /parties/hosted
pub async fn hosted_parties_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
) -> Result<Json<Vec<Party>>, HandlerError> {
    let user = require_auth(auth_user)?;
    parties::list_hosted(user.member_id, &state.deps)
        .await
        .map(Json)
        .map_err(party_error_response)
}

/// GET /parties/invited
pub async fn invited_parties_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
) -> Result<Json<Vec<Party>>, HandlerError> {
    let user = require_auth(auth_user)?;
    parties::list_invited(user.member_id, &state.deps)
        .await
        .map(Json)
        .map_err(party_error_response)
}

#[derive(Debug, Deserialize)]
pub struct InviteGuestsRequest {
    pub guest_ids: Vec<Uuid>,
}

/// POST /parties/{party_id}/invite
pub async fn invite_guests_handler(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(party_id): Path<Uuid>,
    Json(body): Json<InviteGuestsRequest>,
) -> Result<Json<Party>, HandlerError> {
    let user = require_auth(auth_user)?;
    let party_id = PartyId::from_uuid(party_id);
    require_host(party_id, &user, &state).await?;

    let guest_ids: Vec<MemberId> = body.guest_ids.into_iter().map(MemberId::from_uuid).collect();
    parties::invite_guests(party_id, &guest_ids, &state.deps)
        .await
        .map(Json)
        .map_err(party_error_response)
}
