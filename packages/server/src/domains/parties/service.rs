//! Party service functions - persistence and media attachment
//!
//! Creation is two-phase: a party is inserted without images, then
//! `attach_images` uploads the photos and writes their URLs back in one
//! repository call. The row records `media_status = 'pending'` in between,
//! so an interrupted attachment is visible and retryable instead of silently
//! leaving the party image-less.

use bytes::Bytes;
use futures::future::try_join_all;
use tracing::{error, info};

use crate::common::{MemberId, PartyId};
use crate::domains::parties::models::{NewParty, Party};
use crate::domains::parties::PartyError;
use crate::kernel::ServerDeps;

/// Prefix under which all party images are stored.
const IMAGE_KEY_PREFIX: &str = "party_images";

/// Persist a new party with empty images and guest list.
pub async fn create_party(
    host_id: MemberId,
    data: &NewParty,
    deps: &ServerDeps,
) -> Result<Party, PartyError> {
    let party = Party::insert(host_id, data, &deps.db_pool)
        .await
        .map_err(|e| {
            error!(%host_id, error = %e, "Failed to create party");
            PartyError::Persistence(e)
        })?;

    info!(party_id = %party.id, %host_id, "Party created");
    Ok(party)
}

/// Upload images for a party and write their URLs back onto the record.
///
/// Uploads run concurrently; the ordinal in each storage key keeps the
/// returned URLs positionally aligned with the input. All-or-nothing: if any
/// upload fails the whole call fails, no URLs are returned, and the party
/// stays `pending` (partial uploads are not cleaned up - retrying overwrites
/// them under fresh keys).
pub async fn attach_images(
    party_id: PartyId,
    images: Vec<Bytes>,
    deps: &ServerDeps,
) -> Result<Vec<String>, PartyError> {
    let party = Party::find_by_id(party_id, &deps.db_pool)
        .await
        .map_err(PartyError::Persistence)?
        .ok_or(PartyError::NotFound(party_id))?;

    // An empty batch must not mark media ready with nothing behind it
    if images.is_empty() {
        return Err(PartyError::Upload {
            reason: "no images to attach".to_string(),
        });
    }

    let uploaded_at = chrono::Utc::now().timestamp_millis();
    let uploads = images.into_iter().enumerate().map(|(index, bytes)| {
        let key = image_key(party_id, index, uploaded_at);
        let media = deps.media.clone();
        async move {
            media.put(&key, bytes).await?;
            media.download_url(&key).await
        }
    });

    let urls = try_join_all(uploads).await.map_err(|e| {
        error!(party_id = %party.id, error = %e, "Image upload failed");
        PartyError::Upload {
            reason: e.to_string(),
        }
    })?;

    let updated = Party::set_image_urls(party_id, &urls, &deps.db_pool)
        .await
        .map_err(|e| {
            error!(party_id = %party.id, error = %e, "Failed to write image URLs");
            PartyError::Persistence(e)
        })?;

    info!(party_id = %party.id, count = urls.len(), "Images attached");
    Ok(updated.image_urls)
}

/// All parties hosted by the member.
pub async fn list_hosted(member_id: MemberId, deps: &ServerDeps) -> Result<Vec<Party>, PartyError> {
    Party::find_by_host(member_id, &deps.db_pool)
        .await
        .map_err(|e| {
            error!(%member_id, error = %e, "Failed to fetch hosted parties");
            PartyError::Persistence(e)
        })
}

/// All parties the member is invited to (hosting alone does not qualify).
pub async fn list_invited(
    member_id: MemberId,
    deps: &ServerDeps,
) -> Result<Vec<Party>, PartyError> {
    Party::find_invited(member_id, &deps.db_pool)
        .await
        .map_err(|e| {
            error!(%member_id, error = %e, "Failed to fetch invited parties");
            PartyError::Persistence(e)
        })
}

/// Add guests to a party's invite list.
pub async fn invite_guests(
    party_id: PartyId,
    guest_ids: &[MemberId],
    deps: &ServerDeps,
) -> Result<Party, PartyError> {
    let uuids: Vec<uuid::Uuid> = guest_ids.iter().map(|id| (*id).into()).collect();
    let party = Party::add_guests(party_id, &uuids, &deps.db_pool)
        .await
        .map_err(|e| {
            error!(%party_id, error = %e, "Failed to invite guests");
            PartyError::Persistence(e)
        })?;

    info!(%party_id, count = guest_ids.len(), "Guests invited");
    Ok(party)
}

/// Storage key for one image: prefix, party id, ordinal position, upload
/// timestamp. The ordinal pins each URL to its source image regardless of
/// upload completion order; the timestamp keeps retries from colliding.
fn image_key(party_id: PartyId, index: usize, uploaded_at_ms: i64) -> String {
    format!("{IMAGE_KEY_PREFIX}/{party_id}_image_{index}_{uploaded_at_ms}")
}
