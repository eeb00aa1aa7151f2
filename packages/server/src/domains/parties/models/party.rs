use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::{MemberId, PartyId};

/// Media attachment states for a party.
///
/// A party is inserted as `pending` and flips to `ready` when its image URL
/// list is written back. A party stuck in `pending` after a failed upload is
/// safe to retry: the URL write replaces the whole list.
pub const MEDIA_STATUS_PENDING: &str = "pending";
pub const MEDIA_STATUS_READY: &str = "ready";

/// Party - a hosted gathering.
///
/// `id` and `host_id` are immutable after insert. `image_urls` starts empty
/// and is written once by the image-attachment flow; `invited_guests` grows
/// through invites. No other field changes after creation, and there is no
/// delete path.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Party {
    pub id: PartyId,
    pub host_id: MemberId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub whatsapp_group_link: String,
    pub image_urls: Vec<String>,
    pub invited_guests: Vec<Uuid>,
    pub media_status: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParty {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub time: String,
    pub whatsapp_group_link: String,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Party {
    /// Insert a new party with no images and no guests.
    ///
    /// Not idempotent: calling this twice with identical input creates two
    /// rows with distinct ids. Callers must not retry blindly.
    pub async fn insert(host_id: MemberId, data: &NewParty, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO parties (id, host_id, title, description, location, date, time, whatsapp_group_link)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(PartyId::new())
        .bind(host_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(&data.date)
        .bind(&data.time)
        .bind(&data.whatsapp_group_link)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: PartyId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM parties WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Write the uploaded image URLs back and mark media ready.
    ///
    /// Replaces the whole list, so a retry after a partial failure converges
    /// to the same state.
    pub async fn set_image_urls(id: PartyId, urls: &[String], pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE parties
            SET image_urls = $2, media_status = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(urls)
        .bind(MEDIA_STATUS_READY)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All parties hosted by the given member. Backend-default order.
    pub async fn find_by_host(host_id: MemberId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM parties WHERE host_id = $1")
            .bind(host_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// All parties whose guest list contains the given member.
    pub async fn find_invited(member_id: MemberId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM parties WHERE $1 = ANY(invited_guests)")
            .bind(member_id)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Append guests to the invite list, de-duplicating per guest.
    pub async fn add_guests(id: PartyId, guest_ids: &[Uuid], pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE parties
            SET invited_guests = COALESCE(
                (SELECT array_agg(DISTINCT g) FROM unnest(invited_guests || $2) AS g),
                '{}'
            )
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(guest_ids)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
