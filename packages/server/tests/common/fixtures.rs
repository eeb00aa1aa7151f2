//! Test fixtures - helpers for creating test data

use anyhow::Result;
use sqlx::PgPool;

use server_core::common::MemberId;
use server_core::domains::member::models::Member;
use server_core::domains::parties::models::NewParty;

/// Create a member directly in the database, bypassing the OTP flow.
pub async fn create_test_member(pool: &PgPool, phone_number: &str) -> Result<MemberId> {
    let member = Member::create(phone_number, pool).await?;
    Ok(member.id)
}

/// A plausible party payload.
pub fn sample_party(title: &str) -> NewParty {
    NewParty {
        title: title.to_string(),
        description: "Bring your own snacks".to_string(),
        location: "Riverside Park".to_string(),
        date: "2024-08-17".to_string(),
        time: "19:30".to_string(),
        whatsapp_group_link: "https://chat.example/riverside".to_string(),
    }
}
