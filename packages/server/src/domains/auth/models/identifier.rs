use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::common::MemberId;

/// Identifier - maps hashed phone numbers to members
///
/// Phone numbers are hashed for privacy before being used as lookup keys.
/// We never store raw identifiers in this table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Identifier {
    pub id: Uuid,
    pub member_id: MemberId,
    pub phone_hash: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Identifier {
    /// Find identifier by phone hash
    pub async fn find_by_phone_hash(phone_hash: &str, pool: &PgPool) -> Result<Option<Self>> {
        let identifier =
            sqlx::query_as::<_, Identifier>("SELECT * FROM identifiers WHERE phone_hash = $1")
                .bind(phone_hash)
                .fetch_optional(pool)
                .await?;
        Ok(identifier)
    }

    /// Create identifier for a member
    pub async fn create(member_id: MemberId, phone_hash: String, pool: &PgPool) -> Result<Self> {
        let identifier = sqlx::query_as::<_, Identifier>(
            r#"
            INSERT INTO identifiers (member_id, phone_hash)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(phone_hash)
        .fetch_one(pool)
        .await?;
        Ok(identifier)
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Hash a phone number using SHA256.
///
/// The hash is used as a lookup key in the identifiers table so raw phone
/// numbers never have to be queried against.
pub fn hash_phone_number(phone_number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(phone_number.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fixed code accepted for test identifiers when the feature is enabled.
pub const TEST_VERIFICATION_CODE: &str = "123456";

/// Check whether a phone number is a designated test identifier.
///
/// Test identifiers (the fictional +1-555 range) skip the Twilio round-trip
/// and accept `TEST_VERIFICATION_CODE`, so end-to-end tests and local dev
/// work without provider credentials. Gated behind config.
pub fn is_test_identifier(phone_number: &str) -> bool {
    phone_number.starts_with("+1555") && phone_number.len() == 12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_hash_consistency() {
        let hash1 = hash_phone_number("+1234567890");
        let hash2 = hash_phone_number("+1234567890");
        assert_eq!(hash1, hash2, "Same phone should produce same hash");
    }

    #[test]
    fn test_phone_hash_uniqueness() {
        let hash1 = hash_phone_number("+1234567890");
        let hash2 = hash_phone_number("+9876543210");
        assert_ne!(
            hash1, hash2,
            "Different phones should have different hashes"
        );
    }

    #[test]
    fn test_phone_hash_format() {
        let hash = hash_phone_number("+1234567890");
        assert_eq!(hash.len(), 64, "SHA256 hash should be 64 hex characters");
        assert!(
            hash.chars().all(|c| c.is_ascii_hexdigit()),
            "Hash should only contain hex digits"
        );
    }

    #[test]
    fn test_test_identifier_range() {
        assert!(is_test_identifier("+15551234567"));
        assert!(is_test_identifier("+15550000000"));
        assert!(!is_test_identifier("+16121234567"));
        assert!(!is_test_identifier("+1555123"));
        assert!(!is_test_identifier("15551234567"));
    }
}
