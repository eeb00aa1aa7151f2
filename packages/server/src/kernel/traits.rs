// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Naming convention: Base* for trait names (e.g., BaseOtpService)

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

// =============================================================================
// OTP Service Trait (Infrastructure - SMS verification)
// =============================================================================

#[async_trait]
pub trait BaseOtpService: Send + Sync {
    /// Send OTP code via SMS to phone number
    async fn send_otp(&self, phone_number: &str) -> Result<()>;

    /// Verify OTP code for phone number
    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<()>;
}

// =============================================================================
// Media Store Trait (Infrastructure - object storage)
// =============================================================================

#[async_trait]
pub trait BaseMediaStore: Send + Sync {
    /// Write binary content under the given key.
    async fn put(&self, key: &str, bytes: Bytes) -> Result<()>;

    /// Resolve a fetchable URL for a stored key.
    async fn download_url(&self, key: &str) -> Result<String>;
}
