//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container handed to all
//! domain service functions. External services sit behind trait objects so
//! tests can swap in mocks.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use twilio::TwilioService;

use crate::domains::auth::SessionStore;
use crate::kernel::{BaseMediaStore, BaseOtpService};

// =============================================================================
// TwilioService Adapter (implements BaseOtpService trait)
// =============================================================================

/// Wrapper around TwilioService that implements the BaseOtpService trait
pub struct TwilioAdapter(pub Arc<TwilioService>);

impl TwilioAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseOtpService for TwilioAdapter {
    async fn send_otp(&self, phone_number: &str) -> Result<()> {
        self.0.send_otp(phone_number).await.map(|_| ())?;
        Ok(())
    }

    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<()> {
        self.0.verify_otp(phone_number, code).await?;
        Ok(())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to domain service functions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub otp: Arc<dyn BaseOtpService>,
    pub media: Arc<dyn BaseMediaStore>,
    pub sessions: Arc<SessionStore>,
    /// Allow the fictional +1-555 test range to bypass the OTP provider.
    pub test_identifier_enabled: bool,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        otp: Arc<dyn BaseOtpService>,
        media: Arc<dyn BaseMediaStore>,
        sessions: Arc<SessionStore>,
        test_identifier_enabled: bool,
    ) -> Self {
        Self {
            db_pool,
            otp,
            media,
            sessions,
            test_identifier_enabled,
        }
    }
}
