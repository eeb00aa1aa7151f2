// Mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::{bail, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};

use super::{BaseMediaStore, BaseOtpService};

// =============================================================================
// Mock OTP Service
// =============================================================================

/// OTP provider stand-in: records dispatched numbers, accepts one fixed code.
pub struct MockOtpService {
    accepted_code: String,
    fail_sends: bool,
    sent_to: Arc<Mutex<Vec<String>>>,
}

impl MockOtpService {
    pub fn new(accepted_code: &str) -> Self {
        Self {
            accepted_code: accepted_code.to_string(),
            fail_sends: false,
            sent_to: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every send fail, simulating an unreachable provider.
    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Phone numbers an OTP was dispatched to, in call order.
    pub fn sent_to(&self) -> Vec<String> {
        self.sent_to.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseOtpService for MockOtpService {
    async fn send_otp(&self, phone_number: &str) -> Result<()> {
        if self.fail_sends {
            bail!("provider unreachable");
        }
        self.sent_to.lock().unwrap().push(phone_number.to_string());
        Ok(())
    }

    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<()> {
        let _ = phone_number;
        if code == self.accepted_code {
            Ok(())
        } else {
            bail!("verification was not approved")
        }
    }
}

/// OTP provider that rejects everything, for exercising the test-identifier
/// bypass (which must never reach the provider).
pub struct RejectingOtpService;

#[async_trait]
impl BaseOtpService for RejectingOtpService {
    async fn send_otp(&self, _phone_number: &str) -> Result<()> {
        bail!("provider should not have been called")
    }

    async fn verify_otp(&self, _phone_number: &str, _code: &str) -> Result<()> {
        bail!("provider should not have been called")
    }
}

// =============================================================================
// Mock Media Store
// =============================================================================

/// In-memory media store: records puts, resolves fake URLs, and can be told
/// to fail any upload whose key contains a given substring.
pub struct MockMediaStore {
    puts: Arc<Mutex<Vec<String>>>,
    fail_on_key_containing: Option<String>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self {
            puts: Arc::new(Mutex::new(Vec::new())),
            fail_on_key_containing: None,
        }
    }

    /// Fail any put whose key contains `fragment` (e.g. `_image_1_` to sink
    /// the second upload of a batch).
    pub fn failing_on(mut self, fragment: &str) -> Self {
        self.fail_on_key_containing = Some(fragment.to_string());
        self
    }

    /// Keys written so far, in completion order.
    pub fn put_keys(&self) -> Vec<String> {
        self.puts.lock().unwrap().clone()
    }
}

impl Default for MockMediaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMediaStore for MockMediaStore {
    async fn put(&self, key: &str, _bytes: Bytes) -> Result<()> {
        if let Some(fragment) = &self.fail_on_key_containing {
            if key.contains(fragment) {
                bail!("upload rejected for key {key}");
            }
        }
        self.puts.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn download_url(&self, key: &str) -> Result<String> {
        Ok(format!("https://media.test/{key}"))
    }
}
