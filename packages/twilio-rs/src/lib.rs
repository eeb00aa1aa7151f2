//! Minimal Twilio Verify client: send an OTP to a phone number, then check
//! the code the user typed back.

pub mod models;

use std::collections::HashMap;

use reqwest::{header, Client};
use thiserror::Error;

use crate::models::{VerificationCheckResponse, VerificationResponse};

#[derive(Debug, Error)]
pub enum TwilioError {
    #[error("request to Twilio failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Twilio returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("verification was not approved (status: {status})")]
    NotApproved { status: String },
}

#[derive(Debug, Clone)]
pub struct TwilioOptions {
    pub account_sid: String,
    pub auth_token: String,
    pub service_id: String,
}

/// Client for the Twilio Verify v2 API.
#[derive(Debug, Clone)]
pub struct TwilioService {
    options: TwilioOptions,
    client: Client,
}

impl TwilioService {
    pub fn new(options: TwilioOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Start a verification: Twilio sends an SMS with a one-time code.
    pub async fn send_otp(&self, phone_number: &str) -> Result<VerificationResponse, TwilioError> {
        let url = format!(
            "https://verify.twilio.com/v2/Services/{}/Verifications",
            self.options.service_id
        );

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", phone_number);
        form_body.insert("Channel", "sms");

        let response = self
            .client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&form_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<VerificationResponse>().await?)
    }

    /// Check a code against a pending verification.
    ///
    /// Twilio reports a non-matching or expired code as a check whose status
    /// is anything other than "approved".
    pub async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<(), TwilioError> {
        let url = format!(
            "https://verify.twilio.com/v2/Services/{}/VerificationCheck",
            self.options.service_id
        );

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("To", phone_number);
        form_body.insert("Code", code);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.options.account_sid, Some(&self.options.auth_token))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&form_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwilioError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let check = response.json::<VerificationCheckResponse>().await?;
        if check.status == "approved" {
            Ok(())
        } else {
            Err(TwilioError::NotApproved {
                status: check.status,
            })
        }
    }
}
