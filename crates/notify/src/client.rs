//! HTTP client for a remote notification service.
//!
//! Used when the booking API and the notification endpoint are deployed
//! separately. Speaks the same `POST /api/send-email` contract, which always
//! sends both emails: a retry after a staff-only failure resends the customer
//! confirmation too.

use std::time::Duration;

use async_trait::async_trait;

use hdtrades_core::booking::BookingNotice;
use hdtrades_core::submission::{BookingNotifier, NotificationError, Recipients};

use crate::request::SendEmailRequest;

/// Per-request timeout for the remote endpoint.
const CLIENT_TIMEOUT_SECS: u64 = 10;

pub struct SendEmailClient {
    client: reqwest::Client,
    url: String,
}

impl SendEmailClient {
    /// Client posting to `url`, e.g. `https://example.com/api/send-email`.
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BookingNotifier for SendEmailClient {
    async fn send_booking_emails(
        &self,
        notice: &BookingNotice,
        _recipients: Recipients,
    ) -> Result<(), NotificationError> {
        let body = SendEmailRequest::from(notice);

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), body = %text, "Notification endpoint refused booking");

        if status == reqwest::StatusCode::BAD_REQUEST {
            Err(NotificationError::Rejected(text))
        } else {
            Err(NotificationError::Delivery(format!("HTTP {status}: {text}")))
        }
    }
}
