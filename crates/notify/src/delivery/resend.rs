//! Resend HTTP API provider.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{EmailProvider, OutgoingEmail};
use crate::error::ProviderError;

/// HTTP request timeout for a single send.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends email through `POST /emails` on the Resend API.
pub struct ResendProvider {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl ResendProvider {
    pub fn new(api_key: String, api_url: String) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            api_url,
        })
    }
}

#[async_trait]
impl EmailProvider for ResendProvider {
    /// Returns Resend's JSON response, e.g. `{ "id": "..." }`.
    async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value, ProviderError> {
        let payload = json!({
            "from": email.from,
            "to": email.to,
            "subject": email.subject,
            "html": email.html,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body: serde_json::Value = response.json().await?;
        tracing::info!(subject = %email.subject, id = %body["id"], "Email sent via Resend");
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "resend"
    }
}
