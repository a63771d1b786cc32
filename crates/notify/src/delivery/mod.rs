//! Transactional email providers.
//!
//! [`EmailProvider`] is the seam between the notification service and the
//! outside world. [`build_provider`] picks an implementation from
//! [`ProviderConfig`].

pub mod resend;
pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

pub use resend::ResendProvider;
pub use smtp::SmtpProvider;

/// One HTML email ready to hand to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Sends a single email and returns the provider's response payload.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value, ProviderError>;

    /// Short provider label for logs and the health report.
    fn name(&self) -> &'static str;
}

/// Construct the provider described by `config`.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn EmailProvider>, ProviderError> {
    Ok(match config {
        ProviderConfig::Resend { api_key, api_url } => {
            Arc::new(ResendProvider::new(api_key.clone(), api_url.clone())?)
        }
        ProviderConfig::Smtp {
            host,
            port,
            user,
            password,
        } => Arc::new(SmtpProvider::new(host, *port, user.clone(), password.clone())?),
    })
}

/// Stand-in used when no provider is configured; every send fails.
pub struct DisabledProvider;

#[async_trait]
impl EmailProvider for DisabledProvider {
    async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value, ProviderError> {
        tracing::warn!(subject = %email.subject, "Email not sent, no provider configured");
        Err(ProviderError::NotConfigured)
    }

    fn name(&self) -> &'static str {
        DISABLED_PROVIDER_NAME
    }
}

/// Label reported by [`DisabledProvider`].
pub const DISABLED_PROVIDER_NAME: &str = "disabled";
