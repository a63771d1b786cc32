//! SMTP provider via the `lettre` async transport.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::json;

use super::{EmailProvider, OutgoingEmail};
use crate::error::ProviderError;

/// Sends HTML email through an SMTP relay using STARTTLS.
pub struct SmtpProvider {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpProvider {
    pub fn new(
        host: &str,
        port: u16,
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ProviderError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(port);

        if let (Some(user), Some(pass)) = (user, password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            mailer: builder.build(),
        })
    }
}

/// Assemble the MIME message for `email`.
fn build_message(email: &OutgoingEmail) -> Result<Message, ProviderError> {
    let mut builder = Message::builder()
        .from(email.from.parse()?)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML);

    for to in &email.to {
        builder = builder.to(to.parse()?);
    }

    builder
        .body(email.html.clone())
        .map_err(|e| ProviderError::Build(e.to_string()))
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    /// Returns the SMTP reply code, e.g. `{ "code": "250" }`.
    async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value, ProviderError> {
        let message = build_message(email)?;
        let response = self.mailer.send(message).await?;

        tracing::info!(subject = %email.subject, code = %response.code(), "Email sent via SMTP");
        Ok(json!({ "code": response.code().to_string() }))
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
