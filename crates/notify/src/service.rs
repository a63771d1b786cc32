//! The notification service: one request in, two emails out.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use validator::Validate;

use hdtrades_core::booking::BookingNotice;
use hdtrades_core::submission::{BookingNotifier, NotificationError, Recipients};

use crate::config::EmailConfig;
use crate::delivery::{EmailProvider, OutgoingEmail, DISABLED_PROVIDER_NAME};
use crate::error::{NotifyError, ProviderError};
use crate::request::SendEmailRequest;
use crate::templates;

/// Provider responses for the two sends.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEmailReceipt {
    pub customer_email: serde_json::Value,
    pub staff_email: serde_json::Value,
}

/// Renders and sends the customer confirmation and the staff alert.
///
/// The two sends are independent provider requests: the customer email may
/// go out even though the staff email then fails. That case is reported as
/// [`NotifyError::StaffAlert`] so a caller can resend the staff alert alone
/// with [`NotificationService::send_staff_alert`].
pub struct NotificationService {
    provider: Arc<dyn EmailProvider>,
    from_address: String,
    staff_address: String,
}

impl NotificationService {
    pub fn new(
        provider: Arc<dyn EmailProvider>,
        from_address: impl Into<String>,
        staff_address: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            from_address: from_address.into(),
            staff_address: staff_address.into(),
        }
    }

    /// Service using the addresses from `config` and an already built provider.
    pub fn from_config(provider: Arc<dyn EmailProvider>, config: &EmailConfig) -> Self {
        Self::new(provider, &config.from_address, &config.staff_address)
    }

    /// Label of the configured provider, e.g. `resend`.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Whether sends can succeed at all.
    pub fn is_enabled(&self) -> bool {
        self.provider_name() != DISABLED_PROVIDER_NAME
    }

    /// Validate `req`, then send the customer email followed by the staff email.
    pub async fn send_booking_emails(
        &self,
        req: &SendEmailRequest,
    ) -> Result<BookingEmailReceipt, NotifyError> {
        if req.validate().is_err() {
            return Err(NotifyError::MissingFields);
        }

        let customer = OutgoingEmail {
            from: self.from_address.clone(),
            to: vec![req.email.clone()],
            subject: templates::CUSTOMER_SUBJECT.to_string(),
            html: templates::customer_confirmation(req),
        };
        let customer_email = self.provider.send(&customer).await?;

        let staff_email = self
            .send_staff(req)
            .await
            .map_err(NotifyError::StaffAlert)?;

        tracing::info!(to = %req.email, "Booking emails sent");
        Ok(BookingEmailReceipt {
            customer_email,
            staff_email,
        })
    }

    /// Validate `req`, then send the staff alert only.
    pub async fn send_staff_alert(
        &self,
        req: &SendEmailRequest,
    ) -> Result<serde_json::Value, NotifyError> {
        if req.validate().is_err() {
            return Err(NotifyError::MissingFields);
        }

        let staff_email = self
            .send_staff(req)
            .await
            .map_err(NotifyError::StaffAlert)?;
        tracing::info!(customer = %req.email, "Staff alert resent");
        Ok(staff_email)
    }

    async fn send_staff(&self, req: &SendEmailRequest) -> Result<serde_json::Value, ProviderError> {
        let staff = OutgoingEmail {
            from: self.from_address.clone(),
            to: vec![self.staff_address.clone()],
            subject: templates::STAFF_SUBJECT.to_string(),
            html: templates::staff_alert(req),
        };
        self.provider.send(&staff).await
    }
}

#[async_trait]
impl BookingNotifier for NotificationService {
    async fn send_booking_emails(
        &self,
        notice: &BookingNotice,
        recipients: Recipients,
    ) -> Result<(), NotificationError> {
        let req = SendEmailRequest::from(notice);
        let result = match recipients {
            Recipients::All => NotificationService::send_booking_emails(self, &req)
                .await
                .map(|_| ()),
            Recipients::StaffOnly => self.send_staff_alert(&req).await.map(|_| ()),
        };
        result.map_err(|e| match e {
            NotifyError::MissingFields => NotificationError::Rejected(e.to_string()),
            NotifyError::StaffAlert(_) => NotificationError::StaffAlertFailed(e.to_string()),
            NotifyError::Provider(_) => NotificationError::Delivery(e.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::delivery::DisabledProvider;
    use crate::request::ServiceList;

    /// Records every email; fails the send whose 0-based index is `fail_at`.
    #[derive(Default)]
    struct RecordingProvider {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl EmailProvider for RecordingProvider {
        async fn send(&self, email: &OutgoingEmail) -> Result<serde_json::Value, ProviderError> {
            let mut sent = self.sent.lock().unwrap();
            let index = sent.len();
            sent.push(email.clone());
            if self.fail_at == Some(index) {
                return Err(ProviderError::HttpStatus {
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(json!({ "id": format!("email-{index}") }))
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn request() -> SendEmailRequest {
        SendEmailRequest {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            phone: "0412345678".into(),
            address: "1 Main St".into(),
            services: Some(ServiceList::One("Hot Water Systems".into())),
            preferred_time: Some("Anytime".into()),
            message: Some("Side gate is unlocked".into()),
        }
    }

    fn service(provider: Arc<RecordingProvider>) -> NotificationService {
        NotificationService::new(
            provider,
            "HD Trade Services <bookings@hdtradeservices.com.au>",
            "admin@hdtradeservices.com.au",
        )
    }

    #[tokio::test]
    async fn sends_customer_then_staff() {
        let provider = Arc::new(RecordingProvider::default());
        let receipt = service(Arc::clone(&provider))
            .send_booking_emails(&request())
            .await
            .unwrap();

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, vec!["jo@x.com"]);
        assert_eq!(sent[0].subject, "Your Booking with HD Trade Services");
        assert_eq!(sent[1].to, vec!["admin@hdtradeservices.com.au"]);
        assert_eq!(sent[1].subject, "New Booking Received");
        assert!(sent[1].html.contains("Side gate is unlocked"));
        assert_eq!(receipt.customer_email["id"], "email-0");
        assert_eq!(receipt.staff_email["id"], "email-1");
    }

    #[tokio::test]
    async fn missing_required_field_sends_nothing() {
        let provider = Arc::new(RecordingProvider::default());
        let mut req = request();
        req.address.clear();

        let result = service(Arc::clone(&provider)).send_booking_emails(&req).await;

        assert_matches!(result, Err(NotifyError::MissingFields));
        assert!(provider.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn staff_failure_after_customer_success_is_an_error() {
        let provider = Arc::new(RecordingProvider {
            fail_at: Some(1),
            ..Default::default()
        });

        let result = service(Arc::clone(&provider))
            .send_booking_emails(&request())
            .await;

        assert_matches!(result, Err(NotifyError::StaffAlert(_)));
        assert_eq!(provider.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn customer_failure_sends_no_staff_alert() {
        let provider = Arc::new(RecordingProvider {
            fail_at: Some(0),
            ..Default::default()
        });

        let result = service(Arc::clone(&provider))
            .send_booking_emails(&request())
            .await;

        assert_matches!(result, Err(NotifyError::Provider(_)));
        assert_eq!(provider.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn staff_alert_alone_goes_to_staff_only() {
        let provider = Arc::new(RecordingProvider::default());

        let receipt = service(Arc::clone(&provider))
            .send_staff_alert(&request())
            .await
            .unwrap();

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["admin@hdtradeservices.com.au"]);
        assert_eq!(sent[0].subject, "New Booking Received");
        assert_eq!(receipt["id"], "email-0");
    }

    #[test]
    fn provider_label_and_enabled_flag() {
        let recording = service(Arc::new(RecordingProvider::default()));
        assert_eq!(recording.provider_name(), "recording");
        assert!(recording.is_enabled());

        let disabled = NotificationService::new(Arc::new(DisabledProvider), "a@b.co", "c@d.co");
        assert_eq!(disabled.provider_name(), "disabled");
        assert!(!disabled.is_enabled());
    }

    #[tokio::test]
    async fn notifier_maps_missing_fields_to_rejection() {
        let provider = Arc::new(RecordingProvider::default());
        let notice = BookingNotice {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            phone: "0412345678".into(),
            address: String::new(),
            services: vec!["Roofing".into()],
            preferred_time: None,
            message: None,
        };

        let notifier: &dyn BookingNotifier = &service(provider);
        let result = notifier.send_booking_emails(&notice, Recipients::All).await;

        assert_matches!(result, Err(NotificationError::Rejected(_)));
    }

    #[tokio::test]
    async fn notifier_maps_provider_failure_to_delivery() {
        let provider = Arc::new(RecordingProvider {
            fail_at: Some(0),
            ..Default::default()
        });
        let notice = BookingNotice {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            phone: "0412345678".into(),
            address: "1 Main St".into(),
            services: vec!["Roofing".into()],
            preferred_time: None,
            message: None,
        };

        let notifier: &dyn BookingNotifier = &service(provider);
        let result = notifier.send_booking_emails(&notice, Recipients::All).await;

        assert_matches!(result, Err(NotificationError::Delivery(_)));
    }

    #[tokio::test]
    async fn notifier_reports_staff_leg_failure_separately() {
        let provider = Arc::new(RecordingProvider {
            fail_at: Some(1),
            ..Default::default()
        });

        let notifier: &dyn BookingNotifier = &service(Arc::clone(&provider));
        let result = notifier.send_booking_emails(&notice(), Recipients::All).await;

        assert_matches!(result, Err(NotificationError::StaffAlertFailed(_)));
    }

    #[tokio::test]
    async fn notifier_staff_only_skips_customer_confirmation() {
        let provider = Arc::new(RecordingProvider::default());

        let notifier: &dyn BookingNotifier = &service(Arc::clone(&provider));
        notifier
            .send_booking_emails(&notice(), Recipients::StaffOnly)
            .await
            .unwrap();

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["admin@hdtradeservices.com.au"]);
    }

    fn notice() -> BookingNotice {
        BookingNotice {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            phone: "0412345678".into(),
            address: "1 Main St".into(),
            services: vec!["Roofing".into()],
            preferred_time: None,
            message: None,
        }
    }
}
