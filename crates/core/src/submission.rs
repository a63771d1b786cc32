//! Submission coordinator: persist the booking, then send the emails.
//!
//! The two side effects run strictly in sequence. A persistence failure is
//! fatal to the submission and leaves the draft untouched for a retry. A
//! notification failure is logged and swallowed: the booking is already
//! recorded, so the customer still sees the thank-you view.
//!
//! | Stage failing    | State            | Draft reset | User-visible message     |
//! |------------------|------------------|-------------|--------------------------|
//! | Local validation | unchanged (idle) | no          | inline per-field errors  |
//! | Persistence      | `error`          | no          | [`SUBMIT_ERROR_MESSAGE`] |
//! | Notification     | `success`        | yes         | none                     |

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::booking::{BookingNotice, BookingRecord, NewBooking};
use crate::form::BookingForm;
use crate::types::DbId;

/// Banner shown when the booking could not be recorded.
pub const SUBMIT_ERROR_MESSAGE: &str =
    "There was an error submitting your booking. Please try again.";

/// Default upper bound on the create-booking call.
const DEFAULT_PERSISTENCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default upper bound on one notification attempt.
const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Default pauses between notification attempts (1 s, 2 s).
const DEFAULT_RETRY_DELAYS_SECS: [u64; 2] = [1, 2];

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Lifecycle of one form session's submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Success => "success",
            SubmissionState::Error => "error",
        }
    }
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Failure to record a booking.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// A booking with this idempotency key already exists.
    #[error("Booking already recorded for submission key {0}")]
    Duplicate(Uuid),

    #[error("Booking store unavailable: {0}")]
    Unavailable(String),

    #[error("Booking store did not respond within {0:?}")]
    TimedOut(Duration),
}

/// Failure to send the booking emails.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The notifier refused the request; retrying cannot help.
    #[error("Notification rejected: {0}")]
    Rejected(String),

    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    /// The customer confirmation went out but the staff alert did not.
    #[error("Staff alert failed after the customer was notified: {0}")]
    StaffAlertFailed(String),

    #[error("Notification did not complete within {0:?}")]
    TimedOut(Duration),
}

impl NotificationError {
    fn is_retryable(&self) -> bool {
        !matches!(self, NotificationError::Rejected(_))
    }
}

/// Durable store for booking records.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Insert one booking and return the stored row.
    async fn create_booking(&self, booking: &NewBooking) -> Result<BookingRecord, PersistenceError>;
}

/// Sends the customer confirmation and the staff alert.
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn send_booking_emails(
        &self,
        notice: &BookingNotice,
        recipients: Recipients,
    ) -> Result<(), NotificationError>;
}

/// Which booking emails one notification attempt sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipients {
    /// Customer confirmation, then staff alert.
    All,
    /// Staff alert only; the customer already has a confirmation.
    StaffOnly,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timeouts and retry policy for the two collaborator calls.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    pub persistence_timeout: Duration,
    pub notification_timeout: Duration,
    /// One entry per retry; an empty list means a single attempt. After a
    /// [`NotificationError::StaffAlertFailed`] the retries send the staff
    /// alert only, so the customer is never sent a second confirmation by an
    /// in-process notifier. A remote notifier may still resend both.
    pub notification_retry_delays: Vec<Duration>,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            persistence_timeout: DEFAULT_PERSISTENCE_TIMEOUT,
            notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
            notification_retry_delays: DEFAULT_RETRY_DELAYS_SECS
                .iter()
                .map(|s| Duration::from_secs(*s))
                .collect(),
        }
    }
}

impl SubmissionConfig {
    /// Load timeouts from the environment, falling back to defaults.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `PERSISTENCE_TIMEOUT_SECS`  | `10`    |
    /// | `NOTIFICATION_TIMEOUT_SECS` | `10`    |
    pub fn from_env() -> Self {
        let secs = |var: &str| {
            std::env::var(var)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
        };
        let defaults = Self::default();
        Self {
            persistence_timeout: secs("PERSISTENCE_TIMEOUT_SECS")
                .unwrap_or(defaults.persistence_timeout),
            notification_timeout: secs("NOTIFICATION_TIMEOUT_SECS")
                .unwrap_or(defaults.notification_timeout),
            notification_retry_delays: defaults.notification_retry_delays,
        }
    }
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Result of one call to [`SubmissionCoordinator::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Local validation failed; no collaborator was called.
    Invalid,
    /// A submission for this form is already running.
    InFlight,
    /// The booking could not be recorded.
    Failed(PersistenceError),
    /// The booking is recorded. `booking_id` is `None` when an earlier
    /// attempt of the same draft had already stored it.
    Submitted {
        booking_id: Option<DbId>,
        notified: bool,
    },
}

/// Sequences persistence and notification for a [`BookingForm`].
#[derive(Clone)]
pub struct SubmissionCoordinator {
    store: Arc<dyn BookingStore>,
    notifier: Arc<dyn BookingNotifier>,
    config: SubmissionConfig,
}

impl SubmissionCoordinator {
    pub fn new(
        store: Arc<dyn BookingStore>,
        notifier: Arc<dyn BookingNotifier>,
        config: SubmissionConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Run the submit action for `form`.
    ///
    /// The form is marked as having attempted a submit whether or not it is
    /// valid, so inline errors become visible. Holding `&mut BookingForm`
    /// across the awaits keeps this single-flight per session; the state
    /// check covers callers that drive the form through another handle.
    pub async fn submit(&self, form: &mut BookingForm) -> SubmitOutcome {
        form.mark_submit_attempted();

        if !form.validate_form() {
            tracing::debug!(errors = form.errors().len(), "Booking form failed validation");
            return SubmitOutcome::Invalid;
        }

        if form.state() == SubmissionState::Submitting {
            return SubmitOutcome::InFlight;
        }

        form.begin_submission();

        let booking = NewBooking::now(form.draft());
        let booking_id = match self.persist(&booking).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    submission_key = %booking.idempotency_key,
                    error = %e,
                    "Booking submission failed",
                );
                form.fail_submission();
                return SubmitOutcome::Failed(e);
            }
        };

        let notice = BookingNotice::from_draft(form.draft());
        let notified = match self.notify(&notice).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    booking_id = ?booking_id,
                    error = %e,
                    "Email notification failed, but booking was saved",
                );
                false
            }
        };

        form.complete_submission();
        tracing::info!(booking_id = ?booking_id, notified, "Booking submitted");

        SubmitOutcome::Submitted {
            booking_id,
            notified,
        }
    }

    /// Create the booking. A duplicate key means an earlier attempt of this
    /// draft already stored it, which counts as persisted.
    async fn persist(&self, booking: &NewBooking) -> Result<Option<DbId>, PersistenceError> {
        let timeout = self.config.persistence_timeout;
        match tokio::time::timeout(timeout, self.store.create_booking(booking)).await {
            Ok(Ok(record)) => Ok(Some(record.id)),
            Ok(Err(PersistenceError::Duplicate(key))) => {
                tracing::info!(submission_key = %key, "Booking already recorded, continuing");
                Ok(None)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(PersistenceError::TimedOut(timeout)),
        }
    }

    /// Send the emails, retrying transient failures with backoff.
    async fn notify(&self, notice: &BookingNotice) -> Result<(), NotificationError> {
        let timeout = self.config.notification_timeout;
        let mut delays = self.config.notification_retry_delays.iter();
        let mut recipients = Recipients::All;
        let mut attempt = 1;

        loop {
            let send = self.notifier.send_booking_emails(notice, recipients);
            let result = match tokio::time::timeout(timeout, send).await {
                Ok(result) => result,
                Err(_) => Err(NotificationError::TimedOut(timeout)),
            };

            let err = match result {
                Ok(()) => return Ok(()),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => e,
            };
            if let NotificationError::StaffAlertFailed(_) = err {
                recipients = Recipients::StaffOnly;
            }

            let Some(delay) = delays.next() else {
                return Err(err);
            };
            tracing::warn!(attempt, ?recipients, error = %err, "Notification attempt failed, retrying");
            tokio::time::sleep(*delay).await;
            attempt += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
