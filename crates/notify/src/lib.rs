//! Booking email notifications.
//!
//! - [`NotificationService`]: validates a send-email request, renders the
//!   customer confirmation and staff alert, and sends both through an
//!   [`EmailProvider`].
//! - [`delivery`]: provider implementations (Resend HTTP API, SMTP).
//! - [`SendEmailClient`]: calls a remote `/api/send-email` endpoint.

pub mod client;
pub mod config;
pub mod delivery;
pub mod error;
pub mod request;
pub mod service;
pub mod templates;

pub use client::SendEmailClient;
pub use config::{EmailConfig, ProviderConfig};
pub use delivery::{EmailProvider, OutgoingEmail};
pub use error::{NotifyError, ProviderError};
pub use request::{SendEmailRequest, ServiceList};
pub use service::{BookingEmailReceipt, NotificationService};
