// ---------------------------------------------------------------------------
// ProviderError
// ---------------------------------------------------------------------------

/// A single send through an email provider failed.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP-level failure talking to an API provider (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API provider answered with a non-2xx status.
    #[error("Email provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// No provider is configured for this deployment.
    #[error("Email delivery is not configured")]
    NotConfigured,
}

// ---------------------------------------------------------------------------
// NotifyError
// ---------------------------------------------------------------------------

/// Failure of a booking notification request.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// One of name, email, phone or address is missing or empty.
    #[error("Required fields are missing")]
    MissingFields,

    /// The customer confirmation could not be sent; nothing went out.
    #[error("Failed to send email: {0}")]
    Provider(#[from] ProviderError),

    /// The customer confirmation went out but the staff alert did not.
    #[error("Failed to send staff alert: {0}")]
    StaffAlert(ProviderError),
}
