//! Email configuration loaded from the environment.

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Resend's send-email endpoint.
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Sender used when `BOOKINGS_FROM` is not set.
pub const DEFAULT_FROM_ADDRESS: &str = "HD Trade Services <bookings@hdtradeservices.com.au>";

/// Staff inbox used when `STAFF_EMAIL` is not set.
pub const DEFAULT_STAFF_ADDRESS: &str = "admin@hdtradeservices.com.au";

/// Which transactional email provider to use.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    /// Resend HTTP API.
    Resend { api_key: String, api_url: String },
    /// Plain SMTP relay with STARTTLS.
    Smtp {
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
    },
}

/// Provider plus the fixed addresses used by booking emails.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub provider: ProviderConfig,
    /// RFC 5322 "From" for both emails.
    pub from_address: String,
    /// Recipient of the staff alert.
    pub staff_address: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Resend wins when `RESEND_API_KEY` is set; otherwise SMTP is used when
    /// `SMTP_HOST` is set. Returns `None` when neither is present, signalling
    /// that email delivery is not configured.
    ///
    /// | Variable          | Required | Default                          |
    /// |-------------------|----------|----------------------------------|
    /// | `RESEND_API_KEY`  | one of   | -                                |
    /// | `RESEND_API_URL`  | no       | `https://api.resend.com/emails`  |
    /// | `SMTP_HOST`       | one of   | -                                |
    /// | `SMTP_PORT`       | no       | `587`                            |
    /// | `SMTP_USER`       | no       | -                                |
    /// | `SMTP_PASSWORD`   | no       | -                                |
    /// | `BOOKINGS_FROM`   | no       | `HD Trade Services <bookings@..>`|
    /// | `STAFF_EMAIL`     | no       | `admin@hdtradeservices.com.au`   |
    pub fn from_env() -> Option<Self> {
        let provider = if let Ok(api_key) = std::env::var("RESEND_API_KEY") {
            ProviderConfig::Resend {
                api_key,
                api_url: std::env::var("RESEND_API_URL")
                    .unwrap_or_else(|_| DEFAULT_RESEND_API_URL.to_string()),
            }
        } else {
            ProviderConfig::Smtp {
                host: std::env::var("SMTP_HOST").ok()?,
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_SMTP_PORT),
                user: std::env::var("SMTP_USER").ok(),
                password: std::env::var("SMTP_PASSWORD").ok(),
            }
        };

        Some(Self {
            provider,
            from_address: std::env::var("BOOKINGS_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            staff_address: std::env::var("STAFF_EMAIL")
                .unwrap_or_else(|_| DEFAULT_STAFF_ADDRESS.to_string()),
        })
    }
}
