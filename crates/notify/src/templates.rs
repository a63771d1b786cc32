//! HTML bodies of the two booking emails.
//!
//! Every user-supplied value is HTML-escaped before interpolation.

use crate::request::SendEmailRequest;

pub const CUSTOMER_SUBJECT: &str = "Your Booking with HD Trade Services";
pub const STAFF_SUBJECT: &str = "New Booking Received";

/// Shown to staff when the customer left the message box empty.
pub const NO_MESSAGE: &str = "No message provided";

/// Shown when an optional summary value was not supplied.
const NOT_SPECIFIED: &str = "Not specified";

const BUSINESS_PHONE_DISPLAY: &str = "1300 889 528";
const BUSINESS_PHONE_TEL: &str = "1300889528";

/// Confirmation sent to the customer.
pub fn customer_confirmation(req: &SendEmailRequest) -> String {
    format!(
        r#"<div>
  <h1>Thank you for your booking, {name}!</h1>
  <p>We've received your service request and our team will be in touch shortly to confirm your appointment.</p>
  <h2>Your Booking Details:</h2>
  <ul>
    <li><strong>Service:</strong> {services}</li>
    <li><strong>Preferred Time:</strong> {preferred_time}</li>
    <li><strong>Address:</strong> {address}</li>
  </ul>
  <p>If you need to make any changes to your booking, please contact us at <a href="tel:{BUSINESS_PHONE_TEL}">{BUSINESS_PHONE_DISPLAY}</a>.</p>
  <p>Thank you for choosing HD Trade Services!</p>
</div>"#,
        name = escape_html(&req.name),
        services = services_text(req),
        preferred_time = preferred_time_text(req),
        address = escape_html(&req.address),
    )
}

/// Alert sent to the staff inbox with every submitted detail.
pub fn staff_alert(req: &SendEmailRequest) -> String {
    let message = req
        .message
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .map(escape_html)
        .unwrap_or_else(|| NO_MESSAGE.to_string());

    format!(
        r#"<div>
  <h1>New Booking Received</h1>
  <h2>Customer Details:</h2>
  <ul>
    <li><strong>Name:</strong> {name}</li>
    <li><strong>Email:</strong> {email}</li>
    <li><strong>Phone:</strong> {phone}</li>
    <li><strong>Address:</strong> {address}</li>
    <li><strong>Service:</strong> {services}</li>
    <li><strong>Preferred Time:</strong> {preferred_time}</li>
    <li><strong>Message:</strong> {message}</li>
  </ul>
</div>"#,
        name = escape_html(&req.name),
        email = escape_html(&req.email),
        phone = escape_html(&req.phone),
        address = escape_html(&req.address),
        services = services_text(req),
        preferred_time = preferred_time_text(req),
    )
}

fn services_text(req: &SendEmailRequest) -> String {
    req.services
        .as_ref()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
        .map(|s| escape_html(&s))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn preferred_time_text(req: &SendEmailRequest) -> String {
    req.preferred_time
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(escape_html)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
