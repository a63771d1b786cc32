//! Field rules and the per-field error map used by the booking form.

pub mod errors;
pub mod rules;

pub use errors::ValidationErrors;
pub use rules::{check_field, required_message};
