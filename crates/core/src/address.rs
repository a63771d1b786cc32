//! Address autocomplete boundary.
//!
//! The places-autocomplete widget is an opaque collaborator. When it errors
//! or is too slow the form drops to manual free-text entry; this is a mode
//! switch, not an error the user sees.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::form::BookingForm;

/// How long suggestions may take before the form gives up on them.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);

/// Returns candidate formatted addresses for partial input.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn suggest(&self, partial: &str) -> Result<Vec<String>, CoreError>;
}

/// Fetch suggestions for `partial`, falling back to manual entry on failure.
///
/// Returns an empty list both when the lookup legitimately has nothing and
/// when it failed; in the latter case `form` is switched to manual entry.
pub async fn lookup_addresses(
    lookup: &dyn AddressLookup,
    form: &mut BookingForm,
    partial: &str,
    timeout: Duration,
) -> Vec<String> {
    if form.draft().manual_entry {
        return Vec::new();
    }

    match tokio::time::timeout(timeout, lookup.suggest(partial)).await {
        Ok(Ok(suggestions)) => suggestions,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Address lookup failed, switching to manual entry");
            form.enable_manual_entry();
            Vec::new()
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                "Address lookup timed out, switching to manual entry"
            );
            form.enable_manual_entry();
            Vec::new()
        }
    }
}
