//! Booking draft, snapshot and record types.
//!
//! A [`BookingDraft`] is the mutable form data for one booking attempt. At
//! submit time it is frozen into a [`NewBooking`] for the store and a
//! [`BookingNotice`] for the email notifier.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Status of every newly created booking record.
pub const STATUS_PENDING: &str = "pending";

// ---------------------------------------------------------------------------
// Enumerated choices
// ---------------------------------------------------------------------------

/// Preferred visit window offered in the time dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreferredTime {
    #[serde(rename = "Morning (7am - 12pm)")]
    Morning,
    #[serde(rename = "Afternoon (12pm - 5pm)")]
    Afternoon,
    #[serde(rename = "Evening (5pm - 8pm)")]
    Evening,
    #[serde(rename = "Anytime")]
    Anytime,
}

impl PreferredTime {
    pub const ALL: [PreferredTime; 4] = [
        PreferredTime::Morning,
        PreferredTime::Afternoon,
        PreferredTime::Evening,
        PreferredTime::Anytime,
    ];

    /// Display label, also used as the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            PreferredTime::Morning => "Morning (7am - 12pm)",
            PreferredTime::Afternoon => "Afternoon (12pm - 5pm)",
            PreferredTime::Evening => "Evening (5pm - 8pm)",
            PreferredTime::Anytime => "Anytime",
        }
    }
}

impl FromStr for PreferredTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown preferred time '{s}'")))
    }
}

impl fmt::Display for PreferredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How soon the customer needs the job done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    #[serde(rename = "Emergency (ASAP)")]
    Emergency,
    #[serde(rename = "Within 24 hours")]
    WithinDay,
    #[serde(rename = "Within a week")]
    WithinWeek,
    #[serde(rename = "Flexible")]
    Flexible,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [
        Urgency::Emergency,
        Urgency::WithinDay,
        Urgency::WithinWeek,
        Urgency::Flexible,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Emergency => "Emergency (ASAP)",
            Urgency::WithinDay => "Within 24 hours",
            Urgency::WithinWeek => "Within a week",
            Urgency::Flexible => "Flexible",
        }
    }
}

impl FromStr for Urgency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown urgency '{s}'")))
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the customer picked one date or a loose range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateType {
    Specific,
    Range,
}

impl DateType {
    pub fn as_str(self) -> &'static str {
        match self {
            DateType::Specific => "specific",
            DateType::Range => "range",
        }
    }
}

/// A file the customer attached to the request. Only counted and listed;
/// uploading is handled outside the booking pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedFile {
    pub name: String,
    pub size_bytes: u64,
}

// ---------------------------------------------------------------------------
// BookingDraft
// ---------------------------------------------------------------------------

/// In-progress booking form data for one form session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub manual_entry: bool,
    /// Selected service identifiers, in the order they were ticked.
    pub services: IndexSet<String>,
    pub preferred_time: Option<PreferredTime>,
    pub urgency: Option<Urgency>,
    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp such as
    /// `2026-11-02T00:00:00.000Z`; only the calendar day is kept.
    #[serde(deserialize_with = "deserialize_iso_date")]
    pub preferred_date: Option<NaiveDate>,
    pub preferred_date_type: Option<DateType>,
    pub preferred_date_range: Option<String>,
    pub message: String,
    pub files: Vec<AttachedFile>,
    pub newsletter: bool,
    pub terms_accepted: bool,
    /// Idempotency token for this draft. Retries of the same draft reuse it;
    /// a reset mints a new one.
    pub submission_key: Uuid,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            manual_entry: false,
            services: IndexSet::new(),
            preferred_time: None,
            urgency: None,
            preferred_date: None,
            preferred_date_type: None,
            preferred_date_range: None,
            message: String::new(),
            files: Vec::new(),
            newsletter: true,
            terms_accepted: false,
            submission_key: Uuid::new_v4(),
        }
    }
}

impl BookingDraft {
    /// True when every user-editable field holds its initial value.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.address.is_empty()
            && !self.manual_entry
            && self.services.is_empty()
            && self.preferred_time.is_none()
            && self.urgency.is_none()
            && self.preferred_date.is_none()
            && self.preferred_date_type.is_none()
            && self.preferred_date_range.is_none()
            && self.message.is_empty()
            && self.files.is_empty()
            && self.newsletter
            && !self.terms_accepted
    }

    /// Leave at most one of the specific date and the range set, with the
    /// date type naming whichever remains.
    ///
    /// A non-blank range wins when the type says `range` or no date is set.
    /// Otherwise a date wins and any range is dropped. With neither, the
    /// type is cleared.
    pub fn normalize_dates(&mut self) {
        let range = self
            .preferred_date_range
            .take()
            .filter(|r| !r.trim().is_empty());
        let range_chosen =
            self.preferred_date_type == Some(DateType::Range) || self.preferred_date.is_none();

        match range {
            Some(range) if range_chosen => {
                self.preferred_date = None;
                self.preferred_date_range = Some(range);
                self.preferred_date_type = Some(DateType::Range);
            }
            _ if self.preferred_date.is_some() => {
                self.preferred_date_type = Some(DateType::Specific);
            }
            _ => self.preferred_date_type = None,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshots
// ---------------------------------------------------------------------------

/// Insert payload for the `bookings` table, frozen from a draft at submit time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBooking {
    pub created_at: Timestamp,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub services: Vec<String>,
    pub preferred_time: Option<String>,
    pub urgency: Option<String>,
    /// Serialised as `YYYY-MM-DD` or `null`.
    pub preferred_date: Option<NaiveDate>,
    pub preferred_date_type: String,
    pub preferred_date_range: Option<String>,
    pub message: Option<String>,
    pub newsletter: bool,
    pub terms_accepted: bool,
    pub status: String,
    pub idempotency_key: Uuid,
}

impl NewBooking {
    /// Snapshot `draft` as a pending booking created at `created_at`.
    ///
    /// The date type defaults to `specific` when the customer never touched
    /// the date picker.
    pub fn from_draft(draft: &BookingDraft, created_at: Timestamp) -> Self {
        Self {
            created_at,
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            address: draft.address.trim().to_string(),
            services: draft.services.iter().cloned().collect(),
            preferred_time: draft.preferred_time.map(|t| t.as_str().to_string()),
            urgency: draft.urgency.map(|u| u.as_str().to_string()),
            preferred_date: draft.preferred_date,
            preferred_date_type: draft
                .preferred_date_type
                .unwrap_or(DateType::Specific)
                .as_str()
                .to_string(),
            preferred_date_range: draft
                .preferred_date_range
                .clone()
                .filter(|r| !r.trim().is_empty()),
            message: non_empty(&draft.message),
            newsletter: draft.newsletter,
            terms_accepted: draft.terms_accepted,
            status: STATUS_PENDING.to_string(),
            idempotency_key: draft.submission_key,
        }
    }

    /// Snapshot `draft` with the current time.
    pub fn now(draft: &BookingDraft) -> Self {
        Self::from_draft(draft, Utc::now())
    }
}

/// A booking as stored. Never mutated by this crate after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: DbId,
    pub created_at: Timestamp,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub services: Vec<String>,
    pub preferred_time: Option<String>,
    pub urgency: Option<String>,
    pub preferred_date: Option<NaiveDate>,
    pub preferred_date_type: String,
    pub preferred_date_range: Option<String>,
    pub message: Option<String>,
    pub newsletter: bool,
    pub terms_accepted: bool,
    pub status: String,
    pub idempotency_key: Uuid,
}

/// The subset of a draft the email notifier needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingNotice {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub services: Vec<String>,
    pub preferred_time: Option<String>,
    pub message: Option<String>,
}

impl BookingNotice {
    pub fn from_draft(draft: &BookingDraft) -> Self {
        Self {
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            address: draft.address.trim().to_string(),
            services: draft.services.iter().cloned().collect(),
            preferred_time: draft.preferred_time.map(|t| t.as_str().to_string()),
            message: non_empty(&draft.message),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse a calendar day from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub(crate) fn parse_iso_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| CoreError::Validation(format!("Invalid date '{value}'")))
}

/// `null`, a missing key and a blank string all mean no date.
fn deserialize_iso_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_iso_date(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
