//! Booking form session: draft, per-field errors and derived UI state.
//!
//! [`BookingForm`] is a pure state machine. Field changes clear that field's
//! error immediately; errors are only re-computed on blur
//! ([`BookingForm::blur_field`]) or on a submit attempt
//! ([`BookingForm::validate_form`]). Errors are displayed only for fields the
//! user has left or after the first submit attempt, so a pristine form never
//! shows red text.

use std::collections::HashSet;
use std::str::FromStr;


use crate::booking::{
    parse_iso_date, AttachedFile, BookingDraft, DateType, PreferredTime, Urgency,
};
use crate::error::CoreError;
use crate::submission::SubmissionState;
use crate::validation::rules::{
    self, FIELD_ADDRESS, FIELD_EMAIL, FIELD_NAME, FIELD_PHONE, FIELD_SERVICES,
    FIELD_TERMS_ACCEPTED, NO_SERVICES_MESSAGE, TERMS_MESSAGE,
};
use crate::validation::ValidationErrors;

/// Prefix of checkbox names that toggle a service, e.g. `services.Hot Water Systems`.
const SERVICE_FIELD_PREFIX: &str = "services.";

// ---------------------------------------------------------------------------
// Field addressing
// ---------------------------------------------------------------------------

/// An editable form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Address,
    ManualEntry,
    /// One checkbox of the services group.
    Service(String),
    PreferredTime,
    Urgency,
    PreferredDate,
    PreferredDateRange,
    Message,
    Newsletter,
    TermsAccepted,
}

impl Field {
    /// Key under which this field's error is stored. All service checkboxes
    /// share the `services` key.
    pub fn error_key(&self) -> &'static str {
        match self {
            Field::Name => FIELD_NAME,
            Field::Email => FIELD_EMAIL,
            Field::Phone => FIELD_PHONE,
            Field::Address => FIELD_ADDRESS,
            Field::ManualEntry => "manualEntry",
            Field::Service(_) => FIELD_SERVICES,
            Field::PreferredTime => "preferredTime",
            Field::Urgency => "urgency",
            Field::PreferredDate => "preferredDate",
            Field::PreferredDateRange => "preferredDateRange",
            Field::Message => "message",
            Field::Newsletter => "newsletter",
            Field::TermsAccepted => FIELD_TERMS_ACCEPTED,
        }
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Some(id) = name.strip_prefix(SERVICE_FIELD_PREFIX) {
            if id.is_empty() {
                return Err(CoreError::Validation("Empty service identifier".into()));
            }
            return Ok(Field::Service(id.to_string()));
        }

        Ok(match name {
            "name" => Field::Name,
            "email" => Field::Email,
            "phone" => Field::Phone,
            "address" => Field::Address,
            "manualEntry" => Field::ManualEntry,
            "preferredTime" => Field::PreferredTime,
            "urgency" => Field::Urgency,
            "preferredDate" => Field::PreferredDate,
            "preferredDateRange" => Field::PreferredDateRange,
            "message" => Field::Message,
            "newsletter" => Field::Newsletter,
            "termsAccepted" => Field::TermsAccepted,
            other => return Err(CoreError::Validation(format!("Unknown field '{other}'"))),
        })
    }
}

/// New value for a field: text inputs carry text, checkboxes carry a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

/// Dropdown panels of the form. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dropdown {
    Services,
    Time,
    Urgency,
    Date,
}

// ---------------------------------------------------------------------------
// BookingForm
// ---------------------------------------------------------------------------

/// One booking form session.
#[derive(Debug, Clone)]
pub struct BookingForm {
    draft: BookingDraft,
    errors: ValidationErrors,
    touched: HashSet<&'static str>,
    has_attempted_submit: bool,
    state: SubmissionState,
    show_thank_you: bool,
    open_dropdown: Option<Dropdown>,
    expanded_categories: HashSet<String>,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::from_draft(BookingDraft::default())
    }
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from an already populated draft (e.g. a JSON body).
    ///
    /// The draft's date fields are normalized so a date and a range are never
    /// both kept.
    pub fn from_draft(mut draft: BookingDraft) -> Self {
        draft.normalize_dates();
        Self {
            draft,
            errors: ValidationErrors::new(),
            touched: HashSet::new(),
            has_attempted_submit: false,
            state: SubmissionState::Idle,
            show_thank_you: false,
            open_dropdown: None,
            expanded_categories: HashSet::new(),
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn show_thank_you(&self) -> bool {
        self.show_thank_you
    }

    pub fn has_attempted_submit(&self) -> bool {
        self.has_attempted_submit
    }

    // -- editing ------------------------------------------------------------

    /// Set a field and clear its error. No validation happens here.
    ///
    /// The error is cleared before the value is interpreted, so a malformed
    /// value (wrong kind, unknown dropdown label, unparseable date) still
    /// clears the stale message; the draft is left unchanged in that case.
    pub fn update_field(&mut self, field: Field, value: FieldValue) -> Result<(), CoreError> {
        self.errors.clear(field.error_key());

        match (field, value) {
            (Field::Name, FieldValue::Text(v)) => self.draft.name = v,
            (Field::Email, FieldValue::Text(v)) => self.draft.email = v,
            (Field::Phone, FieldValue::Text(v)) => self.draft.phone = v,
            (Field::Address, FieldValue::Text(v)) => self.draft.address = v,
            (Field::Message, FieldValue::Text(v)) => self.draft.message = v,
            (Field::ManualEntry, FieldValue::Flag(v)) => self.draft.manual_entry = v,
            (Field::Newsletter, FieldValue::Flag(v)) => self.draft.newsletter = v,
            (Field::TermsAccepted, FieldValue::Flag(v)) => self.draft.terms_accepted = v,
            (Field::Service(id), FieldValue::Flag(checked)) => self.set_service(id, checked),
            (Field::PreferredTime, FieldValue::Text(v)) => {
                self.draft.preferred_time = if v.is_empty() {
                    None
                } else {
                    Some(v.parse::<PreferredTime>()?)
                };
            }
            (Field::Urgency, FieldValue::Text(v)) => {
                self.draft.urgency = if v.is_empty() {
                    None
                } else {
                    Some(v.parse::<Urgency>()?)
                };
            }
            (Field::PreferredDate, FieldValue::Text(v)) => self.set_preferred_date(&v)?,
            (Field::PreferredDateRange, FieldValue::Text(v)) => self.set_preferred_range(v),
            (field, value) => {
                return Err(CoreError::Validation(format!(
                    "Field '{}' does not accept {:?}",
                    field.error_key(),
                    value
                )));
            }
        }
        Ok(())
    }

    /// Flip membership of one service.
    pub fn toggle_service(&mut self, id: &str) {
        self.errors.clear(FIELD_SERVICES);
        let checked = !self.draft.services.contains(id);
        self.set_service(id.to_string(), checked);
    }

    /// Replace the attached file list.
    pub fn attach_files(&mut self, files: Vec<AttachedFile>) {
        self.draft.files = files;
    }

    /// Switch to free-text address entry, e.g. because the address lookup
    /// failed to load or the user opted out of suggestions.
    pub fn enable_manual_entry(&mut self) {
        self.errors.clear(FIELD_ADDRESS);
        self.draft.manual_entry = true;
    }

    fn set_service(&mut self, id: String, checked: bool) {
        if checked {
            self.draft.services.insert(id);
        } else {
            self.draft.services.shift_remove(&id);
        }
    }

    fn set_preferred_date(&mut self, value: &str) -> Result<(), CoreError> {
        let value = value.trim();
        if value.is_empty() {
            self.draft.preferred_date = None;
            if self.draft.preferred_date_type == Some(DateType::Specific) {
                self.draft.preferred_date_type = None;
            }
            return Ok(());
        }

        let date = parse_iso_date(value)?;
        self.draft.preferred_date = Some(date);
        self.draft.preferred_date_type = Some(DateType::Specific);
        self.draft.preferred_date_range = None;
        Ok(())
    }

    fn set_preferred_range(&mut self, value: String) {
        if value.trim().is_empty() {
            self.draft.preferred_date_range = None;
            if self.draft.preferred_date_type == Some(DateType::Range) {
                self.draft.preferred_date_type = None;
            }
            return;
        }

        self.draft.preferred_date_range = Some(value);
        self.draft.preferred_date_type = Some(DateType::Range);
        self.draft.preferred_date = None;
    }

    // -- validation ---------------------------------------------------------

    /// Check `value` against the rules for `field` and record a failure.
    ///
    /// Success does not clear an existing entry; that already happened when
    /// the value changed.
    pub fn validate_field(&mut self, field: &str, value: &str) -> bool {
        match rules::check_field(field, value) {
            Ok(()) => true,
            Err(message) => {
                self.errors.set(field, message);
                false
            }
        }
    }

    /// The user left `field`: mark it touched and validate its current value.
    ///
    /// Only the required text fields carry rules; other fields are just
    /// marked touched.
    pub fn blur_field(&mut self, field: &Field) -> bool {
        let key = field.error_key();
        self.touched.insert(key);

        let value = match field {
            Field::Name => self.draft.name.clone(),
            Field::Email => self.draft.email.clone(),
            Field::Phone => self.draft.phone.clone(),
            Field::Address => self.draft.address.clone(),
            _ => return true,
        };
        self.validate_field(key, &value)
    }

    /// Whole-form gate run before any submission.
    ///
    /// Every check runs so that all failing fields get a message.
    pub fn validate_form(&mut self) -> bool {
        let mut text_fields = vec![
            (FIELD_NAME, self.draft.name.clone()),
            (FIELD_PHONE, self.draft.phone.clone()),
            (FIELD_EMAIL, self.draft.email.clone()),
        ];
        if !self.draft.manual_entry {
            text_fields.push((FIELD_ADDRESS, self.draft.address.clone()));
        }

        let mut is_valid = true;
        for (field, value) in &text_fields {
            if !self.validate_field(field, value) {
                is_valid = false;
            }
        }

        if self.draft.services.is_empty() {
            self.errors.set(FIELD_SERVICES, NO_SERVICES_MESSAGE);
            is_valid = false;
        }

        if !self.draft.terms_accepted {
            self.errors.set(FIELD_TERMS_ACCEPTED, TERMS_MESSAGE);
            is_valid = false;
        }

        is_valid
    }

    pub fn mark_submit_attempted(&mut self) {
        self.has_attempted_submit = true;
    }

    /// Error to display next to `field`, if it should be shown yet.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.has_attempted_submit || self.touched.contains(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    // -- lifecycle ----------------------------------------------------------

    /// Restore the draft to its initial values and forget errors and
    /// interaction history. A fresh submission key is minted.
    pub fn reset_draft(&mut self) {
        self.draft = BookingDraft::default();
        self.errors.clear_all();
        self.touched.clear();
        self.has_attempted_submit = false;
        self.open_dropdown = None;
    }

    /// Leave the thank-you view and return to an empty, idle form.
    pub fn dismiss_thank_you(&mut self) {
        self.show_thank_you = false;
        self.state = SubmissionState::Idle;
        self.reset_draft();
    }

    pub(crate) fn begin_submission(&mut self) {
        self.state = SubmissionState::Submitting;
        self.show_thank_you = false;
    }

    pub(crate) fn fail_submission(&mut self) {
        self.state = SubmissionState::Error;
    }

    pub(crate) fn complete_submission(&mut self) {
        self.state = SubmissionState::Success;
        self.reset_draft();
        self.show_thank_you = true;
    }

    // -- derived UI state ---------------------------------------------------

    /// Open `dropdown`, or close it if it is already open.
    pub fn toggle_dropdown(&mut self, dropdown: Dropdown) {
        self.open_dropdown = if self.open_dropdown == Some(dropdown) {
            None
        } else {
            Some(dropdown)
        };
    }

    /// A click landed outside every dropdown.
    pub fn close_dropdowns(&mut self) {
        self.open_dropdown = None;
    }

    pub fn is_open(&self, dropdown: Dropdown) -> bool {
        self.open_dropdown == Some(dropdown)
    }

    pub fn toggle_category(&mut self, category: &str) {
        if !self.expanded_categories.remove(category) {
            self.expanded_categories.insert(category.to_string());
        }
    }

    pub fn is_category_expanded(&self, category: &str) -> bool {
        self.expanded_categories.contains(category)
    }

    /// Placeholder text of the services dropdown.
    pub fn services_summary(&self) -> String {
        match self.draft.services.len() {
            0 => "Services Required".to_string(),
            1 => "1 service selected".to_string(),
            n => format!("{n} services selected"),
        }
    }

    pub fn file_count(&self) -> usize {
        self.draft.files.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
