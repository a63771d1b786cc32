//! Booking entity model.

use chrono::NaiveDate;
use hdtrades_core::booking::BookingRecord;
use hdtrades_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
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

impl From<Booking> for BookingRecord {
    fn from(row: Booking) -> Self {
        Self {
            id: row.id,
            created_at: row.created_at,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            services: row.services,
            preferred_time: row.preferred_time,
            urgency: row.urgency,
            preferred_date: row.preferred_date,
            preferred_date_type: row.preferred_date_type,
            preferred_date_range: row.preferred_date_range,
            message: row.message,
            newsletter: row.newsletter,
            terms_accepted: row.terms_accepted,
            status: row.status,
            idempotency_key: row.idempotency_key,
        }
    }
}
