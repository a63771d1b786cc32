//! Repository for the `bookings` table.

use sqlx::PgPool;
use uuid::Uuid;

use hdtrades_core::booking::NewBooking;

use crate::models::booking::Booking;

/// Column list for `bookings` queries.
const COLUMNS: &str = "\
    id, created_at, name, email, phone, address, services, \
    preferred_time, urgency, preferred_date, preferred_date_type, \
    preferred_date_range, message, newsletter, terms_accepted, \
    status, idempotency_key";

/// Name of the unique constraint guarding against double submission.
pub const IDEMPOTENCY_CONSTRAINT: &str = "uq_bookings_idempotency_key";

/// Insert and lookup operations for bookings. Rows are never updated here.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking snapshot, returning the full row.
    pub async fn create(pool: &PgPool, input: &NewBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings \
                (created_at, name, email, phone, address, services, \
                 preferred_time, urgency, preferred_date, preferred_date_type, \
                 preferred_date_range, message, newsletter, terms_accepted, \
                 status, idempotency_key) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.created_at)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.services)
            .bind(&input.preferred_time)
            .bind(&input.urgency)
            .bind(input.preferred_date)
            .bind(&input.preferred_date_type)
            .bind(&input.preferred_date_range)
            .bind(&input.message)
            .bind(input.newsletter)
            .bind(input.terms_accepted)
            .bind(&input.status)
            .bind(input.idempotency_key)
            .fetch_one(pool)
            .await
    }

    /// Find the booking created for a given submission key.
    pub async fn find_by_idempotency_key(
        pool: &PgPool,
        key: Uuid,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE idempotency_key = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }
}
