//! [`BookingStore`] backed by the `bookings` table.

use async_trait::async_trait;

use hdtrades_core::booking::{BookingRecord, NewBooking};
use hdtrades_core::submission::{BookingStore, PersistenceError};

use crate::repositories::booking_repo::IDEMPOTENCY_CONSTRAINT;
use crate::repositories::BookingRepo;
use crate::DbPool;

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres implementation of the booking store.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    /// Insert the booking. A second insert with the same idempotency key
    /// returns the row stored by the first one.
    async fn create_booking(&self, booking: &NewBooking) -> Result<BookingRecord, PersistenceError> {
        match BookingRepo::create(&self.pool, booking).await {
            Ok(row) => {
                tracing::info!(booking_id = row.id, "Booking recorded");
                Ok(row.into())
            }
            Err(e) if is_idempotency_violation(&e) => {
                let key = booking.idempotency_key;
                let existing = BookingRepo::find_by_idempotency_key(&self.pool, key)
                    .await
                    .map_err(|e| PersistenceError::Unavailable(e.to_string()))?;
                match existing {
                    Some(row) => {
                        tracing::info!(booking_id = row.id, "Booking already recorded for key");
                        Ok(row.into())
                    }
                    None => Err(PersistenceError::Duplicate(key)),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to insert booking");
                Err(PersistenceError::Unavailable(e.to_string()))
            }
        }
    }
}

fn is_idempotency_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(IDEMPOTENCY_CONSTRAINT)
        }
        _ => false,
    }
}
