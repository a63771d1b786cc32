pub mod bookings;
pub mod send_email;
