//! Booking pipeline domain logic for HD Trade Services.
//!
//! Everything in this crate is free of network and database access. The
//! collaborators that do perform I/O (the booking store, the email notifier,
//! the address lookup) are expressed as traits and implemented by the
//! `hdtrades-db` and `hdtrades-notify` crates.

pub mod address;
pub mod booking;
pub mod error;
pub mod form;
pub mod submission;
pub mod types;
pub mod validation;
