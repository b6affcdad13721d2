//! Pure domain logic for the Sarathi booking platform.
//!
//! This crate has zero internal dependencies and performs no I/O, so it can
//! be used by the store, the service layer, and any future worker or CLI
//! tooling alike. Persistence, payment, and HTTP concerns live elsewhere.

pub mod availability;
pub mod booking;
pub mod course;
pub mod error;
pub mod form;
pub mod localization;
pub mod types;
