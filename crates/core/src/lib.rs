//! Domain logic for the boostline tier-progression service.
//!
//! Pure types and decision logic only. Persistence and HTTP live in
//! `boostline-db` and `boostline-api`; everything here is callable
//! without a database.

pub mod error;
pub mod period;
pub mod progression;
pub mod types;
