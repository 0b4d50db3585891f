//! Batch runner for the boostline tier-progression service.
//!
//! The library half runs one full progression pass; the binary half is
//! a one-shot entrypoint intended for cron.

pub mod progression;
