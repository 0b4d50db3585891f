//! Boost program models.

use serde::Serialize;
use sqlx::FromRow;

use boostline_core::types::{DbId, Timestamp};

/// A row from the `boost_programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BoostProgram {
    pub id: DbId,
    pub title: String,
    pub status: String,
    pub tiers_enabled: bool,
    pub auto_tier_progression: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
