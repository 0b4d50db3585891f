//! Progression run marker models.

use serde::Serialize;
use sqlx::FromRow;

use boostline_core::types::{DbId, Timestamp};

/// A row from the `progression_runs` table.
///
/// One marker per (program, period); its unique constraint is what
/// makes the monthly batch safe to re-invoke.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressionRun {
    pub id: DbId,
    pub program_id: DbId,
    pub period_year: i32,
    pub period_month: i32,
    pub processed: i32,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
