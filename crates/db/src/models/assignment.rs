//! Tier assignment models.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use boostline_core::progression::types::TierAssignment;
use boostline_core::types::{DbId, Timestamp};

/// A row from the `tier_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TierAssignmentRow {
    pub id: DbId,
    pub program_id: DbId,
    pub creator_id: DbId,
    pub tier_id: DbId,
    pub previous_tier_id: Option<DbId>,
    pub assignment_reason: Option<String>,
    pub months_in_tier: i32,
    pub tier_start_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TierAssignmentRow {
    /// Convert into the core domain type consumed by the evaluator.
    pub fn into_domain(self) -> TierAssignment {
        TierAssignment {
            id: self.id,
            program_id: self.program_id,
            creator_id: self.creator_id,
            tier_id: self.tier_id,
            months_in_tier: self.months_in_tier,
            tier_start_date: self.tier_start_date,
        }
    }
}
