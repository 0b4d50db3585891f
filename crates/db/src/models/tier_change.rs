//! Tier change history models.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use boostline_core::progression::types::{CriteriaEvaluation, PerformanceSnapshot};
use boostline_core::types::{DbId, Timestamp};

/// A row from the append-only `tier_change_history` table.
///
/// One record per promote/demote action; never mutated or deleted by
/// the progression run.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TierChangeRecord {
    pub id: DbId,
    pub program_id: DbId,
    pub creator_id: DbId,
    pub from_tier_id: DbId,
    pub to_tier_id: DbId,
    pub change_type: String,
    pub change_reason: String,
    pub performance_snapshot: Json<PerformanceSnapshot>,
    pub criteria_evaluation: Json<CriteriaEvaluation>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
