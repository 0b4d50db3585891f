//! Program tier models.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use boostline_core::progression::criteria::{DemotionCriteria, PromotionCriteria};
use boostline_core::progression::types::Tier;
use boostline_core::types::{DbId, Timestamp};

/// A row from the `program_tiers` table.
///
/// The criteria columns are JSONB and deserialize straight into the
/// typed criteria structs, so malformed tier configuration fails at
/// the read rather than inside the evaluator.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TierRow {
    pub id: DbId,
    pub program_id: DbId,
    pub name: String,
    pub level: i32,
    pub monthly_retainer: f64,
    pub videos_per_month: i32,
    pub is_entry_tier: bool,
    pub promotion_criteria: Json<PromotionCriteria>,
    pub demotion_criteria: Json<DemotionCriteria>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TierRow {
    /// Convert into the core domain type consumed by the evaluator.
    pub fn into_domain(self) -> Tier {
        Tier {
            id: self.id,
            program_id: self.program_id,
            name: self.name,
            level: self.level,
            monthly_retainer: self.monthly_retainer,
            videos_per_month: self.videos_per_month,
            promotion_criteria: self.promotion_criteria.0,
            demotion_criteria: self.demotion_criteria.0,
            is_entry_tier: self.is_entry_tier,
        }
    }
}
