//! Repository for the `program_tiers` table.

use sqlx::PgConnection;

use boostline_core::progression::types::Tier;
use boostline_core::types::DbId;

use crate::models::tier::TierRow;

/// Column list for `program_tiers` queries.
const COLUMNS: &str = "id, program_id, name, level, monthly_retainer, videos_per_month, \
    is_entry_tier, promotion_criteria, demotion_criteria, created_at, updated_at";

/// Provides read operations for program tier ladders.
pub struct TierRepo;

impl TierRepo {
    /// List a program's tier ladder ascending by level, mapped into the
    /// core domain type (criteria JSONB decoded here, at the store
    /// boundary).
    pub async fn list_for_program(
        conn: &mut PgConnection,
        program_id: DbId,
    ) -> Result<Vec<Tier>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM program_tiers \
             WHERE program_id = $1 \
             ORDER BY level ASC"
        );
        let rows = sqlx::query_as::<_, TierRow>(&query)
            .bind(program_id)
            .fetch_all(conn)
            .await?;
        Ok(rows.into_iter().map(TierRow::into_domain).collect())
    }
}
