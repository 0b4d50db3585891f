//! Repository for the `boost_programs` table.

use sqlx::PgPool;

use boostline_core::types::DbId;

use crate::models::program::BoostProgram;

/// Column list for `boost_programs` queries.
const COLUMNS: &str =
    "id, title, status, tiers_enabled, auto_tier_progression, created_at, updated_at";

/// Provides read operations for boost programs.
pub struct ProgramRepo;

impl ProgramRepo {
    /// List programs eligible for automatic tier progression: tiers
    /// enabled, auto-progression enabled, and status active or paused.
    pub async fn list_auto_progression(pool: &PgPool) -> Result<Vec<BoostProgram>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM boost_programs \
             WHERE tiers_enabled = TRUE \
               AND auto_tier_progression = TRUE \
               AND status IN ('active', 'paused') \
             ORDER BY id"
        );
        sqlx::query_as::<_, BoostProgram>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a program by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BoostProgram>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boost_programs WHERE id = $1");
        sqlx::query_as::<_, BoostProgram>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
