//! Repository for the `tier_assignments` table.

use sqlx::PgConnection;

use boostline_core::progression::types::TierAssignment;
use boostline_core::types::DbId;

use crate::models::assignment::TierAssignmentRow;

/// Column list for `tier_assignments` queries.
const COLUMNS: &str = "id, program_id, creator_id, tier_id, previous_tier_id, \
    assignment_reason, months_in_tier, tier_start_date, created_at, updated_at";

/// Provides operations for creator tier assignments.
///
/// Methods take the program pass's transaction connection, so every
/// read and write of one pass commits or rolls back together.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// List all assignments for a program, mapped into the core domain
    /// type.
    pub async fn list_for_program(
        conn: &mut PgConnection,
        program_id: DbId,
    ) -> Result<Vec<TierAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tier_assignments \
             WHERE program_id = $1 \
             ORDER BY id"
        );
        let rows = sqlx::query_as::<_, TierAssignmentRow>(&query)
            .bind(program_id)
            .fetch_all(conn)
            .await?;
        Ok(rows
            .into_iter()
            .map(TierAssignmentRow::into_domain)
            .collect())
    }

    /// Add the evaluated period to the creator's tenure. Used for
    /// maintain outcomes, which leave the tier untouched.
    pub async fn increment_months_in_tier(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE tier_assignments \
             SET months_in_tier = months_in_tier + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Apply a warning outcome: flag the period's metrics row (when one
    /// exists) and increment tenure. Atomicity comes from the caller's
    /// transaction.
    pub async fn record_warning(
        conn: &mut PgConnection,
        id: DbId,
        metrics_id: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        if let Some(metrics_id) = metrics_id {
            sqlx::query(
                "UPDATE creator_period_metrics \
                 SET demotion_warning = TRUE, updated_at = NOW() \
                 WHERE id = $1",
            )
            .bind(metrics_id)
            .execute(&mut *conn)
            .await?;
        }

        sqlx::query(
            "UPDATE tier_assignments \
             SET months_in_tier = months_in_tier + 1, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;

        Ok(())
    }
}
