//! Repository for tier changes: the assignment update plus the
//! append-only `tier_change_history` record.

use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use boostline_core::progression::types::EvaluationResult;
use boostline_core::types::DbId;

use crate::models::tier_change::TierChangeRecord;

/// Column list for `tier_change_history` queries.
const COLUMNS: &str = "id, program_id, creator_id, from_tier_id, to_tier_id, \
    change_type, change_reason, performance_snapshot, criteria_evaluation, \
    created_at, updated_at";

/// Applies and reads audited tier changes.
pub struct TierChangeRepo;

impl TierChangeRepo {
    /// Apply a promote/demote decision: move the assignment to
    /// `new_tier_id` (resetting tenure and stamping the reason) and
    /// append the history record. Runs on the program pass's
    /// transaction connection; a partial application would leave an
    /// un-auditable tier change, so the caller must not commit between
    /// the two writes.
    pub async fn apply_change(
        conn: &mut PgConnection,
        assignment_id: DbId,
        program_id: DbId,
        new_tier_id: DbId,
        assignment_reason: &str,
        evaluation: &EvaluationResult,
    ) -> Result<TierChangeRecord, sqlx::Error> {
        sqlx::query(
            "UPDATE tier_assignments \
             SET tier_id = $1, \
                 previous_tier_id = tier_id, \
                 assignment_reason = $2, \
                 months_in_tier = 0, \
                 tier_start_date = CURRENT_DATE, \
                 updated_at = NOW() \
             WHERE id = $3",
        )
        .bind(new_tier_id)
        .bind(assignment_reason)
        .bind(assignment_id)
        .execute(&mut *conn)
        .await?;

        let query = format!(
            "INSERT INTO tier_change_history \
                (program_id, creator_id, from_tier_id, to_tier_id, change_type, \
                 change_reason, performance_snapshot, criteria_evaluation) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TierChangeRecord>(&query)
            .bind(program_id)
            .bind(evaluation.creator_id)
            .bind(evaluation.current_tier_id)
            .bind(new_tier_id)
            .bind(evaluation.action.as_str())
            .bind(&evaluation.reason)
            .bind(Json(&evaluation.performance_snapshot))
            .bind(Json(&evaluation.criteria_evaluation))
            .fetch_one(conn)
            .await
    }

    /// List a program's tier change history, newest first.
    pub async fn list_for_program(
        pool: &PgPool,
        program_id: DbId,
    ) -> Result<Vec<TierChangeRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tier_change_history \
             WHERE program_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, TierChangeRecord>(&query)
            .bind(program_id)
            .fetch_all(pool)
            .await
    }
}
