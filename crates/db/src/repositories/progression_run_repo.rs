//! Repository for the `progression_runs` marker table.

use sqlx::PgConnection;

use boostline_core::period::EvaluationPeriod;
use boostline_core::types::DbId;

/// Run-once markers for the monthly batch.
///
/// A marker claims one (program, period) pair. The claim, the pass's
/// mutations, and [`ProgressionRunRepo::complete`] all share one
/// transaction, so a marker row exists only for passes that committed:
/// a failed pass rolls its marker back and the program is picked up
/// again on the next invocation.
pub struct ProgressionRunRepo;

impl ProgressionRunRepo {
    /// Claim the (program, period) pair. Returns `true` when this call
    /// inserted the marker and therefore owns the run; `false` when the
    /// period was already processed.
    pub async fn try_begin(
        conn: &mut PgConnection,
        program_id: DbId,
        period: EvaluationPeriod,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO progression_runs (program_id, period_year, period_month) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (program_id, period_year, period_month) DO NOTHING",
        )
        .bind(program_id)
        .bind(period.year)
        .bind(period.month)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record the processed count and completion time on a claimed
    /// marker.
    pub async fn complete(
        conn: &mut PgConnection,
        program_id: DbId,
        period: EvaluationPeriod,
        processed: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE progression_runs \
             SET processed = $1, completed_at = NOW(), updated_at = NOW() \
             WHERE program_id = $2 AND period_year = $3 AND period_month = $4",
        )
        .bind(processed)
        .bind(program_id)
        .bind(period.year)
        .bind(period.month)
        .execute(conn)
        .await?;
        Ok(())
    }
}
