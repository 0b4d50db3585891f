//! Repository for the `creator_period_metrics` table.

use sqlx::PgConnection;

use boostline_core::period::EvaluationPeriod;
use boostline_core::progression::types::PeriodMetrics;
use boostline_core::types::DbId;

use crate::models::metrics::PeriodMetricsRow;

/// Column list for `creator_period_metrics` queries.
const COLUMNS: &str = "id, program_id, creator_id, period_year, period_month, \
    videos_submitted, videos_approved, completion_rate, avg_views_per_video, \
    engagement_rate, total_earnings, quota_met, demotion_warning, created_at, updated_at";

/// Provides read operations for monthly creator metrics.
pub struct MetricsRepo;

impl MetricsRepo {
    /// List all metrics rows for one program and evaluation period,
    /// mapped into the core domain type. At most one row exists per
    /// creator.
    pub async fn list_for_period(
        conn: &mut PgConnection,
        program_id: DbId,
        period: EvaluationPeriod,
    ) -> Result<Vec<PeriodMetrics>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM creator_period_metrics \
             WHERE program_id = $1 AND period_year = $2 AND period_month = $3 \
             ORDER BY creator_id"
        );
        let rows = sqlx::query_as::<_, PeriodMetricsRow>(&query)
            .bind(program_id)
            .bind(period.year)
            .bind(period.month)
            .fetch_all(conn)
            .await?;
        Ok(rows
            .into_iter()
            .map(PeriodMetricsRow::into_domain)
            .collect())
    }
}
