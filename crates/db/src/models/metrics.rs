//! Creator period metrics models.

use serde::Serialize;
use sqlx::FromRow;

use boostline_core::progression::types::PeriodMetrics;
use boostline_core::types::{DbId, Timestamp};

/// A row from the `creator_period_metrics` table.
///
/// Written by the external metrics pipeline; the progression run only
/// reads it, except for flipping `demotion_warning` on a warning
/// outcome.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PeriodMetricsRow {
    pub id: DbId,
    pub program_id: DbId,
    pub creator_id: DbId,
    pub period_year: i32,
    pub period_month: i32,
    pub videos_submitted: i32,
    pub videos_approved: i32,
    pub completion_rate: f64,
    pub avg_views_per_video: f64,
    pub engagement_rate: f64,
    pub total_earnings: f64,
    pub quota_met: bool,
    pub demotion_warning: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PeriodMetricsRow {
    /// Convert into the core domain type consumed by the evaluator.
    pub fn into_domain(self) -> PeriodMetrics {
        PeriodMetrics {
            id: self.id,
            program_id: self.program_id,
            creator_id: self.creator_id,
            period_year: self.period_year,
            period_month: self.period_month,
            videos_submitted: self.videos_submitted,
            videos_approved: self.videos_approved,
            completion_rate: self.completion_rate,
            avg_views_per_video: self.avg_views_per_video,
            engagement_rate: self.engagement_rate,
            total_earnings: self.total_earnings,
            quota_met: self.quota_met,
            demotion_warning: self.demotion_warning,
        }
    }
}
