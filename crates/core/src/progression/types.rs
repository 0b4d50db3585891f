//! Tier-progression domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

use super::criteria::{DemotionCriteria, PromotionCriteria};

/// One rung of a program's compensation ladder, ordered by `level`.
///
/// `monthly_retainer` and `videos_per_month` are informational; the
/// evaluator decides on the criteria fields only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tier {
    pub id: DbId,
    pub program_id: DbId,
    pub name: String,
    pub level: i32,
    pub monthly_retainer: f64,
    pub videos_per_month: i32,
    pub promotion_criteria: PromotionCriteria,
    pub demotion_criteria: DemotionCriteria,
    pub is_entry_tier: bool,
}

/// A creator's current tier placement within a program.
///
/// `tier_id` always references a tier belonging to `program_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierAssignment {
    pub id: DbId,
    pub program_id: DbId,
    pub creator_id: DbId,
    pub tier_id: DbId,
    pub months_in_tier: i32,
    pub tier_start_date: NaiveDate,
}

/// A creator's observed performance for one calendar month in one
/// program. At most one record exists per (creator, program, period);
/// absence of a record means no activity and counts as a missed quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodMetrics {
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
}

/// The action the evaluator decided for one creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierAction {
    Promote,
    Demote,
    Warning,
    Maintain,
}

impl TierAction {
    /// Stable string form, used in history rows and run summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            TierAction::Promote => "promote",
            TierAction::Demote => "demote",
            TierAction::Warning => "warning",
            TierAction::Maintain => "maintain",
        }
    }
}

/// Copy of the metrics a decision was based on, kept for audit.
///
/// `months_in_tier` includes the period just evaluated. The remaining
/// fields are absent when no metrics record existed for the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    pub months_in_tier: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos_submitted: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos_approved: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_views: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_earned: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_met: Option<bool>,
}

impl PerformanceSnapshot {
    /// Snapshot for a period with no metrics record: tenure only.
    pub fn tenure_only(months_in_tier: i32) -> Self {
        Self {
            months_in_tier,
            videos_submitted: None,
            videos_approved: None,
            completion_rate: None,
            avg_views: None,
            engagement_rate: None,
            total_earned: None,
            quota_met: None,
        }
    }

    /// Snapshot populated from a metrics record.
    pub fn from_metrics(months_in_tier: i32, metrics: &PeriodMetrics) -> Self {
        Self {
            months_in_tier,
            videos_submitted: Some(metrics.videos_submitted),
            videos_approved: Some(metrics.videos_approved),
            completion_rate: Some(metrics.completion_rate),
            avg_views: Some(metrics.avg_views_per_video),
            engagement_rate: Some(metrics.engagement_rate),
            total_earned: Some(metrics.total_earnings),
            quota_met: Some(metrics.quota_met),
        }
    }
}

/// Which criteria passed and which failed, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaEvaluation {
    pub met_criteria: Vec<String>,
    pub failed_criteria: Vec<String>,
}

/// The evaluator's decision for one creator plus its justification.
///
/// Pure output: the batch runner translates it into an assignment
/// update and an optional history append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub creator_id: DbId,
    pub current_tier_id: DbId,
    /// Set only for promote/demote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_tier_id: Option<DbId>,
    pub action: TierAction,
    pub reason: String,
    pub performance_snapshot: PerformanceSnapshot,
    pub criteria_evaluation: CriteriaEvaluation,
}
