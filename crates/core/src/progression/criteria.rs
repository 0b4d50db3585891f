//! Per-tier promotion and demotion thresholds.
//!
//! Stored as JSONB on the tier row and deserialized into these structs
//! at the repository boundary, so the evaluator never sees
//! partially-shaped data.

use serde::{Deserialize, Serialize};

/// Thresholds a creator must meet or exceed to advance one level.
///
/// All comparisons are inclusive (`>=`): promotion requires meeting or
/// exceeding every threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionCriteria {
    pub min_months_active: i32,
    pub min_avg_views: f64,
    pub min_completion_rate: f64,
    pub min_engagement_rate: f64,
}

/// Thresholds below which a creator drops one level.
///
/// Comparisons are strict (`<`): demotion triggers on strictly falling
/// short of the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemotionCriteria {
    pub consecutive_missed_quotas: i32,
    pub min_completion_rate: f64,
}
