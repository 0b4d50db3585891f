//! Tier-progression evaluator: pure logic, no database access.
//!
//! Decision precedence, in order: missing metrics (counts as a missed
//! quota), demotion check, highest-tier check, promotion check. Once a
//! branch decides, later checks are not consulted; in particular a
//! triggered demotion check means promotion is never evaluated, even
//! when every promotion criterion would pass.

use crate::error::CoreError;
use crate::types::DbId;

use super::types::{
    CriteriaEvaluation, EvaluationResult, PerformanceSnapshot, PeriodMetrics, Tier, TierAction,
    TierAssignment,
};

/// Evaluate one creator's assignment against the prior period's metrics.
///
/// Deterministic and side-effect free: identical inputs always produce
/// an identical result, and no input is mutated. `metrics` is `None`
/// when no record exists for the evaluated period, which is a defined
/// input state rather than an error.
pub fn evaluate(
    assignment: &TierAssignment,
    current_tier: &Tier,
    all_tiers: &[Tier],
    metrics: Option<&PeriodMetrics>,
) -> Result<EvaluationResult, CoreError> {
    // The period just evaluated counts toward tenure.
    let months_in_tier = assignment.months_in_tier + 1;

    let lower_tier = tier_at_level(all_tiers, current_tier.program_id, current_tier.level - 1)?;
    let demotion = &current_tier.demotion_criteria;

    let Some(metrics) = metrics else {
        // No metrics record: the month counts as a missed quota.
        let snapshot = PerformanceSnapshot::tenure_only(months_in_tier);
        let criteria = CriteriaEvaluation {
            met_criteria: Vec::new(),
            failed_criteria: vec!["quota_met".to_string()],
        };

        if let Some(lower) = lower_tier {
            if demotion.consecutive_missed_quotas <= 1 {
                return Ok(decision(
                    assignment,
                    Some(lower.id),
                    TierAction::Demote,
                    "Missed monthly quota - no submissions".to_string(),
                    snapshot,
                    criteria,
                ));
            }
        }

        return Ok(decision(
            assignment,
            None,
            TierAction::Warning,
            "Missed monthly quota".to_string(),
            snapshot,
            criteria,
        ));
    };

    let snapshot = PerformanceSnapshot::from_metrics(months_in_tier, metrics);
    let mut met_criteria: Vec<String> = Vec::new();
    let mut failed_criteria: Vec<String> = Vec::new();

    // Demotion check runs before promotion and terminates the decision
    // when it triggers.
    if !metrics.quota_met || metrics.completion_rate < demotion.min_completion_rate {
        failed_criteria.push("completion_rate".to_string());

        // Demote only when completion is at least 20% below the floor;
        // a near miss earns a warning. Simplified check: the
        // consecutive-miss threshold is not tracked across periods.
        if let Some(lower) = lower_tier {
            if metrics.completion_rate < demotion.min_completion_rate * 0.8 {
                return Ok(decision(
                    assignment,
                    Some(lower.id),
                    TierAction::Demote,
                    format!(
                        "Completion rate ({:.0}%) significantly below minimum",
                        metrics.completion_rate * 100.0
                    ),
                    snapshot,
                    CriteriaEvaluation {
                        met_criteria,
                        failed_criteria,
                    },
                ));
            }
        }

        return Ok(decision(
            assignment,
            None,
            TierAction::Warning,
            "Below minimum completion rate".to_string(),
            snapshot,
            CriteriaEvaluation {
                met_criteria,
                failed_criteria,
            },
        ));
    }

    let Some(next_tier) =
        tier_at_level(all_tiers, current_tier.program_id, current_tier.level + 1)?
    else {
        return Ok(decision(
            assignment,
            None,
            TierAction::Maintain,
            "At highest tier".to_string(),
            snapshot,
            CriteriaEvaluation {
                met_criteria,
                failed_criteria,
            },
        ));
    };

    // Promotion criteria are always evaluated in this fixed order so
    // the audit record reads consistently.
    let promotion = &current_tier.promotion_criteria;
    record_criterion(
        &mut met_criteria,
        &mut failed_criteria,
        "min_months_active",
        months_in_tier >= promotion.min_months_active,
    );
    record_criterion(
        &mut met_criteria,
        &mut failed_criteria,
        "min_avg_views",
        metrics.avg_views_per_video >= promotion.min_avg_views,
    );
    record_criterion(
        &mut met_criteria,
        &mut failed_criteria,
        "min_completion_rate",
        metrics.completion_rate >= promotion.min_completion_rate,
    );
    record_criterion(
        &mut met_criteria,
        &mut failed_criteria,
        "min_engagement_rate",
        metrics.engagement_rate >= promotion.min_engagement_rate,
    );

    if failed_criteria.is_empty() {
        return Ok(decision(
            assignment,
            Some(next_tier.id),
            TierAction::Promote,
            "Met all promotion criteria".to_string(),
            snapshot,
            CriteriaEvaluation {
                met_criteria,
                failed_criteria,
            },
        ));
    }

    let remaining = failed_criteria.len();
    Ok(decision(
        assignment,
        None,
        TierAction::Maintain,
        format!("Did not meet all promotion criteria ({remaining} remaining)"),
        snapshot,
        CriteriaEvaluation {
            met_criteria,
            failed_criteria,
        },
    ))
}

/// Find the single tier at `level`, if any.
///
/// Zero matches is a defined state (no rung at that level). Two or more
/// matches means the ladder is misconfigured and there is no safe
/// choice, so this fails rather than silently picking one.
fn tier_at_level(
    tiers: &[Tier],
    program_id: DbId,
    level: i32,
) -> Result<Option<&Tier>, CoreError> {
    let mut matching = tiers.iter().filter(|t| t.level == level);
    let first = matching.next();
    let extra = matching.count();
    if extra > 0 {
        return Err(CoreError::InconsistentLadder {
            program_id,
            level,
            count: extra + 1,
        });
    }
    Ok(first)
}

fn record_criterion(
    met: &mut Vec<String>,
    failed: &mut Vec<String>,
    name: &str,
    passed: bool,
) {
    if passed {
        met.push(name.to_string());
    } else {
        failed.push(name.to_string());
    }
}

fn decision(
    assignment: &TierAssignment,
    new_tier_id: Option<DbId>,
    action: TierAction,
    reason: String,
    performance_snapshot: PerformanceSnapshot,
    criteria_evaluation: CriteriaEvaluation,
) -> EvaluationResult {
    EvaluationResult {
        creator_id: assignment.creator_id,
        current_tier_id: assignment.tier_id,
        new_tier_id,
        action,
        reason,
        performance_snapshot,
        criteria_evaluation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::criteria::{DemotionCriteria, PromotionCriteria};
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    const PROGRAM_ID: DbId = 10;

    fn tier(id: DbId, level: i32) -> Tier {
        Tier {
            id,
            program_id: PROGRAM_ID,
            name: format!("Tier {level}"),
            level,
            monthly_retainer: 500.0 * level as f64,
            videos_per_month: 4,
            promotion_criteria: PromotionCriteria {
                min_months_active: 2,
                min_avg_views: 10_000.0,
                min_completion_rate: 0.8,
                min_engagement_rate: 0.05,
            },
            demotion_criteria: DemotionCriteria {
                consecutive_missed_quotas: 2,
                min_completion_rate: 0.5,
            },
            is_entry_tier: level == 1,
        }
    }

    fn ladder() -> Vec<Tier> {
        vec![tier(1, 1), tier(2, 2), tier(3, 3)]
    }

    fn assignment(tier_id: DbId, months_in_tier: i32) -> TierAssignment {
        TierAssignment {
            id: 100,
            program_id: PROGRAM_ID,
            creator_id: 42,
            tier_id,
            months_in_tier,
            tier_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    fn metrics(completion_rate: f64, avg_views: f64, engagement_rate: f64, quota_met: bool) -> PeriodMetrics {
        PeriodMetrics {
            id: 7,
            program_id: PROGRAM_ID,
            creator_id: 42,
            period_year: 2025,
            period_month: 6,
            videos_submitted: 4,
            videos_approved: 4,
            completion_rate,
            avg_views_per_video: avg_views,
            engagement_rate,
            total_earnings: 1200.0,
            quota_met,
            demotion_warning: false,
        }
    }

    #[test]
    fn strong_performer_is_promoted() {
        let tiers = ladder();
        let a = assignment(2, 2);
        let m = metrics(0.95, 50_000.0, 0.08, true);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Promote);
        assert_eq!(result.new_tier_id, Some(3));
        assert_eq!(result.reason, "Met all promotion criteria");
        assert_eq!(
            result.criteria_evaluation.met_criteria,
            vec![
                "min_months_active",
                "min_avg_views",
                "min_completion_rate",
                "min_engagement_rate"
            ]
        );
        assert!(result.criteria_evaluation.failed_criteria.is_empty());
    }

    #[test]
    fn one_failed_criterion_maintains_with_count() {
        let mut tiers = ladder();
        tiers[1].promotion_criteria.min_avg_views = 60_000.0;
        let a = assignment(2, 2);
        let m = metrics(0.95, 50_000.0, 0.08, true);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Maintain);
        assert_eq!(result.new_tier_id, None);
        assert_eq!(
            result.reason,
            "Did not meet all promotion criteria (1 remaining)"
        );
        assert_eq!(
            result.criteria_evaluation.failed_criteria,
            vec!["min_avg_views"]
        );
    }

    #[test]
    fn missing_metrics_demotes_when_threshold_allows() {
        let mut tiers = ladder();
        tiers[1].demotion_criteria.consecutive_missed_quotas = 1;
        let a = assignment(2, 3);

        let result = evaluate(&a, &tiers[1], &tiers, None).unwrap();

        assert_eq!(result.action, TierAction::Demote);
        assert_eq!(result.new_tier_id, Some(1));
        assert_eq!(result.reason, "Missed monthly quota - no submissions");
        assert_eq!(result.criteria_evaluation.failed_criteria, vec!["quota_met"]);
        assert_eq!(result.performance_snapshot.months_in_tier, 4);
        assert_eq!(result.performance_snapshot.completion_rate, None);
    }

    #[test]
    fn missing_metrics_warns_when_threshold_above_one() {
        // Fixture threshold is 2, so a single missed month only warns.
        let tiers = ladder();
        let a = assignment(2, 3);

        let result = evaluate(&a, &tiers[1], &tiers, None).unwrap();

        assert_eq!(result.action, TierAction::Warning);
        assert_eq!(result.new_tier_id, None);
        assert_eq!(result.reason, "Missed monthly quota");
        assert_eq!(result.criteria_evaluation.failed_criteria, vec!["quota_met"]);
    }

    #[test]
    fn missing_metrics_at_entry_tier_warns() {
        let mut tiers = ladder();
        tiers[0].demotion_criteria.consecutive_missed_quotas = 1;
        let a = assignment(1, 0);

        // No level-0 tier exists, so even an immediate-demotion
        // threshold produces a warning.
        let result = evaluate(&a, &tiers[0], &tiers, None).unwrap();

        assert_eq!(result.action, TierAction::Warning);
        assert_eq!(result.reason, "Missed monthly quota");
    }

    #[test]
    fn severe_completion_shortfall_demotes() {
        let tiers = ladder();
        let a = assignment(2, 5);
        // Floor is 0.5; 0.35 < 0.5 * 0.8 = 0.4.
        let m = metrics(0.35, 50_000.0, 0.08, true);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Demote);
        assert_eq!(result.new_tier_id, Some(1));
        assert_eq!(
            result.reason,
            "Completion rate (35%) significantly below minimum"
        );
        assert_eq!(
            result.criteria_evaluation.failed_criteria,
            vec!["completion_rate"]
        );
    }

    #[test]
    fn mild_completion_shortfall_warns() {
        let tiers = ladder();
        let a = assignment(2, 5);
        // 0.45 is below the 0.5 floor but not below 0.4.
        let m = metrics(0.45, 50_000.0, 0.08, true);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Warning);
        assert_eq!(result.new_tier_id, None);
        assert_eq!(result.reason, "Below minimum completion rate");
    }

    #[test]
    fn severe_shortfall_at_entry_tier_warns() {
        let tiers = ladder();
        let a = assignment(1, 5);
        let m = metrics(0.2, 50_000.0, 0.08, true);

        let result = evaluate(&a, &tiers[0], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Warning);
        assert_eq!(result.reason, "Below minimum completion rate");
    }

    #[test]
    fn missed_quota_with_good_completion_still_triggers_demotion_path() {
        let tiers = ladder();
        let a = assignment(2, 5);
        // quota_met = false triggers the check even though completion
        // is above both floors, so the result is a warning.
        let m = metrics(0.9, 50_000.0, 0.08, false);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Warning);
        assert_eq!(result.reason, "Below minimum completion rate");
        assert_eq!(
            result.criteria_evaluation.failed_criteria,
            vec!["completion_rate"]
        );
    }

    #[test]
    fn demotion_check_shadows_promotion() {
        let tiers = ladder();
        let a = assignment(2, 5);
        // Promotion criteria all pass, but the missed quota fires the
        // demotion check first; the result is never a promotion.
        let m = metrics(0.95, 50_000.0, 0.08, false);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_ne!(result.action, TierAction::Promote);
        assert_eq!(result.action, TierAction::Warning);
    }

    #[test]
    fn highest_tier_maintains_despite_perfect_metrics() {
        let tiers = ladder();
        let a = assignment(3, 12);
        let m = metrics(1.0, 500_000.0, 0.2, true);

        let result = evaluate(&a, &tiers[2], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Maintain);
        assert_eq!(result.new_tier_id, None);
        assert_eq!(result.reason, "At highest tier");
    }

    #[test]
    fn promotion_thresholds_are_inclusive() {
        let tiers = ladder();
        let a = assignment(2, 1); // months_in_tier + 1 == 2 == min_months_active
        let m = metrics(0.8, 10_000.0, 0.05, true); // exactly at every threshold

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Promote);
    }

    #[test]
    fn tenure_short_by_one_month_fails_months_criterion() {
        let tiers = ladder();
        let a = assignment(2, 0); // months_in_tier + 1 == 1 < 2
        let m = metrics(0.95, 50_000.0, 0.08, true);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Maintain);
        assert_eq!(
            result.criteria_evaluation.failed_criteria,
            vec!["min_months_active"]
        );
    }

    #[test]
    fn snapshot_reflects_metrics_and_tenure() {
        let tiers = ladder();
        let a = assignment(2, 2);
        let m = metrics(0.9, 20_000.0, 0.06, true);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        let snap = &result.performance_snapshot;
        assert_eq!(snap.months_in_tier, 3);
        assert_eq!(snap.videos_submitted, Some(4));
        assert_eq!(snap.completion_rate, Some(0.9));
        assert_eq!(snap.avg_views, Some(20_000.0));
        assert_eq!(snap.total_earned, Some(1200.0));
        assert_eq!(snap.quota_met, Some(true));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let tiers = ladder();
        let a = assignment(2, 2);
        let m = metrics(0.7, 15_000.0, 0.04, true);

        let first = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();
        let second = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn promotion_requires_unanimity() {
        let tiers = ladder();
        let a = assignment(2, 5);
        // Engagement misses; two other rates pass.
        let m = metrics(0.9, 50_000.0, 0.01, true);

        let result = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(result.action, TierAction::Maintain);
        assert_eq!(
            result.reason,
            "Did not meet all promotion criteria (1 remaining)"
        );
        assert_eq!(result.criteria_evaluation.met_criteria.len(), 3);
    }

    #[test]
    fn duplicate_level_below_is_an_error() {
        let mut tiers = ladder();
        tiers.push(tier(9, 1)); // second tier at level 1
        let a = assignment(2, 2);
        let m = metrics(0.95, 50_000.0, 0.08, true);

        let err = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap_err();

        assert_matches!(
            err,
            CoreError::InconsistentLadder {
                program_id: PROGRAM_ID,
                level: 1,
                count: 2,
            }
        );
    }

    #[test]
    fn duplicate_level_above_is_an_error() {
        let mut tiers = ladder();
        tiers.push(tier(9, 3)); // second tier at level 3
        let a = assignment(2, 2);
        let m = metrics(0.95, 50_000.0, 0.08, true);

        let err = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap_err();

        assert_matches!(err, CoreError::InconsistentLadder { level: 3, .. });
    }

    #[test]
    fn snapshot_omits_absent_fields_in_json() {
        let tiers = ladder();
        let a = assignment(2, 3);

        let result = evaluate(&a, &tiers[1], &tiers, None).unwrap();
        let json = serde_json::to_value(&result.performance_snapshot).unwrap();

        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["months_in_tier"], 4);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let tiers = ladder();
        let a = assignment(2, 2);
        let m = metrics(0.95, 50_000.0, 0.08, true);
        let a_before = a.clone();
        let m_before = m.clone();

        let _ = evaluate(&a, &tiers[1], &tiers, Some(&m)).unwrap();

        assert_eq!(a.months_in_tier, a_before.months_in_tier);
        assert_eq!(m.completion_rate, m_before.completion_rate);
    }
}
