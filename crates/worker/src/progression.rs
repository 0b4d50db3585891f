//! Monthly tier-progression batch runner.
//!
//! Iterates all auto-progression programs, evaluates every enrolled
//! creator against the prior month's metrics, and applies each decision
//! as store mutations. Tier ladders and metrics are fetched once per
//! program and held read-only for that program's pass, so a concurrent
//! criteria edit cannot produce inconsistent decisions mid-batch.
//!
//! Each program's pass runs in one transaction together with its run
//! marker: either every decision for the program commits along with the
//! marker, or the pass rolls back wholly and the next invocation picks
//! the program up again.

use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use sqlx::{PgConnection, PgPool};

use boostline_core::error::CoreError;
use boostline_core::period::EvaluationPeriod;
use boostline_core::progression::evaluator::evaluate;
use boostline_core::progression::types::{PeriodMetrics, Tier, TierAction};
use boostline_core::types::DbId;
use boostline_db::repositories::{
    AssignmentRepo, MetricsRepo, ProgramRepo, ProgressionRunRepo, TierChangeRepo, TierRepo,
};

/// Why a progression run failed.
///
/// Any store or evaluation failure aborts the remainder of the batch.
/// The failing program's pass rolls back wholly (marker included);
/// programs committed earlier keep their markers and are skipped when
/// the run is re-invoked.
#[derive(Debug, thiserror::Error)]
pub enum ProgressionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One promote/demote/warning outcome reported by a run. Maintain
/// outcomes are applied but not reported.
#[derive(Debug, Clone, Serialize)]
pub struct TierChangeResult {
    pub program_id: DbId,
    pub creator_id: DbId,
    pub action: TierAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_tier: Option<String>,
    pub reason: String,
}

/// Summary of one full progression pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressionSummary {
    pub success: bool,
    pub period: EvaluationPeriod,
    pub processed: usize,
    pub results: Vec<TierChangeResult>,
}

/// Run tier progression for the calendar month prior to now.
pub async fn run_monthly(pool: &PgPool) -> Result<ProgressionSummary, ProgressionError> {
    run_for_period(pool, EvaluationPeriod::previous_month(Utc::now())).await
}

/// Run tier progression for an explicit period over all eligible
/// programs. Programs whose (program, period) marker is already claimed
/// are skipped, so the batch is safe to re-invoke.
pub async fn run_for_period(
    pool: &PgPool,
    period: EvaluationPeriod,
) -> Result<ProgressionSummary, ProgressionError> {
    tracing::info!(%period, "Starting tier progression run");

    let programs = ProgramRepo::list_auto_progression(pool).await?;
    tracing::info!(
        count = programs.len(),
        "Found programs with auto-progression enabled"
    );

    let mut results: Vec<TierChangeResult> = Vec::new();

    for program in &programs {
        // Marker claim, decisions, and completion share one
        // transaction; a marker row can only exist for a committed
        // pass.
        let mut tx = pool.begin().await?;

        if !ProgressionRunRepo::try_begin(&mut tx, program.id, period).await? {
            tracing::info!(
                program_id = program.id,
                %period,
                "Period already processed for program, skipping"
            );
            tx.rollback().await?;
            continue;
        }

        tracing::info!(program_id = program.id, title = %program.title, "Processing program");

        let applied = process_program(&mut tx, program.id, period).await?;
        ProgressionRunRepo::complete(&mut tx, program.id, period, applied.len() as i32).await?;
        tx.commit().await?;
        results.extend(applied);
    }

    tracing::info!(processed = results.len(), "Tier progression run finished");

    Ok(ProgressionSummary {
        success: true,
        period,
        processed: results.len(),
        results,
    })
}

/// Evaluate and apply decisions for every assignment in one program,
/// on the pass's transaction connection.
async fn process_program(
    conn: &mut PgConnection,
    program_id: DbId,
    period: EvaluationPeriod,
) -> Result<Vec<TierChangeResult>, ProgressionError> {
    let tiers = TierRepo::list_for_program(&mut *conn, program_id).await?;
    if tiers.is_empty() {
        return Ok(Vec::new());
    }

    let assignments = AssignmentRepo::list_for_program(&mut *conn, program_id).await?;
    if assignments.is_empty() {
        return Ok(Vec::new());
    }

    let metrics = MetricsRepo::list_for_period(&mut *conn, program_id, period).await?;
    let metrics_by_creator: HashMap<DbId, PeriodMetrics> =
        metrics.into_iter().map(|m| (m.creator_id, m)).collect();

    let mut results = Vec::new();

    for assignment in &assignments {
        let Some(current_tier) = tiers.iter().find(|t| t.id == assignment.tier_id) else {
            tracing::warn!(
                assignment_id = assignment.id,
                tier_id = assignment.tier_id,
                "Assignment references a tier missing from the ladder, skipping"
            );
            continue;
        };

        let creator_metrics = metrics_by_creator.get(&assignment.creator_id);
        let evaluation = evaluate(assignment, current_tier, &tiers, creator_metrics)?;

        match evaluation.action {
            TierAction::Maintain => {
                AssignmentRepo::increment_months_in_tier(&mut *conn, assignment.id).await?;
            }
            TierAction::Warning => {
                AssignmentRepo::record_warning(
                    &mut *conn,
                    assignment.id,
                    creator_metrics.map(|m| m.id),
                )
                .await?;

                tracing::info!(
                    creator_id = assignment.creator_id,
                    tier = %current_tier.name,
                    reason = %evaluation.reason,
                    "Demotion warning issued"
                );

                results.push(TierChangeResult {
                    program_id,
                    creator_id: assignment.creator_id,
                    action: TierAction::Warning,
                    from_tier: None,
                    to_tier: None,
                    reason: evaluation.reason.clone(),
                });
            }
            TierAction::Promote | TierAction::Demote => {
                let Some(new_tier_id) = evaluation.new_tier_id else {
                    // evaluate() always sets a target for these actions.
                    return Err(CoreError::Internal(format!(
                        "{} decision without a target tier for creator {}",
                        evaluation.action.as_str(),
                        assignment.creator_id
                    ))
                    .into());
                };

                let assignment_reason = match evaluation.action {
                    TierAction::Promote => "auto_promoted",
                    _ => "auto_demoted",
                };

                TierChangeRepo::apply_change(
                    &mut *conn,
                    assignment.id,
                    program_id,
                    new_tier_id,
                    assignment_reason,
                    &evaluation,
                )
                .await?;

                let to_tier = tier_name(&tiers, new_tier_id);
                tracing::info!(
                    action = evaluation.action.as_str(),
                    creator_id = assignment.creator_id,
                    from = %current_tier.name,
                    to = to_tier.as_deref().unwrap_or("?"),
                    "Tier change applied"
                );

                results.push(TierChangeResult {
                    program_id,
                    creator_id: assignment.creator_id,
                    action: evaluation.action,
                    from_tier: Some(current_tier.name.clone()),
                    to_tier,
                    reason: evaluation.reason.clone(),
                });
            }
        }
    }

    Ok(results)
}

fn tier_name(tiers: &[Tier], tier_id: DbId) -> Option<String> {
    tiers.iter().find(|t| t.id == tier_id).map(|t| t.name.clone())
}
