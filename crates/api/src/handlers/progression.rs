//! Handlers for the tier-progression admin surface.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use boostline_core::error::CoreError;
use boostline_core::types::DbId;
use boostline_db::repositories::{ProgramRepo, TierChangeRepo};
use boostline_worker::progression;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/admin/progression/run
///
/// Run tier progression for the calendar month prior to now, over all
/// programs with auto-progression enabled. Programs already processed
/// for the period are skipped, so repeated triggers are safe.
pub async fn run_progression(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summary = progression::run_monthly(&state.pool).await?;

    tracing::info!(
        period = %summary.period,
        processed = summary.processed,
        "Tier progression triggered via API"
    );

    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/admin/progression/programs/{id}/history
///
/// List a program's tier change audit records, newest first. An
/// unknown program id is a 404 rather than an empty list.
pub async fn tier_change_history(
    State(state): State<AppState>,
    Path(program_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ProgramRepo::find_by_id(&state.pool, program_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "boost program",
            id: program_id,
        })?;

    let records = TierChangeRepo::list_for_program(&state.pool, program_id).await?;

    Ok(Json(DataResponse { data: records }))
}
