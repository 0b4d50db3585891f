//! Route definitions for the tier-progression admin surface.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::progression;
use crate::state::AppState;

/// Routes mounted at `/admin/progression`.
///
/// ```text
/// POST   /run                        -> run_progression
/// GET    /programs/{id}/history      -> tier_change_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/run", post(progression::run_progression))
        .route(
            "/programs/{id}/history",
            get(progression::tier_change_history),
        )
}
