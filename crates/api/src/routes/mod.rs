pub mod health;
pub mod progression;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /admin/progression/run                          trigger monthly run (POST)
/// /admin/progression/programs/{id}/history        tier-change audit (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/admin/progression", progression::router())
}
