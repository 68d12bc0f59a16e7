use axum::routing::post;
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(jobs::submit_job))
}
