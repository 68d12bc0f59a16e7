use axum::routing::post;
use axum::Router;

use crate::handlers::scripts;
use crate::state::AppState;

/// Routes mounted at `/scripts`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(scripts::upload_script))
}
