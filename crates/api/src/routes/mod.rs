pub mod actors;
pub mod health;
pub mod jobs;
pub mod scripts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /actors                           search, submit
/// /actors/{id}                      detail
/// /actors/{id}/reviews              reviews, newest first
/// /actors/{id}/invitations          job offer with optional script
/// /jobs                             JSON job submission
/// /scripts                          script upload
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/actors", actors::router())
        .nest("/jobs", jobs::router())
        .nest("/scripts", scripts::router())
}
