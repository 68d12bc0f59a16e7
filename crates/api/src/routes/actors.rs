use axum::routing::{get, post};
use axum::Router;

use crate::handlers::actors;
use crate::state::AppState;

/// Routes mounted at `/actors`.
///
/// ```text
/// GET    /                          -> list_actors
/// POST   /                          -> create_actor
/// GET    /{id}                      -> get_actor
/// GET    /{id}/reviews              -> list_reviews
/// POST   /{id}/invitations          -> invite_actor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(actors::list_actors).post(actors::create_actor))
        .route("/{id}", get(actors::get_actor))
        .route("/{id}/reviews", get(actors::list_reviews))
        .route("/{id}/invitations", post(actors::invite_actor))
}
