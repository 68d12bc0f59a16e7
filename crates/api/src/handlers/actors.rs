//! Handlers for the `/actors` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use voicematch_core::catalog::ReplyTime;
use voicematch_core::error::CoreError;
use voicematch_core::types::RecordId;
use voicematch_submission::{ActorInput, JobInput};

use crate::error::{AppError, AppResult};
use crate::handlers::form::FormParts;
use crate::handlers::jobs::job_input_from_form;
use crate::query::ActorSearchParams;
use crate::response::{DataResponse, Submitted};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/actors
///
/// Search actors by name substring, required categories and minimum rating.
pub async fn list_actors(
    State(state): State<AppState>,
    Query(params): Query<ActorSearchParams>,
) -> AppResult<impl IntoResponse> {
    let filters = params.into_filters()?;
    let actors = state.store.query_actors(&filters).await?;
    tracing::debug!(count = actors.len(), query = ?filters.query(), "Listed actors");
    Ok(Json(DataResponse { data: actors }))
}

/// GET /api/v1/actors/{id}
pub async fn get_actor(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let actor = state
        .store
        .get_actor(id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "VoiceActor",
                id: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: actor }))
}

/// GET /api/v1/actors/{id}/reviews
///
/// Reviews for one actor, newest first.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let reviews = state.store.get_reviews(id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// POST /api/v1/actors
///
/// Multipart actor profile submission with an optional `profile_picture`
/// and `audio_samples[N][file]` / `audio_samples[N][title]` pairs.
pub async fn create_actor(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormParts::read(multipart).await?;
    let input = actor_input_from_form(&form)?;
    let picture = form.take_file("profile_picture");
    let samples = form.take_audio_samples();

    let result = state.submissions.submit_actor(input, picture, samples).await;
    Ok(Submitted(result))
}

/// POST /api/v1/actors/{id}/invitations
///
/// Multipart job offer for one actor with an optional `script` file.
pub async fn invite_actor(
    State(state): State<AppState>,
    Path(actor_id): Path<RecordId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormParts::read(multipart).await?;
    let input: JobInput = job_input_from_form(actor_id, &form)?;
    let script = form.take_file("script");

    let result = state.submissions.invite_actor(actor_id, input, script).await;
    Ok(Submitted(result))
}

fn actor_input_from_form(form: &FormParts) -> AppResult<ActorInput> {
    let typical_reply_time: ReplyTime = form
        .parse("typical_reply_time")?
        .ok_or_else(|| AppError::BadRequest("Missing required 'typical_reply_time' field".into()))?;

    let hourly_rate: Option<f64> = form.parse("hourly_rate")?;
    if hourly_rate.is_some_and(|rate| !rate.is_finite()) {
        return Err(AppError::BadRequest(
            "Invalid value for 'hourly_rate': must be a finite number".into(),
        ));
    }

    Ok(ActorInput {
        name: form.text("name"),
        location: form.text("location").unwrap_or_default(),
        bio: form.text("bio").unwrap_or_default(),
        categories: form.parse_list("categories")?,
        certifications: form.list("certifications"),
        past_clients: form.list("past_clients"),
        typical_reply_time,
        hourly_rate,
    })
}
