//! Handlers for the `/jobs` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use voicematch_core::types::RecordId;
use voicematch_submission::input::parse_traits;
use voicematch_submission::JobInput;

use crate::error::AppResult;
use crate::handlers::form::FormParts;
use crate::response::Submitted;
use crate::state::AppState;

/// POST /api/v1/jobs
///
/// JSON job submission. The script, if any, must already be uploaded via
/// `POST /api/v1/scripts` and referenced by `script_url`.
pub async fn submit_job(
    State(state): State<AppState>,
    payload: Result<Json<JobInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let result = state.submissions.submit_job(input).await;
    Ok(Submitted(result))
}

/// Build a [`JobInput`] from invitation form fields.
pub(crate) fn job_input_from_form(actor_id: RecordId, form: &FormParts) -> AppResult<JobInput> {
    Ok(JobInput {
        actor_id,
        project_name: form.text("project_name"),
        category: form.parse("category")?,
        character_traits: form
            .text("character_traits")
            .map(|t| parse_traits(&t))
            .unwrap_or_default(),
        language: form.text("language").unwrap_or_default(),
        accent: form.text("accent").unwrap_or_default(),
        voice_gender: form.parse("voice_gender")?,
        script_url: String::new(),
        estimated_length_minutes: form.parse("estimated_length_minutes")?,
        deadline: form.text("deadline"),
        budget: form.parse("budget")?,
        approval_process: form.text("approval_process").unwrap_or_default(),
    })
}
