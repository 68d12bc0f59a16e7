use axum::extract::{Multipart, State};
use axum::response::IntoResponse;

use crate::error::{AppError, AppResult};
use crate::handlers::form::FormParts;
use crate::response::Submitted;
use crate::state::AppState;

/// POST /api/v1/scripts
///
/// Store a job script sent as the `file` part. Returns its object path and
/// public URL.
pub async fn upload_script(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = FormParts::read(multipart).await?;
    let file = form
        .take_file("file")
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let result = state.submissions.upload_script(file).await;
    Ok(Submitted(result))
}
