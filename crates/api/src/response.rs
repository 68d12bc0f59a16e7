//! Shared response envelope types for API handlers.
//!
//! Read endpoints use the `{ "data": ... }` envelope; submission endpoints
//! return the submission envelope unchanged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use voicematch_submission::SubmissionResult;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// A finished submission: `201 Created` on success, `422 Unprocessable
/// Entity` otherwise, with the envelope as body either way.
#[derive(Debug)]
pub struct Submitted<T>(pub SubmissionResult<T>);

impl<T: Serialize> IntoResponse for Submitted<T> {
    fn into_response(self) -> Response {
        let status = if self.0.is_success() {
            StatusCode::CREATED
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        (status, Json(self.0)).into_response()
    }
}
