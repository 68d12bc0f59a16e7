//! The uniform submission envelope and the error taxonomy behind it.

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde::Serialize;
use voicematch_db::StoreError;

/// Shown for any failure that is not the caller's fault and has no more
/// specific message.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Why a submission failed.
///
/// Each variant maps to the user-visible messages via
/// [`SubmissionError::user_messages`]; storage causes are logged, never shown.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// User-correctable field errors, reported verbatim.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// A file violated its type or size constraint.
    #[error("media rejected: {0}")]
    Media(String),

    /// An upload or insert failed. `message` is the generic text shown to
    /// the caller.
    #[error("{message}")]
    Storage {
        message: String,
        #[source]
        source: StoreError,
    },

    /// Anything else, including a panic inside a stage.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl SubmissionError {
    pub fn storage(message: impl Into<String>, source: StoreError) -> Self {
        Self::Storage {
            message: message.into(),
            source,
        }
    }

    /// Messages safe to return to the caller.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.clone(),
            Self::Media(message) => vec![message.clone()],
            Self::Storage { message, .. } => vec![message.clone()],
            Self::Unexpected(_) => vec![UNEXPECTED_MESSAGE.to_string()],
        }
    }

    /// Log at the level the failure deserves.
    fn log(&self, workflow: &'static str) {
        match self {
            Self::Validation(errors) => {
                tracing::info!(workflow, errors = ?errors, "Submission rejected by validation");
            }
            Self::Media(message) => {
                tracing::info!(workflow, %message, "Submission rejected by media check");
            }
            Self::Storage { message, source } => {
                tracing::error!(workflow, error = %source, %message, "Submission storage failure");
            }
            Self::Unexpected(detail) => {
                tracing::error!(workflow, %detail, "Submission failed unexpectedly");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// `{ success, errors, data? }`: `errors` is non-empty iff `success` is
/// false, `data` is present iff `success` is true.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult<T> {
    success: bool,
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> SubmissionResult<T> {
    pub fn succeeded(data: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            data: Some(data),
        }
    }

    /// A failed result. An empty error list is replaced by the generic
    /// message so the envelope invariant holds.
    pub fn failed(errors: Vec<String>) -> Self {
        let errors = if errors.is_empty() {
            vec![UNEXPECTED_MESSAGE.to_string()]
        } else {
            errors
        };
        Self {
            success: false,
            errors,
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Convert into a plain `Result` with the user-visible messages as error.
    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => Err(self.errors),
        }
    }
}

impl<T> From<&SubmissionError> for SubmissionResult<T> {
    fn from(err: &SubmissionError) -> Self {
        Self::failed(err.user_messages())
    }
}

// ---------------------------------------------------------------------------
// Boundary
// ---------------------------------------------------------------------------

/// Run a workflow and fold its outcome into a [`SubmissionResult`].
///
/// Panics raised inside `workflow` are caught here and reported as
/// [`SubmissionError::Unexpected`].
pub(crate) async fn settle<T, F>(workflow: &'static str, fut: F) -> SubmissionResult<T>
where
    F: Future<Output = Result<T, SubmissionError>>,
{
    let outcome = match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => Err(SubmissionError::Unexpected(panic_message(panic.as_ref()))),
    };

    match outcome {
        Ok(data) => {
            tracing::info!(workflow, "Submission succeeded");
            SubmissionResult::succeeded(data)
        }
        Err(err) => {
            err.log(workflow);
            SubmissionResult::from(&err)
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
