//! Standalone job script upload.

use serde::Serialize;
use voicematch_core::media::{MediaViolation, UploadFile, SCRIPT_POLICY};
use voicematch_db::{Bucket, DataStore};

use crate::actor::check_media;
use crate::result::{settle, SubmissionError, SubmissionResult};
use crate::saga::{Saga, Stage};

const WORKFLOW: &str = "upload_script";

pub(crate) const SCRIPT_UPLOAD_FAILED: &str = "Failed to upload script. Please try again.";

/// Where a script was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedScript {
    /// Object path inside the `job-scripts` bucket; stored as a job's
    /// `script_url`.
    pub path: String,
    pub url: String,
}

pub async fn upload_script(store: &dyn DataStore, file: UploadFile) -> SubmissionResult<UploadedScript> {
    settle(WORKFLOW, async {
        check_script(&file)?;
        let mut saga = Saga::new(store, WORKFLOW);
        saga.advance(Stage::UploadingMedia);
        let outcome = saga
            .upload(Bucket::JobScripts, &file)
            .await
            .map(|object| UploadedScript {
                path: object.path,
                url: object.public_url,
            })
            .map_err(|e| SubmissionError::storage(SCRIPT_UPLOAD_FAILED, e));
        saga.finish(outcome).await
    })
    .await
}

pub(crate) fn check_script(file: &UploadFile) -> Result<(), SubmissionError> {
    check_media(&SCRIPT_POLICY, file, |policy, violation| match violation {
        MediaViolation::UnsupportedType => format!(
            "Invalid script format. Allowed types are: {}",
            policy.allowed_list()
        ),
        MediaViolation::TooLarge => format!(
            "Script file is too large. Maximum size allowed is {}MB",
            policy.max_megabytes()
        ),
    })
}
