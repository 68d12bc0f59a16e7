//! Linear submission saga: `Validating -> UploadingMedia -> Persisting ->
//! Done | Failed`.
//!
//! The saga owns an upload ledger. When a workflow fails after objects were
//! stored, [`Saga::finish`] removes them again in reverse order. Removal is
//! best effort: a failed delete is logged and the original error is kept.

use voicematch_core::media::UploadFile;
use voicematch_db::{Bucket, DataStore, StoreError};

use crate::result::SubmissionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    UploadingMedia,
    Persisting,
    Done,
    Failed,
}

/// An object stored during the current submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: Bucket,
    pub path: String,
    pub public_url: String,
}

pub struct Saga<'a> {
    store: &'a dyn DataStore,
    workflow: &'static str,
    stage: Stage,
    ledger: Vec<StoredObject>,
}

impl<'a> Saga<'a> {
    pub fn new(store: &'a dyn DataStore, workflow: &'static str) -> Self {
        Self {
            store,
            workflow,
            stage: Stage::Validating,
            ledger: Vec::new(),
        }
    }

    pub fn store(&self) -> &'a dyn DataStore {
        self.store
    }

    pub fn advance(&mut self, next: Stage) {
        tracing::debug!(workflow = self.workflow, from = ?self.stage, to = ?next, "Saga stage change");
        self.stage = next;
    }

    /// Store `file` under a fresh path in `bucket` and record it in the ledger.
    pub async fn upload(
        &mut self,
        bucket: Bucket,
        file: &UploadFile,
    ) -> Result<StoredObject, StoreError> {
        let path = bucket.object_path(file);
        let stored_path = self.store.upload_object(bucket, &path, file).await?;
        let object = StoredObject {
            bucket,
            public_url: self.store.public_url(bucket, &stored_path),
            path: stored_path,
        };
        tracing::info!(
            workflow = self.workflow,
            bucket = bucket.name(),
            path = %object.path,
            size = file.size(),
            "Uploaded object"
        );
        self.ledger.push(object.clone());
        Ok(object)
    }

    /// Close the saga. On error, compensate every recorded upload.
    pub async fn finish<T>(
        mut self,
        outcome: Result<T, SubmissionError>,
    ) -> Result<T, SubmissionError> {
        match outcome {
            Ok(value) => {
                self.advance(Stage::Done);
                Ok(value)
            }
            Err(err) => {
                self.compensate().await;
                self.advance(Stage::Failed);
                Err(err)
            }
        }
    }

    async fn compensate(&mut self) {
        while let Some(object) = self.ledger.pop() {
            match self.store.remove_object(object.bucket, &object.path).await {
                Ok(()) => tracing::info!(
                    workflow = self.workflow,
                    bucket = object.bucket.name(),
                    path = %object.path,
                    "Removed orphaned upload"
                ),
                Err(e) => tracing::warn!(
                    workflow = self.workflow,
                    bucket = object.bucket.name(),
                    path = %object.path,
                    error = %e,
                    "Failed to remove orphaned upload"
                ),
            }
        }
    }
}
