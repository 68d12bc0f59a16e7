//! The data store gateway contract.
//!
//! Submission workflows and HTTP handlers only ever see this trait; they
//! interpret success or failure and, on success, the returned record or
//! object path. Transport details stay inside the implementations.

use async_trait::async_trait;
use reqwest::Url;
use voicematch_core::media::UploadFile;
use voicematch_core::types::RecordId;

use crate::models::actor::{ActorFilters, NewVoiceActor, VoiceActor};
use crate::models::job::{Job, NewJob};
use crate::models::review::Review;

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Object storage buckets used by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    ProfilePictures,
    AudioSamples,
    JobScripts,
}

impl Bucket {
    /// Bucket name on the backend.
    pub fn name(self) -> &'static str {
        match self {
            Self::ProfilePictures => "profile-pictures",
            Self::AudioSamples => "audio-samples",
            Self::JobScripts => "job-scripts",
        }
    }

    /// Folder inside the bucket that new objects go to.
    pub fn folder(self) -> &'static str {
        match self {
            Self::ProfilePictures => "pictures",
            Self::AudioSamples => "samples",
            Self::JobScripts => "scripts",
        }
    }

    /// Generate a fresh object path for `file`: `{folder}/{uuid}-{name}`.
    pub fn object_path(self, file: &UploadFile) -> String {
        format!("{}/{}", self.folder(), file.storage_name())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the data store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend error ({status}): {body}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend refused the write (constraint violation, duplicate object).
    #[error("Rejected by store: {0}")]
    Rejected(String),

    /// A successful response did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A configured base URL cannot have paths appended to it.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

/// Parse a base URL that endpoint paths are appended to.
pub(crate) fn parse_base_url(raw: &str) -> Result<Url, StoreError> {
    let url = Url::parse(raw.trim()).map_err(|e| StoreError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(StoreError::InvalidUrl(format!("{raw}: not a hierarchical URL")));
    }
    Ok(url)
}

/// Append `segments` and then every `/`-separated part of `object_path` to
/// `base`, percent-encoding each one.
pub(crate) fn join_object_url<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
    object_path: &str,
) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty()
            .extend(segments)
            .extend(object_path.split('/').filter(|s| !s.is_empty()));
    }
    url
}

// ---------------------------------------------------------------------------
// Gateway trait
// ---------------------------------------------------------------------------

/// Typed read/write access to the actor, job and review tables and to
/// object storage.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Search actors.
    async fn query_actors(&self, filters: &ActorFilters) -> Result<Vec<VoiceActor>, StoreError>;

    /// Fetch one actor, `None` when no row has this id.
    async fn get_actor(&self, id: RecordId) -> Result<Option<VoiceActor>, StoreError>;

    /// Reviews for an actor, newest first.
    async fn get_reviews(&self, actor_id: RecordId) -> Result<Vec<Review>, StoreError>;

    /// Insert one actor row and return it as stored.
    async fn insert_actor(&self, record: &NewVoiceActor) -> Result<VoiceActor, StoreError>;

    /// Insert one job row and return it as stored.
    async fn insert_job(&self, record: &NewJob) -> Result<Job, StoreError>;

    /// Store `file` at `path` inside `bucket`. Returns the stored path.
    async fn upload_object(
        &self,
        bucket: Bucket,
        path: &str,
        file: &UploadFile,
    ) -> Result<String, StoreError>;

    /// Delete the object at `path`. Deleting a missing object is not an error.
    async fn remove_object(&self, bucket: Bucket, path: &str) -> Result<(), StoreError>;

    /// Public URL under which a stored object is served.
    fn public_url(&self, bucket: Bucket, path: &str) -> String;

    /// Cheap reachability check for the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}
