//! Recording [`DataStore`] double with failure injection.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;
use voicematch_core::media::UploadFile;
use voicematch_core::types::RecordId;
use voicematch_db::models::actor::{ActorFilters, NewVoiceActor, VoiceActor};
use voicematch_db::models::job::{Job, NewJob};
use voicematch_db::models::review::Review;
use voicematch_db::{Bucket, DataStore, StoreError};

#[derive(Default)]
pub struct FakeStore {
    /// Zero-based index of the upload call that fails.
    pub fail_upload_at: Option<usize>,
    pub fail_insert: bool,
    pub fail_remove: bool,
    pub panic_on_insert: bool,
    pub(crate) uploads: Mutex<Vec<(Bucket, String, UploadFile)>>,
    pub(crate) stored: Mutex<Vec<String>>,
    pub(crate) removed: Mutex<Vec<String>>,
    pub(crate) actor_inserts: Mutex<Vec<NewVoiceActor>>,
    pub(crate) job_inserts: Mutex<Vec<NewJob>>,
}

impl FakeStore {
    pub fn upload_calls(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn uploaded_files(&self) -> Vec<(Bucket, String, UploadFile)> {
        self.uploads.lock().unwrap().clone()
    }

    /// Paths currently stored (uploaded and not removed).
    pub fn stored_paths(&self) -> Vec<String> {
        self.stored.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }

    pub fn actor_inserts(&self) -> Vec<NewVoiceActor> {
        self.actor_inserts.lock().unwrap().clone()
    }

    pub fn job_inserts(&self) -> Vec<NewJob> {
        self.job_inserts.lock().unwrap().clone()
    }

    /// Total calls that touched storage in any way.
    pub fn storage_calls(&self) -> usize {
        self.upload_calls()
            + self.removed().len()
            + self.actor_inserts().len()
            + self.job_inserts().len()
    }
}

#[async_trait]
impl DataStore for FakeStore {
    async fn query_actors(&self, _filters: &ActorFilters) -> Result<Vec<VoiceActor>, StoreError> {
        Ok(vec![])
    }

    async fn get_actor(&self, _id: RecordId) -> Result<Option<VoiceActor>, StoreError> {
        Ok(None)
    }

    async fn get_reviews(&self, _actor_id: RecordId) -> Result<Vec<Review>, StoreError> {
        Ok(vec![])
    }

    async fn insert_actor(&self, record: &NewVoiceActor) -> Result<VoiceActor, StoreError> {
        if self.panic_on_insert {
            panic!("insert exploded");
        }
        self.actor_inserts.lock().unwrap().push(record.clone());
        if self.fail_insert {
            return Err(StoreError::Backend {
                status: 500,
                body: "insert failed".into(),
            });
        }
        Ok(VoiceActor {
            id: Uuid::new_v4(),
            name: record.name.clone(),
            location: record.location.clone(),
            rating: record.rating,
            review_count: record.review_count,
            profile_picture_url: record.profile_picture_url.clone(),
            bio: record.bio.clone(),
            categories: record.categories.clone(),
            audio_samples: record.audio_samples.clone(),
            certifications: record.certifications.clone(),
            last_online: record.last_online,
            typical_reply_time: record.typical_reply_time,
            last_hired: None,
            completed_jobs: record.completed_jobs,
            past_clients: record.past_clients.clone(),
            hourly_rate: record.hourly_rate,
        })
    }

    async fn insert_job(&self, record: &NewJob) -> Result<Job, StoreError> {
        if self.panic_on_insert {
            panic!("insert exploded");
        }
        self.job_inserts.lock().unwrap().push(record.clone());
        if self.fail_insert {
            return Err(StoreError::Rejected("jobs insert failed".into()));
        }
        Ok(Job {
            id: Uuid::new_v4(),
            actor_id: record.actor_id,
            project_name: record.project_name.clone(),
            category: record.category,
            character_traits: record.character_traits.clone(),
            language: record.language.clone(),
            accent: record.accent.clone(),
            voice_gender: record.voice_gender,
            script_url: record.script_url.clone(),
            estimated_length_minutes: record.estimated_length_minutes,
            deadline: record.deadline,
            budget: record.budget,
            approval_process: record.approval_process.clone(),
            submitted_at: record.submitted_at,
        })
    }

    async fn upload_object(
        &self,
        bucket: Bucket,
        path: &str,
        file: &UploadFile,
    ) -> Result<String, StoreError> {
        let index = {
            let mut uploads = self.uploads.lock().unwrap();
            uploads.push((bucket, path.to_string(), file.clone()));
            uploads.len() - 1
        };
        if self.fail_upload_at == Some(index) {
            return Err(StoreError::Backend {
                status: 503,
                body: "storage unavailable".into(),
            });
        }
        self.stored.lock().unwrap().push(path.to_string());
        Ok(path.to_string())
    }

    async fn remove_object(&self, _bucket: Bucket, path: &str) -> Result<(), StoreError> {
        self.removed.lock().unwrap().push(path.to_string());
        if self.fail_remove {
            return Err(StoreError::Rejected("remove failed".into()));
        }
        self.stored.lock().unwrap().retain(|p| p != path);
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        format!("https://cdn.test/{}/{path}", bucket.name())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
