//! In-process [`DataStore`] used for local development (`STORE_BACKEND=memory`)
//! and by the API integration tests.
//!
//! Behaves like the hosted backend for everything the workflows observe:
//! ids and timestamps are assigned on insert, jobs must reference an existing
//! actor, and storing two objects under one path is rejected.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Url;
use tokio::sync::RwLock;
use uuid::Uuid;
use voicematch_core::media::UploadFile;
use voicematch_core::types::RecordId;

use crate::models::actor::{ActorFilters, NewVoiceActor, VoiceActor};
use crate::models::job::{Job, NewJob};
use crate::models::review::Review;
use crate::store::{join_object_url, parse_base_url, Bucket, DataStore, StoreError};

/// Base URL used to build public object URLs when none is configured.
///
/// Nothing serves objects from this store; its public URLs only identify
/// where an object would live.
const DEFAULT_PUBLIC_BASE: &str = "http://localhost:3000/storage";

#[derive(Default)]
struct Tables {
    actors: Vec<VoiceActor>,
    jobs: Vec<Job>,
    reviews: Vec<Review>,
    objects: HashMap<(Bucket, String), UploadFile>,
}

/// In-memory tables and buckets behind a single lock.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    public_base: Url,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_BASE).expect("default public base is a valid URL")
    }
}

impl MemoryStore {
    /// Empty store whose public URLs start with `public_base`.
    pub fn new(public_base: &str) -> Result<Self, StoreError> {
        Ok(Self {
            tables: RwLock::new(Tables::default()),
            public_base: parse_base_url(public_base)?,
        })
    }

    /// Add a review row directly; reviews have no write path in the API.
    pub async fn add_review(&self, review: Review) {
        self.tables.write().await.reviews.push(review);
    }

    pub async fn job_count(&self) -> usize {
        self.tables.read().await.jobs.len()
    }

    pub async fn actor_count(&self) -> usize {
        self.tables.read().await.actors.len()
    }

    /// Paths of every stored object in `bucket`, sorted.
    pub async fn object_paths(&self, bucket: Bucket) -> Vec<String> {
        let tables = self.tables.read().await;
        let mut paths: Vec<String> = tables
            .objects
            .keys()
            .filter(|(b, _)| *b == bucket)
            .map(|(_, p)| p.clone())
            .collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn query_actors(&self, filters: &ActorFilters) -> Result<Vec<VoiceActor>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .actors
            .iter()
            .filter(|a| filters.matches(a))
            .cloned()
            .collect())
    }

    async fn get_actor(&self, id: RecordId) -> Result<Option<VoiceActor>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.actors.iter().find(|a| a.id == id).cloned())
    }

    async fn get_reviews(&self, actor_id: RecordId) -> Result<Vec<Review>, StoreError> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|r| r.actor_id == actor_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn insert_actor(&self, record: &NewVoiceActor) -> Result<VoiceActor, StoreError> {
        let actor = VoiceActor {
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
        };
        self.tables.write().await.actors.push(actor.clone());
        Ok(actor)
    }

    async fn insert_job(&self, record: &NewJob) -> Result<Job, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.actors.iter().any(|a| a.id == record.actor_id) {
            return Err(StoreError::Rejected(format!(
                "jobs.actor_id {} does not reference an existing actor",
                record.actor_id
            )));
        }
        let job = Job {
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
        };
        tables.jobs.push(job.clone());
        Ok(job)
    }

    async fn upload_object(
        &self,
        bucket: Bucket,
        path: &str,
        file: &UploadFile,
    ) -> Result<String, StoreError> {
        let mut tables = self.tables.write().await;
        let key = (bucket, path.to_string());
        if tables.objects.contains_key(&key) {
            return Err(StoreError::Rejected(format!(
                "object {}/{path} already exists",
                bucket.name()
            )));
        }
        tables.objects.insert(key, file.clone());
        Ok(path.to_string())
    }

    async fn remove_object(&self, bucket: Bucket, path: &str) -> Result<(), StoreError> {
        self.tables
            .write()
            .await
            .objects
            .remove(&(bucket, path.to_string()));
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        join_object_url(&self.public_base, [bucket.name()], path).into()
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
