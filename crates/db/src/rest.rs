//! HTTP client for the hosted backend.
//!
//! Tables are reached through a PostgREST-style endpoint (`/rest/v1/{table}`)
//! and files through the storage object API (`/storage/v1/object/...`),
//! both authenticated with the project API key, using [`reqwest`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use voicematch_core::media::UploadFile;
use voicematch_core::types::RecordId;

use crate::models::actor::{ActorFilters, NewVoiceActor, VoiceActor};
use crate::models::job::{Job, NewJob};
use crate::models::review::Review;
use crate::store::{join_object_url, parse_base_url, Bucket, DataStore, StoreError};

const ACTORS_TABLE: &str = "voice_actors";
const JOBS_TABLE: &str = "jobs";
const REVIEWS_TABLE: &str = "reviews";

/// Client for one hosted backend project.
pub struct RestStore {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl RestStore {
    /// Create a client for the project at `base_url` using `api_key` for
    /// every request.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, StoreError> {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.into(),
        })
    }

    fn table_url(&self, table: &str) -> Url {
        join_object_url(&self.base_url, ["rest", "v1"], table)
    }

    fn object_url(&self, bucket: Bucket, path: &str) -> Url {
        join_object_url(&self.base_url, ["storage", "v1", "object", bucket.name()], path)
    }

    fn auth_headers(&self) -> Result<HeaderMap, StoreError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| StoreError::Decode(format!("invalid api key header: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| StoreError::Decode(format!("invalid api key header: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .client
            .get(self.table_url(table))
            .headers(self.auth_headers()?)
            .query(params)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn insert<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        record: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .post(self.table_url(table))
            .headers(self.auth_headers()?)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        let mut rows: Vec<T> = Self::parse_response(response).await?;
        if rows.is_empty() {
            return Err(StoreError::Decode(format!(
                "insert into {table} returned no rows"
            )));
        }
        Ok(rows.swap_remove(0))
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or turn it into
    /// [`StoreError::Backend`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Backend {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

/// PostgREST query parameters for an actor search.
fn actor_query_params(filters: &ActorFilters) -> Vec<(&'static str, String)> {
    let mut params = vec![("select", "*".to_string())];
    if let Some(q) = filters.query() {
        params.push(("name", format!("ilike.*{q}*")));
    }
    if !filters.categories.is_empty() {
        let quoted: Vec<String> = filters
            .categories
            .iter()
            .map(|c| format!("\"{}\"", c.label()))
            .collect();
        params.push(("categories", format!("cs.{{{}}}", quoted.join(","))));
    }
    if let Some(min) = filters.min_rating {
        params.push(("rating", format!("gte.{min}")));
    }
    params
}

#[async_trait]
impl DataStore for RestStore {
    async fn query_actors(&self, filters: &ActorFilters) -> Result<Vec<VoiceActor>, StoreError> {
        tracing::debug!(?filters, "Querying actors");
        self.select(ACTORS_TABLE, &actor_query_params(filters)).await
    }

    async fn get_actor(&self, id: RecordId) -> Result<Option<VoiceActor>, StoreError> {
        let rows: Vec<VoiceActor> = self
            .select(
                ACTORS_TABLE,
                &[("select", "*".to_string()), ("id", format!("eq.{id}"))],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn get_reviews(&self, actor_id: RecordId) -> Result<Vec<Review>, StoreError> {
        self.select(
            REVIEWS_TABLE,
            &[
                ("select", "*".to_string()),
                ("actor_id", format!("eq.{actor_id}")),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    async fn insert_actor(&self, record: &NewVoiceActor) -> Result<VoiceActor, StoreError> {
        self.insert(ACTORS_TABLE, record).await
    }

    async fn insert_job(&self, record: &NewJob) -> Result<Job, StoreError> {
        self.insert(JOBS_TABLE, record).await
    }

    async fn upload_object(
        &self,
        bucket: Bucket,
        path: &str,
        file: &UploadFile,
    ) -> Result<String, StoreError> {
        let response = self
            .client
            .post(self.object_url(bucket, path))
            .headers(self.auth_headers()?)
            .header(CONTENT_TYPE, file.content_type.as_str())
            .body(file.bytes.clone())
            .send()
            .await?;

        Self::ensure_success(response).await?;
        tracing::debug!(bucket = bucket.name(), path, size = file.size(), "Object stored");
        Ok(path.to_string())
    }

    async fn remove_object(&self, bucket: Bucket, path: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.object_url(bucket, path))
            .headers(self.auth_headers()?)
            .send()
            .await?;

        match Self::ensure_success(response).await {
            Ok(_) | Err(StoreError::Backend { status: 404, .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn public_url(&self, bucket: Bucket, path: &str) -> String {
        join_object_url(
            &self.base_url,
            ["storage", "v1", "object", "public", bucket.name()],
            path,
        )
        .into()
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let response = self
            .client
            .get(self.table_url(ACTORS_TABLE))
            .headers(self.auth_headers()?)
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}
