#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use voicematch_api::config::{ServerConfig, StoreConfig};
use voicematch_api::router::build_app_router;
use voicematch_api::state::AppState;
use voicematch_core::catalog::{Category, ReplyTime};
use voicematch_db::memory::MemoryStore;
use voicematch_db::models::actor::{NewVoiceActor, VoiceActor};
use voicematch_db::DataStore;

pub const BOUNDARY: &str = "voicematch-test-boundary";

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_upload_bytes: 64 * 1024 * 1024,
        store: StoreConfig::Memory {
            public_base: "http://localhost:3000/storage".to_string(),
        },
    }
}

/// Build the full application router over a fresh [`MemoryStore`].
///
/// The store is returned as well so tests can seed rows and inspect what
/// was written.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    build_test_app_with(test_config())
}

/// Same as [`build_test_app`] with a caller-supplied configuration.
pub fn build_test_app_with(config: ServerConfig) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone());
    (build_app_router(state, &config), store)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, form: MultipartBody) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(form.finish()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.bytes
    }
}

/// Insert an actor directly into the store.
pub async fn seed_actor(
    store: &MemoryStore,
    name: &str,
    categories: Vec<Category>,
    rating: f64,
) -> VoiceActor {
    store
        .insert_actor(&NewVoiceActor {
            name: name.to_string(),
            location: "Remote".to_string(),
            bio: String::new(),
            categories,
            certifications: vec![],
            past_clients: vec![],
            typical_reply_time: ReplyTime::OneToTwoHours,
            hourly_rate: None,
            profile_picture_url: String::new(),
            audio_samples: vec![],
            rating,
            review_count: 0,
            completed_jobs: 0,
            last_online: Utc::now(),
        })
        .await
        .unwrap()
}
