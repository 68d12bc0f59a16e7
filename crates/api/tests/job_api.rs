//! Integration tests for job submission, invitations and script uploads.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, post_json, post_multipart, seed_actor, MultipartBody};
use serde_json::json;
use uuid::Uuid;
use voicematch_core::catalog::Category;
use voicematch_db::Bucket;

fn job_body(actor_id: Uuid) -> serde_json::Value {
    json!({
        "actor_id": actor_id,
        "project_name": "Orbit Kids S2",
        "category": "Animation",
        "character_traits": "curious, upbeat",
        "language": "English",
        "accent": "American",
        "voice_gender": "Any",
        "script_url": "",
        "estimated_length_minutes": 12,
        "deadline": (Utc::now() + Duration::days(14)).to_rfc3339(),
        "budget": 900.0,
        "approval_process": "Director sign-off"
    })
}

fn invitation_form() -> MultipartBody {
    MultipartBody::new()
        .text("project_name", "Orbit Kids S2")
        .text("category", "Animation")
        .text("character_traits", "curious, upbeat")
        .text("voice_gender", "Female")
        .text("estimated_length_minutes", "12")
        .text("deadline", &(Utc::now() + Duration::days(3)).format("%Y-%m-%dT%H:%M").to_string())
        .text("budget", "450")
}

// ---------------------------------------------------------------------------
// POST /api/v1/jobs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_job_returns_201() {
    let (app, store) = common::build_test_app();
    let actor = seed_actor(&store, "Anna Berg", vec![Category::Animation], 4.0).await;

    let response = post_json(app, "/api/v1/jobs", job_body(actor.id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["actor_id"], actor.id.to_string());
    assert_eq!(json["data"]["character_traits"], json!(["curious", "upbeat"]));
    assert_eq!(json["data"]["voice_gender"], "Any");
    assert!(json["data"]["submitted_at"].is_string());
    assert_eq!(store.job_count().await, 1);
}

#[tokio::test]
async fn zero_budget_is_rejected_without_insert() {
    let (app, store) = common::build_test_app();
    let actor = seed_actor(&store, "Anna Berg", vec![Category::Animation], 4.0).await;
    let mut body = job_body(actor.id);
    body["budget"] = json!(0);

    let response = post_json(app, "/api/v1/jobs", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"], json!(["Budget must be greater than 0"]));
    assert_eq!(store.job_count().await, 0);
}

#[tokio::test]
async fn all_job_errors_are_reported() {
    let (app, _store) = common::build_test_app();
    let body = json!({ "actor_id": Uuid::new_v4(), "deadline": "2001-01-01" });

    let json = body_json(post_json(app, "/api/v1/jobs", body).await).await;
    assert_eq!(
        json["errors"],
        json!([
            "Project name is required",
            "Category is required",
            "Voice gender is required",
            "Budget must be greater than 0",
            "Deadline must be in the future",
            "Estimated length must be greater than 0"
        ])
    );
}

#[tokio::test]
async fn job_for_unknown_actor_reports_generic_failure() {
    let (app, store) = common::build_test_app();

    let response = post_json(app, "/api/v1/jobs", job_body(Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"], json!(["Failed to create job. Please try again."]));
    assert_eq!(store.job_count().await, 0);
}

#[tokio::test]
async fn unknown_voice_gender_is_bad_request() {
    let (app, _store) = common::build_test_app();
    let mut body = job_body(Uuid::new_v4());
    body["voice_gender"] = json!("Robot");

    let response = post_json(app, "/api/v1/jobs", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// POST /api/v1/actors/{id}/invitations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invitation_stores_script_and_job() {
    let (app, store) = common::build_test_app();
    let actor = seed_actor(&store, "Anna Berg", vec![Category::Animation], 4.0).await;
    let form = invitation_form().file("script", "ep1.txt", "text/plain", b"INT. SPACESHIP - DAY");

    let response = post_multipart(app, &format!("/api/v1/actors/{}/invitations", actor.id), form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let script_url = json["data"]["script_url"].as_str().unwrap().to_string();
    assert!(script_url.starts_with("scripts/"));
    assert_eq!(store.object_paths(Bucket::JobScripts).await, vec![script_url]);
    assert_eq!(json["data"]["character_traits"], json!(["curious", "upbeat"]));
    assert_eq!(store.job_count().await, 1);
}

#[tokio::test]
async fn failed_invitation_removes_script() {
    let (app, store) = common::build_test_app();
    let form = invitation_form().file("script", "ep1.pdf", "application/pdf", b"%PDF-1.4");

    let uri = format!("/api/v1/actors/{}/invitations", Uuid::new_v4());
    let response = post_multipart(app, &uri, form).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.object_paths(Bucket::JobScripts).await.is_empty());
}

#[tokio::test]
async fn invitation_without_script() {
    let (app, store) = common::build_test_app();
    let actor = seed_actor(&store, "Anna Berg", vec![Category::Animation], 4.0).await;

    let response = post_multipart(
        app,
        &format!("/api/v1/actors/{}/invitations", actor.id),
        invitation_form(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["script_url"], "");
}

// ---------------------------------------------------------------------------
// POST /api/v1/scripts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_script_returns_path_and_url() {
    let (app, store) = common::build_test_app();
    let form = MultipartBody::new().file("file", "ep2.pdf", "application/pdf", b"%PDF-1.7");

    let response = post_multipart(app, "/api/v1/scripts", form).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let path = json["data"]["path"].as_str().unwrap();
    assert!(path.starts_with("scripts/") && path.ends_with("-ep2.pdf"));
    assert_eq!(
        json["data"]["url"],
        format!("http://localhost:3000/storage/job-scripts/{path}")
    );
    assert_eq!(store.object_paths(Bucket::JobScripts).await.len(), 1);
}

#[tokio::test]
async fn upload_script_rejects_images() {
    let (app, _store) = common::build_test_app();
    let form = MultipartBody::new().file("file", "ep2.png", "image/png", &[1]);

    let response = post_multipart(app, "/api/v1/scripts", form).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["errors"][0]
        .as_str()
        .unwrap()
        .starts_with("Invalid script format."));
}

#[tokio::test]
async fn upload_script_without_file_is_bad_request() {
    let (app, _store) = common::build_test_app();
    let form = MultipartBody::new().text("note", "forgot the file");

    let response = post_multipart(app, "/api/v1/scripts", form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing required 'file' field");
}
