//! Job models.

use serde::{Deserialize, Serialize};
use voicematch_core::catalog::{Category, VoiceGender};
use voicematch_core::types::{RecordId, Timestamp};

/// A row from the `jobs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    pub actor_id: RecordId,
    pub project_name: String,
    pub category: Category,
    pub character_traits: Vec<String>,
    pub language: String,
    pub accent: String,
    pub voice_gender: VoiceGender,
    pub script_url: String,
    pub estimated_length_minutes: i32,
    pub deadline: Timestamp,
    pub budget: f64,
    pub approval_process: String,
    pub submitted_at: Timestamp,
}

/// Insert payload for `jobs`. The backend assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewJob {
    pub actor_id: RecordId,
    pub project_name: String,
    pub category: Category,
    pub character_traits: Vec<String>,
    pub language: String,
    pub accent: String,
    pub voice_gender: VoiceGender,
    pub script_url: String,
    pub estimated_length_minutes: i32,
    pub deadline: Timestamp,
    pub budget: f64,
    pub approval_process: String,
    pub submitted_at: Timestamp,
}
