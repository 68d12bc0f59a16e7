//! Voice actor models and search filters.

use serde::{Deserialize, Serialize};
use voicematch_core::catalog::{Category, ReplyTime};
use voicematch_core::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (backend rows)
// ---------------------------------------------------------------------------

/// A titled audio sample attached to an actor profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSample {
    pub title: String,
    pub url: String,
}

/// A row from the `voice_actors` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceActor {
    pub id: RecordId,
    pub name: String,
    pub location: String,
    pub rating: f64,
    pub review_count: i32,
    pub profile_picture_url: String,
    pub bio: String,
    pub categories: Vec<Category>,
    pub audio_samples: Vec<AudioSample>,
    pub certifications: Vec<String>,
    pub last_online: Timestamp,
    pub typical_reply_time: ReplyTime,
    #[serde(default)]
    pub last_hired: Option<Timestamp>,
    pub completed_jobs: i32,
    pub past_clients: Vec<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Insert payload for `voice_actors`. The backend assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVoiceActor {
    pub name: String,
    pub location: String,
    pub bio: String,
    pub categories: Vec<Category>,
    pub certifications: Vec<String>,
    pub past_clients: Vec<String>,
    pub typical_reply_time: ReplyTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    pub profile_picture_url: String,
    pub audio_samples: Vec<AudioSample>,
    pub rating: f64,
    pub review_count: i32,
    pub completed_jobs: i32,
    pub last_online: Timestamp,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Marketplace search filters. Every filter is optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorFilters {
    /// Case-insensitive substring of the actor name.
    pub search_query: Option<String>,
    /// The actor must offer all of these categories.
    pub categories: Vec<Category>,
    /// Minimum average rating (inclusive).
    pub min_rating: Option<f64>,
}

impl ActorFilters {
    /// Trimmed search query, or `None` when blank.
    pub fn query(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Whether `actor` satisfies every filter.
    pub fn matches(&self, actor: &VoiceActor) -> bool {
        if let Some(q) = self.query() {
            if !actor.name.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        if !self.categories.iter().all(|c| actor.categories.contains(c)) {
            return false;
        }
        match self.min_rating {
            Some(min) => actor.rating >= min,
            None => true,
        }
    }
}
