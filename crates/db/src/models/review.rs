use serde::{Deserialize, Serialize};
use voicematch_core::types::{RecordId, Timestamp};

/// A row from the `reviews` table. Reviews are read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: RecordId,
    pub actor_id: RecordId,
    pub reviewer_name: String,
    pub rating: f64,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: Timestamp,
}
