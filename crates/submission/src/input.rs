//! Candidate records accepted by the submission workflows.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use voicematch_core::catalog::{Category, ReplyTime, VoiceGender};
use voicematch_core::media::UploadFile;
use voicematch_core::types::RecordId;

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// A new actor profile as entered by the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActorInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub past_clients: Vec<String>,
    pub typical_reply_time: ReplyTime,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
}

/// A titled audio sample attached to an actor submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSampleInput {
    pub file: UploadFile,
    pub title: String,
}

impl AudioSampleInput {
    /// Whether the sample was filled in: a non-empty file and a non-blank
    /// title. Unfilled samples are dropped before validation.
    pub fn is_filled(&self) -> bool {
        !self.file.is_empty() && !self.title.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// A job offer for one actor, as entered by the user.
///
/// Required fields are optional here so that missing values surface as
/// validation messages instead of decode failures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobInput {
    pub actor_id: RecordId,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "traits_list_or_text")]
    pub character_traits: Vec<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub accent: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub voice_gender: Option<VoiceGender>,
    #[serde(default)]
    pub script_url: String,
    #[serde(default)]
    pub estimated_length_minutes: Option<i32>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub approval_process: String,
}

/// Split a comma-separated trait list, trimming entries and dropping blanks.
pub fn parse_traits(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn traits_list_or_text<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Traits {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<Traits>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Traits::Text(text)) => parse_traits(&text),
        Some(Traits::List(items)) => items
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Treat `null`, `""` and whitespace as absent; parse anything else by label.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ACTOR_ID: &str = "0b7e7c1e-9a0b-4f0e-8a8e-2f1f4b1f6c11";

    #[test]
    fn traits_from_comma_text() {
        assert_eq!(
            parse_traits(" gruff, warm ,, elderly ,"),
            vec!["gruff", "warm", "elderly"]
        );
        assert!(parse_traits("  ").is_empty());
    }

    #[test]
    fn job_input_accepts_traits_as_text_or_list() {
        let from_text: JobInput = serde_json::from_value(json!({
            "actor_id": ACTOR_ID,
            "character_traits": "bold, playful"
        }))
        .unwrap();
        assert_eq!(from_text.character_traits, vec!["bold", "playful"]);

        let from_list: JobInput = serde_json::from_value(json!({
            "actor_id": ACTOR_ID,
            "character_traits": [" bold ", ""]
        }))
        .unwrap();
        assert_eq!(from_list.character_traits, vec!["bold"]);
    }

    #[test]
    fn blank_enum_fields_are_absent() {
        let input: JobInput = serde_json::from_value(json!({
            "actor_id": ACTOR_ID,
            "category": "",
            "voice_gender": null
        }))
        .unwrap();
        assert_eq!(input.category, None);
        assert_eq!(input.voice_gender, None);
        assert!(input.character_traits.is_empty());
    }

    #[test]
    fn unknown_enum_value_is_a_decode_error() {
        let err = serde_json::from_value::<JobInput>(json!({
            "actor_id": ACTOR_ID,
            "voice_gender": "Robot"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Unknown voice gender"));
    }

    #[test]
    fn actor_input_defaults() {
        let input: ActorInput = serde_json::from_value(json!({
            "name": "Ana",
            "categories": ["Animation"],
            "typical_reply_time": "1 day"
        }))
        .unwrap();
        assert_eq!(input.categories, vec![Category::Animation]);
        assert!(input.certifications.is_empty());
        assert_eq!(input.hourly_rate, None);
    }

    #[test]
    fn sample_filled_rules() {
        let file = UploadFile::new("a.mp3", "audio/mpeg", vec![1]);
        let empty = UploadFile::new("a.mp3", "audio/mpeg", vec![]);
        assert!(AudioSampleInput { file: file.clone(), title: "Demo".into() }.is_filled());
        assert!(!AudioSampleInput { file: file.clone(), title: "   ".into() }.is_filled());
        assert!(!AudioSampleInput { file: empty, title: "Demo".into() }.is_filled());
    }
}
