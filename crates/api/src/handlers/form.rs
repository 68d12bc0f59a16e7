//! Buffered multipart form reading for the submission endpoints.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::str::FromStr;

use axum::extract::Multipart;
use voicematch_core::media::UploadFile;
use voicematch_submission::AudioSampleInput;

use crate::error::{AppError, AppResult};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// All parts of a multipart form, read into memory.
///
/// Text parts may repeat. File parts with no content are treated as absent.
#[derive(Debug, Default)]
pub struct FormParts {
    texts: HashMap<String, Vec<String>>,
    files: HashMap<String, UploadFile>,
}

impl FormParts {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut parts = FormParts::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or(FALLBACK_CONTENT_TYPE)
                        .to_string();
                    let bytes = field.bytes().await?;
                    if bytes.is_empty() {
                        continue;
                    }
                    parts
                        .files
                        .insert(name, UploadFile::new(file_name, content_type, bytes.to_vec()));
                }
                None => {
                    let text = field.text().await?;
                    parts.texts.entry(name).or_default().push(text);
                }
            }
        }

        Ok(parts)
    }

    /// First value of a text part, trimmed. Blank counts as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.texts
            .get(name)
            .and_then(|values| values.first())
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Every value of a repeated part, with comma-separated values split.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.texts
            .get(name)
            .into_iter()
            .flatten()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Parse an optional text part. A malformed value is a bad request.
    pub fn parse<T>(&self, name: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.text(name)
            .map(|v| {
                v.parse()
                    .map_err(|e| AppError::BadRequest(format!("Invalid value for '{name}': {e}")))
            })
            .transpose()
    }

    /// Parse every entry of a list part.
    pub fn parse_list<T>(&self, name: &str) -> AppResult<Vec<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.list(name)
            .iter()
            .map(|v| {
                v.parse()
                    .map_err(|e| AppError::BadRequest(format!("Invalid value for '{name}': {e}")))
            })
            .collect()
    }

    pub fn take_file(&mut self, name: &str) -> Option<UploadFile> {
        self.files.remove(name)
    }

    /// Collect `audio_samples[N][file]` / `audio_samples[N][title]` pairs in
    /// index order. A slot missing its file gets an empty one so it is
    /// dropped by the workflow like any other unfilled sample.
    pub fn take_audio_samples(&mut self) -> Vec<AudioSampleInput> {
        let mut slots: BTreeMap<usize, (Option<UploadFile>, String)> = BTreeMap::new();

        let file_keys: Vec<String> = self.files.keys().cloned().collect();
        for key in file_keys {
            if let Some((index, "file")) = sample_slot(&key) {
                let file = self.files.remove(&key);
                slots.entry(index).or_default().0 = file;
            }
        }
        for (key, values) in &self.texts {
            if let Some((index, "title")) = sample_slot(key) {
                slots.entry(index).or_default().1 = values.first().cloned().unwrap_or_default();
            }
        }

        slots
            .into_values()
            .map(|(file, title)| AudioSampleInput {
                file: file.unwrap_or_else(|| UploadFile::new("", FALLBACK_CONTENT_TYPE, Vec::new())),
                title: title.trim().to_string(),
            })
            .collect()
    }
}

/// Split `audio_samples[3][title]` into `(3, "title")`.
fn sample_slot(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix("audio_samples[")?;
    let (index, rest) = rest.split_once("][")?;
    let key = rest.strip_suffix(']')?;
    Some((index.parse().ok()?, key))
}
