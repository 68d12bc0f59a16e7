//! New actor profile workflow.
//!
//! Validates the profile, uploads the optional profile picture and every
//! filled-in audio sample one at a time, then inserts the actor row with the
//! public URLs of the stored media.

use chrono::Utc;
use voicematch_core::media::{MediaPolicy, MediaViolation, UploadFile, AUDIO_POLICY, IMAGE_POLICY};
use voicematch_core::validation::{validate_field, RuleTable, ValidationRule};
use voicematch_db::models::actor::{AudioSample, NewVoiceActor, VoiceActor};
use voicematch_db::{Bucket, DataStore};

use crate::input::{ActorInput, AudioSampleInput};
use crate::result::{settle, SubmissionError, SubmissionResult};
use crate::saga::{Saga, Stage};

const WORKFLOW: &str = "create_actor";

/// Bounds for an audio sample title.
const SAMPLE_TITLE_RULE: ValidationRule = ValidationRule::between(1, 100);

/// Submit a new actor profile.
pub async fn submit_actor(
    store: &dyn DataStore,
    rules: &RuleTable,
    input: ActorInput,
    picture: Option<UploadFile>,
    samples: Vec<AudioSampleInput>,
) -> SubmissionResult<VoiceActor> {
    settle(WORKFLOW, create_actor(store, rules, input, picture, samples)).await
}

/// Profile-level checks. All failures are collected.
pub fn validate_actor(input: &ActorInput, rules: &RuleTable) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(e) = validate_field("Name", input.name.as_ref(), &rules.name) {
        errors.push(e);
    }
    if let Some(e) = validate_field("Categories", &input.categories, &rules.categories) {
        errors.push(e);
    }
    if input.hourly_rate.is_some_and(|rate| rate < 0.0) {
        errors.push("Hourly rate cannot be negative".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

async fn create_actor(
    store: &dyn DataStore,
    rules: &RuleTable,
    input: ActorInput,
    picture: Option<UploadFile>,
    samples: Vec<AudioSampleInput>,
) -> Result<VoiceActor, SubmissionError> {
    validate_actor(&input, rules).map_err(SubmissionError::Validation)?;

    let samples: Vec<AudioSampleInput> = samples
        .into_iter()
        .filter(AudioSampleInput::is_filled)
        .collect();

    let mut saga = Saga::new(store, WORKFLOW);
    let outcome = store_and_insert(&mut saga, input, picture.as_ref(), &samples).await;
    saga.finish(outcome).await
}

async fn store_and_insert(
    saga: &mut Saga<'_>,
    input: ActorInput,
    picture: Option<&UploadFile>,
    samples: &[AudioSampleInput],
) -> Result<VoiceActor, SubmissionError> {
    saga.advance(Stage::UploadingMedia);

    let mut profile_picture_url = String::new();
    if let Some(file) = picture {
        check_picture(file)?;
        let object = saga
            .upload(Bucket::ProfilePictures, file)
            .await
            .map_err(|e| {
                SubmissionError::storage("Failed to upload profile picture. Please try again.", e)
            })?;
        profile_picture_url = object.public_url;
    }

    tracing::debug!(workflow = WORKFLOW, count = samples.len(), "Uploading audio samples");
    let mut audio_samples = Vec::with_capacity(samples.len());
    for sample in samples {
        check_sample(sample)?;
        let object = saga
            .upload(Bucket::AudioSamples, &sample.file)
            .await
            .map_err(|e| {
                SubmissionError::storage(
                    format!(
                        "Failed to upload audio sample \"{}\". Please try again.",
                        sample.title
                    ),
                    e,
                )
            })?;
        audio_samples.push(AudioSample {
            title: sample.title.clone(),
            url: object.public_url,
        });
    }

    saga.advance(Stage::Persisting);
    let record = NewVoiceActor {
        name: input.name.unwrap_or_default(),
        location: input.location,
        bio: input.bio,
        categories: input.categories,
        certifications: input.certifications,
        past_clients: input.past_clients,
        typical_reply_time: input.typical_reply_time,
        hourly_rate: input.hourly_rate,
        profile_picture_url,
        audio_samples,
        rating: 0.0,
        review_count: 0,
        completed_jobs: 0,
        last_online: Utc::now(),
    };

    let actor = saga.store().insert_actor(&record).await.map_err(|e| {
        SubmissionError::storage("Failed to create voice actor record. Please try again.", e)
    })?;
    tracing::info!(workflow = WORKFLOW, actor_id = %actor.id, "Voice actor created");
    Ok(actor)
}

fn check_picture(file: &UploadFile) -> Result<(), SubmissionError> {
    check_media(&IMAGE_POLICY, file, |policy, violation| match violation {
        MediaViolation::UnsupportedType => format!(
            "Invalid profile picture format. Allowed types are: {}",
            policy.allowed_list()
        ),
        MediaViolation::TooLarge => format!(
            "Profile picture size too large. Maximum size allowed is {}MB",
            policy.max_megabytes()
        ),
    })
}

fn check_sample(sample: &AudioSampleInput) -> Result<(), SubmissionError> {
    if let Some(e) = validate_field("Audio sample title", &sample.title, &SAMPLE_TITLE_RULE) {
        return Err(SubmissionError::Validation(vec![e]));
    }
    check_media(&AUDIO_POLICY, &sample.file, |policy, violation| match violation {
        MediaViolation::UnsupportedType => format!(
            "Invalid audio format for \"{}\". Allowed types are: {}",
            sample.title,
            policy.allowed_list()
        ),
        MediaViolation::TooLarge => format!(
            "Audio file \"{}\" is too large. Maximum size allowed is {}MB",
            sample.title,
            policy.max_megabytes()
        ),
    })
}

/// Run `policy` against `file`, describing a violation with `describe`.
pub(crate) fn check_media(
    policy: &MediaPolicy,
    file: &UploadFile,
    describe: impl FnOnce(&MediaPolicy, MediaViolation) -> String,
) -> Result<(), SubmissionError> {
    policy
        .check(file)
        .map_err(|violation| SubmissionError::Media(describe(policy, violation)))
}
