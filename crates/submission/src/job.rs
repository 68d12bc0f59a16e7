//! Job offer workflows: plain submission and the invitation flow that also
//! stores a script file.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use voicematch_core::media::UploadFile;
use voicematch_core::types::{RecordId, Timestamp};
use voicematch_core::validation::{validate_field, RuleTable};
use voicematch_db::models::job::{Job, NewJob};
use voicematch_db::{Bucket, DataStore};

use crate::input::JobInput;
use crate::result::{settle, SubmissionError, SubmissionResult};
use crate::saga::{Saga, Stage};
use crate::script::{check_script, SCRIPT_UPLOAD_FAILED};

const WORKFLOW: &str = "create_job";
const INVITE_WORKFLOW: &str = "invite_actor";

const INSERT_FAILED: &str = "Failed to create job. Please try again.";

/// Submit a job offer whose script (if any) is already stored.
pub async fn submit_job(
    store: &dyn DataStore,
    rules: &RuleTable,
    input: JobInput,
) -> SubmissionResult<Job> {
    settle(WORKFLOW, async {
        let now = Utc::now();
        let record = validate_job(&input, rules, now).map_err(SubmissionError::Validation)?;
        insert_job(store, &record).await
    })
    .await
}

/// Invite `actor_id` to a job, storing `script` first when given.
///
/// The job is validated before anything is uploaded. When the insert fails
/// the stored script is removed again.
pub async fn invite_actor(
    store: &dyn DataStore,
    rules: &RuleTable,
    actor_id: RecordId,
    mut input: JobInput,
    script: Option<UploadFile>,
) -> SubmissionResult<Job> {
    input.actor_id = actor_id;
    settle(INVITE_WORKFLOW, async {
        let now = Utc::now();
        let mut record =
            validate_job(&input, rules, now).map_err(SubmissionError::Validation)?;

        let mut saga = Saga::new(store, INVITE_WORKFLOW);
        let outcome = async {
            if let Some(file) = script.as_ref() {
                saga.advance(Stage::UploadingMedia);
                check_script(file)?;
                let object = saga
                    .upload(Bucket::JobScripts, file)
                    .await
                    .map_err(|e| SubmissionError::storage(SCRIPT_UPLOAD_FAILED, e))?;
                record.script_url = object.path;
            }
            saga.advance(Stage::Persisting);
            insert_job(saga.store(), &record).await
        }
        .await;
        saga.finish(outcome).await
    })
    .await
}

/// Check every job field against `rules`, collecting all failures.
///
/// `now` is both the lower bound for the deadline and the submission time of
/// the returned record.
pub fn validate_job(
    input: &JobInput,
    rules: &RuleTable,
    now: Timestamp,
) -> Result<NewJob, Vec<String>> {
    let mut errors = Vec::new();

    if let Some(e) = validate_field("Project name", input.project_name.as_ref(), &rules.title) {
        errors.push(e);
    }

    if input.category.is_none() {
        errors.push("Category is required".to_string());
    }

    if input.voice_gender.is_none() {
        errors.push("Voice gender is required".to_string());
    }

    let budget = input.budget.filter(|b| *b > 0.0);
    if budget.is_none() {
        errors.push("Budget must be greater than 0".to_string());
    }

    let deadline = match input.deadline.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push("Deadline is required".to_string());
            None
        }
        Some(text) => match parse_deadline(text) {
            None => {
                errors.push("Deadline must be a valid date".to_string());
                None
            }
            Some(deadline) if deadline <= now => {
                errors.push("Deadline must be in the future".to_string());
                None
            }
            Some(deadline) => Some(deadline),
        },
    };

    let length = input.estimated_length_minutes.filter(|m| *m > 0);
    if length.is_none() {
        errors.push("Estimated length must be greater than 0".to_string());
    }

    match (
        input.project_name.as_ref(),
        input.category,
        input.voice_gender,
        budget,
        deadline,
        length,
    ) {
        (Some(project_name), Some(category), Some(voice_gender), Some(budget), Some(deadline), Some(length))
            if errors.is_empty() =>
        {
            Ok(NewJob {
                actor_id: input.actor_id,
                project_name: project_name.clone(),
                category,
                character_traits: input.character_traits.clone(),
                language: input.language.clone(),
                accent: input.accent.clone(),
                voice_gender,
                script_url: input.script_url.clone(),
                estimated_length_minutes: length,
                deadline,
                budget,
                approval_process: input.approval_process.clone(),
                submitted_at: now,
            })
        }
        _ => Err(errors),
    }
}

/// Parse a deadline as RFC 3339, a `YYYY-MM-DDTHH:MM[:SS]` local form read
/// as UTC, or a bare date at midnight UTC.
pub fn parse_deadline(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

async fn insert_job(store: &dyn DataStore, record: &NewJob) -> Result<Job, SubmissionError> {
    let job = store
        .insert_job(record)
        .await
        .map_err(|e| SubmissionError::storage(INSERT_FAILED, e))?;
    tracing::info!(job_id = %job.id, actor_id = %job.actor_id, "Job created");
    Ok(job)
}
