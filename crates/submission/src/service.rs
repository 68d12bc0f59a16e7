//! Shared entry point for the HTTP layer.

use std::sync::Arc;

use voicematch_core::media::UploadFile;
use voicematch_core::types::RecordId;
use voicematch_core::validation::RuleTable;
use voicematch_db::models::actor::VoiceActor;
use voicematch_db::models::job::Job;
use voicematch_db::DataStore;

use crate::input::{ActorInput, AudioSampleInput, JobInput};
use crate::result::SubmissionResult;
use crate::script::UploadedScript;

/// The submission workflows bound to one store and one rule table.
///
/// Cheap to clone; every submission runs on its own task with no state
/// shared beyond the store handle.
#[derive(Clone)]
pub struct Submissions {
    store: Arc<dyn DataStore>,
    rules: Arc<RuleTable>,
}

impl Submissions {
    pub fn new(store: Arc<dyn DataStore>, rules: Arc<RuleTable>) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub async fn submit_actor(
        &self,
        input: ActorInput,
        picture: Option<UploadFile>,
        samples: Vec<AudioSampleInput>,
    ) -> SubmissionResult<VoiceActor> {
        crate::actor::submit_actor(self.store.as_ref(), &self.rules, input, picture, samples).await
    }

    pub async fn submit_job(&self, input: JobInput) -> SubmissionResult<Job> {
        crate::job::submit_job(self.store.as_ref(), &self.rules, input).await
    }

    pub async fn invite_actor(
        &self,
        actor_id: RecordId,
        input: JobInput,
        script: Option<UploadFile>,
    ) -> SubmissionResult<Job> {
        crate::job::invite_actor(self.store.as_ref(), &self.rules, actor_id, input, script).await
    }

    pub async fn upload_script(&self, file: UploadFile) -> SubmissionResult<UploadedScript> {
        crate::script::upload_script(self.store.as_ref(), file).await
    }
}
