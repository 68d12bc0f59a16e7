use std::sync::Arc;

use voicematch_core::validation::RuleTable;
use voicematch_db::DataStore;
use voicematch_submission::Submissions;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Data store used by the read endpoints.
    pub store: Arc<dyn DataStore>,
    /// Submission workflows bound to the same store.
    pub submissions: Submissions,
}

impl AppState {
    /// Wire the workflows to `store` with the default rule table.
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        let submissions = Submissions::new(Arc::clone(&store), Arc::new(RuleTable::default()));
        Self { store, submissions }
    }
}
