//! Query parameter types for API handlers.

use serde::Deserialize;
use voicematch_core::catalog::Category;
use voicematch_core::error::CoreError;
use voicematch_db::models::actor::ActorFilters;

/// `GET /actors?search=&categories=&min_rating=`.
///
/// `categories` is a comma-separated list of category labels.
#[derive(Debug, Default, Deserialize)]
pub struct ActorSearchParams {
    pub search: Option<String>,
    pub categories: Option<String>,
    pub min_rating: Option<f64>,
}

impl ActorSearchParams {
    /// Convert into store filters. Unknown category labels are rejected.
    pub fn into_filters(self) -> Result<ActorFilters, CoreError> {
        let categories = self
            .categories
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::parse::<Category>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ActorFilters {
            search_query: self.search,
            categories,
            min_rating: self.min_rating,
        })
    }
}
