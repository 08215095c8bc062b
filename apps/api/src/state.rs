use std::sync::Arc;

use crate::matching::pipeline::MatchPipeline;

/// Shared application state injected into route handlers via Axum extractors.
/// Nothing here is mutable — the service keeps no state between requests.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<MatchPipeline>,
}
