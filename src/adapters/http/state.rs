use std::sync::Arc;
use crate::application::services::AnalysisService;

/// Shared state for the axum handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Image analysis use case (detector + aggregation + keywords).
    pub analysis: Arc<AnalysisService>,
}
