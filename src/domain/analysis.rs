use super::summary::Summary;

/// Outcome of one `/process` request.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub summary: Summary,
    pub keywords: Vec<String>,
    /// Seconds, rounded to two decimals.
    pub processing_time: f64,
    pub model_version: String,
}

/// Per-request tuning; `None` falls back to the service defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisOptions {
    pub confidence_threshold: Option<f32>,
    pub max_objects: Option<usize>,
}
