use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::{AnalysisOptions, AnalysisReport},
    image::ImageRef,
    summary::ClassCounts,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessOptions {
    #[serde(default)]
    pub confidence_threshold: Option<f32>,
    #[serde(default)]
    pub max_objects: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub options: Option<ProcessOptions>,
}

impl ProcessRequest {
    /// Splits the request into domain values; `Err` carries the reason it is unusable.
    pub fn into_parts(self) -> Result<(ImageRef, AnalysisOptions), String> {
        let path = self
            .image_path
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| "image_path is required".to_string())?;

        let opts = self.options.unwrap_or_default();
        let max_objects = match opts.max_objects {
            Some(n) if n < 1 => return Err(format!("max_objects must be at least 1, got {}", n)),
            Some(n) => Some(n as usize),
            None => None,
        };

        Ok((
            ImageRef { path },
            AnalysisOptions {
                confidence_threshold: opts.confidence_threshold,
                max_objects,
            },
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub object_counts: ClassCounts,
    pub keywords: Vec<String>,
    pub total_objects: usize,
    pub confidence: f64,
    pub processing_time: f64,
    pub model_version: String,
}

impl From<AnalysisReport> for ProcessResponse {
    fn from(r: AnalysisReport) -> Self {
        Self {
            success: true,
            object_counts: r.summary.counts,
            keywords: r.keywords,
            total_objects: r.summary.total,
            confidence: r.summary.confidence,
            processing_time: r.processing_time,
            model_version: r.model_version,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { success: false, error: error.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub model_loaded: bool,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_path_is_rejected() {
        assert!(ProcessRequest::default().into_parts().is_err());
        let req = ProcessRequest { image_path: Some("  ".into()), options: None };
        assert_eq!(req.into_parts().unwrap_err(), "image_path is required");
    }

    #[test]
    fn non_positive_budget_is_rejected() {
        let req: ProcessRequest =
            serde_json::from_str(r#"{"image_path":"a.jpg","options":{"max_objects":-3}}"#).unwrap();
        assert!(req.into_parts().unwrap_err().contains("max_objects"));
    }

    #[test]
    fn options_are_optional() {
        let req: ProcessRequest = serde_json::from_str(r#"{"image_path":"uploads/a.jpg"}"#).unwrap();
        let (image, options) = req.into_parts().unwrap();
        assert_eq!(image.path, "uploads/a.jpg");
        assert_eq!(options, AnalysisOptions::default());

        let req: ProcessRequest = serde_json::from_str(
            r#"{"image_path":"a.jpg","options":{"confidence_threshold":0.3,"max_objects":5}}"#,
        )
        .unwrap();
        let (_, options) = req.into_parts().unwrap();
        assert_eq!(options.confidence_threshold, Some(0.3));
        assert_eq!(options.max_objects, Some(5));
    }
}
