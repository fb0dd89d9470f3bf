use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::{
    application::ports::{DetectorPort, ImageStorePort, ModelCatalogPort},
    domain::{
        analysis::{AnalysisOptions, AnalysisReport},
        errors::{DomainError, DomainResult},
        image::ImageRef,
        keywords::infer_keywords,
        model::ModelId,
        summary::{round2, summarize},
    },
};

/// Fallback values for options the caller leaves out.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisDefaults {
    pub confidence_threshold: f32,
    pub max_objects: usize,
}

/// Image analysis use case: resolve → detect → summarize → infer keywords.
#[derive(Clone)]
pub struct AnalysisService {
    detector: Arc<dyn DetectorPort>,
    images: Arc<dyn ImageStorePort>,
    model_catalog: Arc<dyn ModelCatalogPort>,
    model: ModelId,
    defaults: AnalysisDefaults,
}

impl AnalysisService {
    pub fn new(
        detector: Arc<dyn DetectorPort>,
        images: Arc<dyn ImageStorePort>,
        model_catalog: Arc<dyn ModelCatalogPort>,
        model: ModelId,
        defaults: AnalysisDefaults,
    ) -> Self {
        Self {
            detector,
            images,
            model_catalog,
            model,
            defaults,
        }
    }

    /// Checks the configured model and loads it into the detector.
    pub async fn warm_up(&self) -> DomainResult<()> {
        self.model_catalog.validate_model(&self.model).await?;
        self.detector.load().await
    }

    pub fn model_loaded(&self) -> bool {
        self.detector.is_loaded()
    }

    pub async fn analyze(&self, image: ImageRef, options: AnalysisOptions) -> DomainResult<AnalysisReport> {
        let started = Instant::now();

        // An explicit 0 means "not set", as with an omitted option.
        let confidence_threshold = options
            .confidence_threshold
            .filter(|t| *t != 0.0)
            .unwrap_or(self.defaults.confidence_threshold);
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(DomainError::InvalidInput(format!(
                "confidence_threshold must be between 0 and 1, got {}",
                confidence_threshold
            )));
        }
        let max_objects = options.max_objects.unwrap_or(self.defaults.max_objects);
        if max_objects == 0 {
            return Err(DomainError::InvalidInput("max_objects must be at least 1".into()));
        }

        let resolved = self.images.resolve(&image).await?;
        info!("Starting analysis of {}", resolved.path.display());

        let detections = self.detector.detect(&resolved, confidence_threshold).await?;
        if detections.len() > max_objects {
            warn!(
                "Too many objects detected ({}), keeping the {} most confident",
                detections.len(),
                max_objects
            );
        }

        let summary = summarize(detections, max_objects);
        let keywords = infer_keywords(&summary.counts);
        let processing_time = round2(started.elapsed().as_secs_f64());

        info!(
            "Analysis finished: {} objects, {:.2}s",
            summary.total, processing_time
        );

        Ok(AnalysisReport {
            summary,
            keywords,
            processing_time,
            model_version: self.detector.model_version(),
        })
    }
}
