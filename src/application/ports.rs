use async_trait::async_trait;
use crate::domain::{
    detection::Detection,
    errors::DomainResult,
    image::{ImageRef, ResolvedImage},
    model::ModelId,
};

/// Object detector backing the analysis. Thresholding by confidence is the
/// detector's job; callers never re-filter what it returns.
#[async_trait]
pub trait DetectorPort: Send + Sync {
    async fn load(&self) -> DomainResult<()>;
    async fn detect(&self, image: &ResolvedImage, confidence_threshold: f32) -> DomainResult<Vec<Detection>>;
    fn is_loaded(&self) -> bool;
    fn model_version(&self) -> String;
}

#[async_trait]
pub trait ImageStorePort: Send + Sync {
    async fn resolve(&self, image: &ImageRef) -> DomainResult<ResolvedImage>;
}

#[async_trait]
pub trait ModelCatalogPort: Send + Sync {
    async fn validate_model(&self, model: &ModelId) -> DomainResult<()>;
}
