use async_trait::async_trait;
use std::path::Path;

use crate::application::ports::ModelCatalogPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::ModelId;

/// Checks that a model reference points at a readable `.onnx` file.
#[derive(Default)]
pub struct OnnxModelCatalog;

impl OnnxModelCatalog {
    pub fn new() -> Self { Self }
}

#[async_trait]
impl ModelCatalogPort for OnnxModelCatalog {
    async fn validate_model(&self, model: &ModelId) -> DomainResult<()> {
        let path = Path::new(model.onnx_path.trim());
        if path.as_os_str().is_empty() {
            return Err(DomainError::InvalidInput("MODEL_PATH is empty".into()));
        }
        let is_onnx = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("onnx"))
            .unwrap_or(false);
        if !is_onnx {
            return Err(DomainError::InvalidInput(format!(
                "model '{}' is not an .onnx export",
                model.onnx_path
            )));
        }
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(DomainError::NotFound(format!("model file not found: {}", model.onnx_path)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_empty_wrong_type_and_missing() {
        let catalog = OnnxModelCatalog::new();

        let err = catalog.validate_model(&ModelId::from_path(" ")).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let err = catalog.validate_model(&ModelId::from_path("models/yolov8n.pt")).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));

        let err = catalog.validate_model(&ModelId::from_path("/nowhere/yolov8n.onnx")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn accepts_existing_onnx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("yolov8n.onnx");
        std::fs::write(&path, b"onnx").unwrap();

        let model = ModelId::from_path(path.to_string_lossy());
        assert!(OnnxModelCatalog::new().validate_model(&model).await.is_ok());
    }
}
