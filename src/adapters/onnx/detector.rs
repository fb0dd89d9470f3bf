use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use crate::adapters::onnx::yolo_engine::OnnxYoloEngine;
use crate::application::ports::DetectorPort;
use crate::domain::{
    detection::Detection,
    errors::{DomainError, DomainResult},
    image::ResolvedImage,
    model::{ModelId, YoloParams},
};

/// Single shared YOLO session. Inference runs on the blocking pool and is
/// serialized through the session lock; a session that failed to load at
/// startup is retried on the next request.
pub struct OnnxDetector {
    model: ModelId,
    params: YoloParams,
    engine: Arc<Mutex<Option<OnnxYoloEngine>>>,
    loaded: Arc<AtomicBool>,
}

impl OnnxDetector {
    pub fn new(model: ModelId, params: YoloParams) -> Self {
        Self {
            model,
            params,
            engine: Arc::new(Mutex::new(None)),
            loaded: Arc::new(AtomicBool::new(false)),
        }
    }
}

fn load_into(slot: &mut Option<OnnxYoloEngine>, onnx_path: &str) -> anyhow::Result<()> {
    if slot.is_none() {
        info!("Loading YOLO model: {}", onnx_path);
        *slot = Some(OnnxYoloEngine::load(onnx_path)?);
        info!("YOLO model loaded");
    }
    Ok(())
}

#[async_trait]
impl DetectorPort for OnnxDetector {
    async fn load(&self) -> DomainResult<()> {
        let engine = self.engine.clone();
        let loaded = self.loaded.clone();
        let onnx_path = self.model.onnx_path.clone();

        tokio::task::spawn_blocking(move || -> DomainResult<()> {
            let mut slot = engine
                .lock()
                .map_err(|_| DomainError::OperationFailed("model lock poisoned".into()))?;
            load_into(&mut slot, &onnx_path).map_err(|e| {
                error!("Model load failed: {:?}", e);
                DomainError::OperationFailed(format!("model load failed: {}", e))
            })?;
            loaded.store(true, Ordering::Release);
            Ok(())
        })
        .await
        .map_err(|e| DomainError::OperationFailed(e.to_string()))?
    }

    async fn detect(&self, image: &ResolvedImage, confidence_threshold: f32) -> DomainResult<Vec<Detection>> {
        let engine = self.engine.clone();
        let loaded = self.loaded.clone();
        let onnx_path = self.model.onnx_path.clone();
        let path: PathBuf = image.path.clone();
        let params = YoloParams {
            conf_threshold: confidence_threshold,
            ..self.params.clone()
        };

        tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<Detection>> {
            let rgb = image::open(&path)
                .with_context(|| format!("cannot decode image {}", path.display()))?
                .to_rgb8();

            let mut slot = engine
                .lock()
                .map_err(|_| anyhow::anyhow!("model lock poisoned"))?;
            load_into(&mut slot, &onnx_path)?;
            loaded.store(true, Ordering::Release);
            let yolo = slot.as_mut().context("model not loaded")?;
            yolo.infer(&rgb, &params)
        })
        .await
        .map_err(|e| DomainError::OperationFailed(e.to_string()))?
        .map_err(|e| {
            error!("Detection failed: {:?}", e);
            DomainError::OperationFailed(format!("processing error: {}", e))
        })
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    fn model_version(&self) -> String {
        self.model.name.clone()
    }
}
