use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use image_tagger::application::services::AnalysisService;
use image_tagger::adapters::{
    fs::image_store::LocalImageStore,
    onnx::{detector::OnnxDetector, model_catalog::OnnxModelCatalog},
    http::{state::HttpState, router},
};
use image_tagger::config::ServiceConfig;
use image_tagger::domain::model::{ModelId, YoloParams};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Config (loads .env, so RUST_LOG from it applies), then logs (info by default)
    let cfg = ServiceConfig::from_env();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    cfg.log_ignored();
    cfg.validate()?;

    tracing::info!("🔧 Initializing adapters...");

    // 2. Adapters
    let model = ModelId::from_path(cfg.model_path.clone());
    let params = YoloParams {
        input_size: cfg.input_size,
        conf_threshold: cfg.confidence_threshold,
        ..YoloParams::default()
    };
    let detector = Arc::new(OnnxDetector::new(model.clone(), params));
    let images = Arc::new(LocalImageStore::new(cfg.upload_folder.clone()));
    let model_cat = Arc::new(OnnxModelCatalog::new());

    // 3. Use case
    let analysis = Arc::new(AnalysisService::new(
        detector,
        images,
        model_cat,
        model,
        cfg.analysis_defaults(),
    ));

    // The first request retries if this fails.
    if let Err(e) = analysis.warm_up().await {
        tracing::warn!("Model not loaded at startup: {}", e);
    }

    // 4. HTTP
    let app = router(HttpState { analysis });

    let addr = cfg.bind_addr();
    tracing::info!("🚀 Image tagging service listening on http://{}", addr);
    tracing::info!("📂 Images resolved from {}", cfg.upload_folder.display());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
