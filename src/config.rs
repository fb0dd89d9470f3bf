use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};
use tracing::warn;

use crate::application::services::AnalysisDefaults;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub model_path: String,
    pub confidence_threshold: f32,
    pub max_objects: usize,
    pub upload_folder: PathBuf,
    pub input_size: u32,
    /// Variables that were set but could not be parsed; their defaults were used.
    pub ignored: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            model_path: "models/yolov8n.onnx".into(),
            confidence_threshold: 0.5,
            max_objects: 50,
            upload_folder: PathBuf::from("../uploads"),
            input_size: 640,
            ignored: Vec::new(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Parse failures are recorded in `ignored` rather than logged, so this can run
    /// before the subscriber is installed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let mut ignored = Vec::new();
        Self {
            host: lookup("HOST").unwrap_or(d.host),
            port: parse_or(&lookup, &mut ignored, "PORT", d.port),
            model_path: lookup("MODEL_PATH").unwrap_or(d.model_path),
            confidence_threshold: parse_or(
                &lookup,
                &mut ignored,
                "CONFIDENCE_THRESHOLD",
                d.confidence_threshold,
            ),
            max_objects: parse_or(&lookup, &mut ignored, "MAX_OBJECTS", d.max_objects),
            upload_folder: lookup("UPLOAD_FOLDER").map(PathBuf::from).unwrap_or(d.upload_folder),
            input_size: parse_or(&lookup, &mut ignored, "INPUT_SIZE", d.input_size),
            ignored,
        }
    }

    pub fn log_ignored(&self) {
        for entry in &self.ignored {
            warn!("Ignoring invalid {}, using default", entry);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            bail!("CONFIDENCE_THRESHOLD must be in [0, 1], got {}", self.confidence_threshold);
        }
        if self.max_objects == 0 {
            bail!("MAX_OBJECTS must be at least 1");
        }
        if self.input_size == 0 {
            bail!("INPUT_SIZE must be positive");
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn analysis_defaults(&self) -> AnalysisDefaults {
        AnalysisDefaults {
            confidence_threshold: self.confidence_threshold,
            max_objects: self.max_objects,
        }
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    ignored: &mut Vec<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            ignored.push(format!("{}={:?}", key, raw));
            default
        }),
        None => default,
    }
}
