//! Object detection service: runs a YOLO model over an uploaded image, keeps the
//! most confident detections within an object budget, and expands the detected
//! classes into descriptive keywords.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

pub use domain::keywords::{infer_keywords, infer_keywords_with_context, ContextKnowledgeBase};
pub use domain::summary::{summarize, ClassCounts, Summary};
