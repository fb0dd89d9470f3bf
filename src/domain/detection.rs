use serde::{Deserialize, Serialize};

/// One raw observation returned by the detector for a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_name: String,
    pub confidence: f32,
}

impl Detection {
    pub fn new(class_name: impl Into<String>, confidence: f32) -> Self {
        Self { class_name: class_name.into(), confidence }
    }
}
