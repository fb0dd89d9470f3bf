use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Reference to an image as supplied by the caller, before resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRef {
    pub path: String,
}

/// An image reference resolved to a readable file on local storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedImage {
    pub path: PathBuf,
}
