use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::application::ports::ImageStorePort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::image::{ImageRef, ResolvedImage};

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Prefix callers use for files that live in the upload directory.
const UPLOADS_PREFIX: &str = "uploads/";

/// Images stored on the local filesystem under an upload directory.
pub struct LocalImageStore {
    upload_dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self { upload_dir: upload_dir.into() }
    }

    /// Absolute paths are kept; `uploads/<rest>` maps to `<upload_dir>/<rest>`;
    /// any other relative path keeps only its file name under `<upload_dir>`.
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match raw.strip_prefix(UPLOADS_PREFIX) {
            Some(rest) => self.upload_dir.join(rest),
            None => self
                .upload_dir
                .join(path.file_name().unwrap_or(path.as_os_str())),
        }
    }
}

#[async_trait]
impl ImageStorePort for LocalImageStore {
    async fn resolve(&self, image: &ImageRef) -> DomainResult<ResolvedImage> {
        let path = self.resolve_path(&image.path);

        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(DomainError::NotFound(format!("image file not found: {}", path.display())));
        }

        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(DomainError::InvalidInput(format!(
                "unsupported image type '{}', supported: {:?}",
                ext, ALLOWED_EXTENSIONS
            )));
        }

        Ok(ResolvedImage { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_the_three_path_shapes() {
        let store = LocalImageStore::new("/data/uploads");
        assert_eq!(store.resolve_path("/tmp/a.jpg"), PathBuf::from("/tmp/a.jpg"));
        assert_eq!(
            store.resolve_path("uploads/2024/a.jpg"),
            PathBuf::from("/data/uploads/2024/a.jpg")
        );
        assert_eq!(
            store.resolve_path("some/where/b.png"),
            PathBuf::from("/data/uploads/b.png")
        );
    }

    #[tokio::test]
    async fn finds_existing_image() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cat.JPG"), b"not really a jpeg").unwrap();
        let store = LocalImageStore::new(dir.path());

        let resolved = store.resolve(&ImageRef { path: "uploads/cat.JPG".into() }).await.unwrap();
        assert_eq!(resolved.path, dir.path().join("cat.JPG"));
    }

    #[tokio::test]
    async fn missing_image_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());
        let err = store.resolve(&ImageRef { path: "ghost.jpg".into() }).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn unsupported_extension_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        let store = LocalImageStore::new(dir.path());
        let err = store.resolve(&ImageRef { path: "notes.txt".into() }).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
