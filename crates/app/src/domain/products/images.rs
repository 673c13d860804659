//! Image file storage for the catalog.

use std::{
    io,
    path::{Path, PathBuf},
};

use tokio::fs;
use tracing::warn;
use uuid::Uuid;

use crate::domain::products::models::ImageUpload;

/// Stores product images under an uploads directory and hands out the
/// relative paths the catalog persists.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy a staged upload into the uploads directory under a generated
    /// name, keeping the original extension.
    ///
    /// Returns the relative path to persist, e.g. `uploads/<name>.png`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be copied.
    pub async fn save(&self, upload: &ImageUpload) -> io::Result<String> {
        let name = match sanitized_extension(&upload.file_name) {
            Some(ext) => format!("{}.{ext}", Uuid::now_v7()),
            None => Uuid::now_v7().to_string(),
        };

        fs::copy(&upload.source_path, self.root.join(&name)).await?;

        Ok(format!("uploads/{name}"))
    }

    /// Save every staged upload, undoing earlier saves when one fails.
    ///
    /// # Errors
    ///
    /// Returns the first copy error encountered.
    pub async fn save_all(&self, uploads: &[ImageUpload]) -> io::Result<Vec<String>> {
        let mut saved = Vec::with_capacity(uploads.len());

        for upload in uploads {
            match self.save(upload).await {
                Ok(path) => saved.push(path),
                Err(error) => {
                    self.remove(&saved).await;

                    return Err(error);
                }
            }
        }

        Ok(saved)
    }

    /// Best-effort removal of stored images; failures are logged, not
    /// returned.
    pub async fn remove(&self, paths: &[String]) {
        for path in paths {
            let Some(file_name) = Path::new(path).file_name() else {
                continue;
            };

            let target = self.root.join(file_name);

            if let Err(error) = fs::remove_file(&target).await {
                if error.kind() != io::ErrorKind::NotFound {
                    warn!("failed to remove image {}: {error}", target.display());
                }
            }
        }
    }
}

fn sanitized_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;

    if ext.is_empty() || ext.len() > 8 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn staged(dir: &Path, file_name: &str, contents: &[u8]) -> TestResult<ImageUpload> {
        let source_path = dir.join(format!("staged-{file_name}"));

        std::fs::write(&source_path, contents)?;

        Ok(ImageUpload {
            source_path,
            file_name: file_name.to_string(),
        })
    }

    #[tokio::test]
    async fn save_copies_file_and_returns_relative_path() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = ImageStore::new(dir.path());
        let upload = staged(dir.path(), "photo.PNG", b"png-bytes")?;

        let path = store.save(&upload).await?;

        assert!(path.starts_with("uploads/"), "got {path}");
        assert!(path.ends_with(".png"), "extension should be kept: {path}");

        let file_name = Path::new(&path).file_name().unwrap();

        assert_eq!(std::fs::read(dir.path().join(file_name))?, b"png-bytes");

        Ok(())
    }

    #[tokio::test]
    async fn save_without_extension_still_stores_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = ImageStore::new(dir.path());
        let upload = staged(dir.path(), "no-extension", b"data")?;

        let path = store.save(&upload).await?;

        assert!(!path.contains('.'), "got {path}");

        Ok(())
    }

    #[tokio::test]
    async fn save_all_cleans_up_after_a_failure() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = ImageStore::new(dir.path());

        let good = staged(dir.path(), "a.png", b"a")?;
        let missing = ImageUpload {
            source_path: dir.path().join("does-not-exist"),
            file_name: "b.png".to_string(),
        };

        let result = store.save_all(&[good, missing]).await;

        assert!(result.is_err(), "expected copy failure");

        let stored: Vec<_> = std::fs::read_dir(dir.path())?
            .filter_map(Result::ok)
            .filter(|e| !e.file_name().to_string_lossy().starts_with("staged-"))
            .collect();

        assert!(stored.is_empty(), "saved files should have been removed");

        Ok(())
    }

    #[tokio::test]
    async fn remove_deletes_stored_files() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = ImageStore::new(dir.path());
        let upload = staged(dir.path(), "c.jpg", b"c")?;

        let path = store.save(&upload).await?;

        store.remove(std::slice::from_ref(&path)).await;

        let file_name = Path::new(&path).file_name().unwrap().to_owned();

        assert!(!dir.path().join(file_name).exists());

        Ok(())
    }

    #[tokio::test]
    async fn remove_of_unknown_path_is_silent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        store.remove(&["uploads/ghost.png".to_string()]).await;
    }
}
