use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use uuid::Uuid;

use crate::error::Result;

/// Where an entity's images are stored, relative to the upload root. The same
/// name is the URL prefix the files are served under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Products,
    News,
}

impl ImageFolder {
    pub fn dir_name(self) -> &'static str {
        match self {
            ImageFolder::Products => "images",
            ImageFolder::News => "newsImages",
        }
    }
}

/// A file received in a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// A file input submitted without a selection arrives with an empty name
    /// and no content.
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() || self.bytes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct UploadService {
    root: PathBuf,
}

impl UploadService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn folder_path(&self, folder: ImageFolder) -> PathBuf {
        self.root.join(folder.dir_name())
    }

    /// Writes `file` under `folder` with a fresh unique name and returns its
    /// root-relative URL.
    pub async fn save(&self, folder: ImageFolder, file: &UploadedFile) -> Result<String> {
        let file_name = format!("{}{}", Uuid::new_v4(), extension_of(&file.file_name));
        let dir = self.folder_path(folder);

        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), &file.bytes).await?;

        let url = format!("/{}/{}", folder.dir_name(), file_name);
        tracing::info!(path = %url, bytes = file.bytes.len(), "Saved uploaded image");

        Ok(url)
    }

    /// Removes the file behind a root-relative URL. Failures are logged and
    /// swallowed.
    pub async fn delete_if_exists(&self, image_path: Option<&str>) {
        let Some(path) = image_path.and_then(|p| self.resolve(p)) else {
            return;
        };

        match tokio::fs::try_exists(&path).await {
            Ok(true) => {
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    tracing::warn!(path = %path.display(), "Failed to delete image: {}", e);
                } else {
                    tracing::info!(path = %path.display(), "Deleted image");
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to check image: {}", e);
            }
        }
    }

    /// Deletes the previous image then stores the new one.
    pub async fn replace(
        &self,
        folder: ImageFolder,
        previous: Option<&str>,
        file: &UploadedFile,
    ) -> Result<String> {
        self.delete_if_exists(previous).await;
        self.save(folder, file).await
    }

    /// Image path after an edit: the previous one when nothing was uploaded,
    /// otherwise the replacement.
    pub async fn resolve_image(
        &self,
        folder: ImageFolder,
        previous: Option<&str>,
        upload: Option<&UploadedFile>,
    ) -> Result<Option<String>> {
        match upload.filter(|f| !f.is_empty()) {
            Some(file) => self.replace(folder, previous, file).await.map(Some),
            None => Ok(previous.map(str::to_string)),
        }
    }

    /// Maps `/images/x.png` to `<root>/images/x.png`. Anything that is not a
    /// plain relative path under the root yields `None`.
    fn resolve(&self, image_path: &str) -> Option<PathBuf> {
        let relative = Path::new(image_path.trim_start_matches('/'));
        if relative.as_os_str().is_empty() {
            return None;
        }

        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }

        Some(self.root.join(relative))
    }
}

/// `.ext` of `file_name`, or an empty string.
fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
