use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use chrono::Utc;
use log::{error, info};
use uuid::Uuid;

use crate::errors::ApiError;

/// URL prefix the upload directory is served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub public_url: String,
}

/// Persists attachments under unique names in one directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `None` when the form carried an empty file part (no file chosen).
    pub async fn save_temp_file(&self, file: &TempFile) -> Result<Option<StoredUpload>, ApiError> {
        if file.size == 0 && file.file_name.as_deref().unwrap_or_default().is_empty() {
            return Ok(None);
        }
        self.save(
            file.file_name.as_deref(),
            file.content_type.as_ref(),
            file.file.path(),
        )
        .await
        .map(Some)
    }

    pub async fn save(
        &self,
        original_name: Option<&str>,
        content_type: Option<&mime::Mime>,
        source: &Path,
    ) -> Result<StoredUpload, ApiError> {
        if let Some(ct) = content_type {
            if ct.type_() != mime::IMAGE {
                return Err(ApiError::Upload(format!(
                    "Unsupported content type {}. Only images are allowed.",
                    ct
                )));
            }
        }

        let extension = extension_of(original_name).ok_or_else(|| {
            ApiError::Upload(
                "Invalid file type. Only JPEG, PNG, GIF, and WEBP are allowed.".to_string(),
            )
        })?;

        let stored_name = format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            extension
        );

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            error!("failed to create upload directory {:?}: {}", self.dir, e);
            ApiError::Internal("Failed to prepare file storage".to_string())
        })?;

        let path = self.dir.join(&stored_name);
        tokio::fs::copy(source, &path).await.map_err(|e| {
            error!("failed to store upload at {:?}: {}", path, e);
            ApiError::Internal("Failed to save uploaded file".to_string())
        })?;

        info!("stored upload {}", stored_name);
        Ok(StoredUpload {
            path,
            public_url: format!("{}/{}", PUBLIC_PREFIX, stored_name),
        })
    }

    /// Best effort; used when the post insert fails after the file landed.
    pub async fn remove(&self, upload: &StoredUpload) {
        if let Err(e) = tokio::fs::remove_file(&upload.path).await {
            error!("failed to clean up upload {:?}: {}", upload.path, e);
        }
    }
}

fn extension_of(file_name: Option<&str>) -> Option<String> {
    let ext = Path::new(file_name?)
        .extension()
        .and_then(|e| e.to_str())?
        .to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
