//! Photo storage for found-item pictures.
//!
//! Finders attach a single photo to a report. The photo is written to a
//! [`PhotoStore`] and only its public URL is kept on the report.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// A photo that has been written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPhoto {
    /// Storage key (relative path).
    pub key: String,
    /// Public URL to fetch the photo.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME content type as uploaded.
    pub content_type: String,
}

/// Photo storage backend.
#[async_trait::async_trait]
pub trait PhotoStore: Send + Sync {
    /// Write a photo under `key`.
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredPhoto>;

    /// Remove a photo. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Public URL for a key.
    fn url_for(&self, key: &str) -> String;
}

/// Filesystem-backed photo store.
pub struct LocalPhotoStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalPhotoStore {
    /// Create a store rooted at `base_path`, served from `base_url`.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl PhotoStore for LocalPhotoStore {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredPhoto> {
        let path = self.base_path.join(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write photo: {e}")))?;

        tracing::debug!(key = %key, size = data.len(), "Stored photo");

        Ok(StoredPhoto {
            key: key.to_string(),
            url: self.url_for(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.base_path.join(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Failed to delete photo: {e}"))),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

/// Store that discards writes. Used in tests and when uploads are disabled.
#[derive(Debug, Clone, Default)]
pub struct NoOpPhotoStore {
    base_url: String,
}

impl NoOpPhotoStore {
    /// Create a no-op store that still produces URLs under `base_url`.
    #[must_use]
    pub const fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

#[async_trait::async_trait]
impl PhotoStore for NoOpPhotoStore {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> AppResult<StoredPhoto> {
        Ok(StoredPhoto {
            key: key.to_string(),
            url: self.url_for(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn remove(&self, _key: &str) -> AppResult<()> {
        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }
}

/// Build a unique storage key for an uploaded photo.
///
/// Layout: `images/YYYY/MM/DD/<user>/<millis>_<uuid>.<ext>`. The user segment
/// keeps only `[A-Za-z0-9_-]`, anything else becomes `_`. The extension is
/// taken from the original file name and falls back to `bin`.
#[must_use]
pub fn photo_key(user_id: &str, original_name: &str) -> String {
    use chrono::Utc;

    let now = Utc::now();
    let date_path = now.format("%Y/%m/%d");
    let timestamp = now.timestamp_millis();

    let user_dir: String = user_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let user_dir = if user_dir.is_empty() {
        "unknown".to_string()
    } else {
        user_dir
    };

    let extension = original_name
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < original_name.len() - 1)
        .map(|pos| &original_name[pos + 1..])
        .filter(|ext| ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| "bin".to_string(), str::to_ascii_lowercase);

    format!(
        "images/{date_path}/{user_dir}/{timestamp}_{}.{extension}",
        uuid::Uuid::new_v4().simple()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_key_keeps_extension() {
        let key = photo_key("user123", "wallet.JPG");
        assert!(key.starts_with("images/"));
        assert!(key.contains("/user123/"));
        assert!(key.ends_with(".jpg"));
    }

    #[test]
    fn test_photo_key_without_extension() {
        assert!(photo_key("user123", "photo").ends_with(".bin"));
        assert!(photo_key("user123", ".hidden").ends_with(".bin"));
        assert!(photo_key("user123", "trailing.").ends_with(".bin"));
    }

    #[test]
    fn test_photo_key_cannot_leave_the_store() {
        let key = photo_key("../../etc/passwd", "x.png");
        assert!(!key.contains(".."));
        assert_eq!(key.split('/').nth(4), Some("______etc_passwd"));

        let key = photo_key("", "x.png");
        assert_eq!(key.split('/').nth(4), Some("unknown"));
    }

    #[test]
    fn test_url_for_trims_slash() {
        let store = NoOpPhotoStore::new("https://cdn.example/files/".to_string());
        assert_eq!(
            store.url_for("images/a.png"),
            "https://cdn.example/files/images/a.png"
        );
    }

    #[tokio::test]
    async fn test_local_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("lostfound-test-{}", uuid::Uuid::new_v4()));
        let store = LocalPhotoStore::new(dir.clone(), "/files".to_string());

        let stored = store
            .put("images/x/photo.png", b"png-bytes", "image/png")
            .await
            .unwrap();
        assert_eq!(stored.url, "/files/images/x/photo.png");
        assert_eq!(stored.size, 9);
        assert!(dir.join("images/x/photo.png").exists());

        store.remove("images/x/photo.png").await.unwrap();
        assert!(!dir.join("images/x/photo.png").exists());

        // Removing again is fine.
        store.remove("images/x/photo.png").await.unwrap();

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
