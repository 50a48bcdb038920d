//! Media storage abstraction for uploaded images.
//!
//! Entities only ever persist a reference string; the bytes live behind a
//! [`StorageBackend`].

use std::path::PathBuf;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{AppError, AppResult, config::StorageSettings};

/// Uploaded file metadata.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Storage key (path relative to the backend root).
    pub key: String,
    /// Public URL to access the file.
    pub url: String,
    /// File size in bytes.
    pub size: u64,
    /// MIME content type.
    pub content_type: String,
    /// MD5 hash of the file.
    pub md5: String,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Upload a file.
    async fn upload(&self, key: &str, data: &[u8], content_type: &str)
    -> AppResult<UploadedFile>;

    /// Delete a file.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Map a public URL back to the key it was issued for.
    ///
    /// Returns `None` for URLs this backend did not produce.
    fn key_for_url(&self, url: &str) -> Option<String>;

    /// Check if a file exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }

    /// Create a local storage backend from configuration.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self::new(settings.base_path.clone(), settings.base_url.clone())
    }

    /// Directory the files are written to.
    #[must_use]
    pub const fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn upload(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> AppResult<UploadedFile> {
        let path = self.base_path.join(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {e}")))?;

        let md5 = format!("{:x}", md5::compute(data));

        Ok(UploadedFile {
            key: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
            content_type: content_type.to_string(),
            md5,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.base_path.join(key);
        if path.exists() {
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to delete file: {e}")))?;
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        let key = url
            .strip_prefix(self.base_url.trim_end_matches('/'))?
            .strip_prefix('/')?;

        let safe = !key.is_empty()
            && key
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        safe.then(|| key.to_string())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.base_path.join(key);
        Ok(path.exists())
    }
}

/// Largest accepted image, in decoded bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image types accepted for upload. SVG is excluded since it can carry script.
const IMAGE_TYPES: [&str; 5] = ["image/jpeg", "image/jpg", "image/png", "image/gif", "image/webp"];

/// An image sent inline as a `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// MIME type from the URI header, lowercased.
    pub content_type: String,
    /// Decoded bytes.
    pub data: Vec<u8>,
}

impl InlineImage {
    /// Whether `value` is a data URI rather than a URL or storage reference.
    #[must_use]
    pub fn is_inline(value: &str) -> bool {
        value.trim_start().starts_with("data:")
    }

    /// Decode a base64 image data URI.
    pub fn parse(value: &str) -> AppResult<Self> {
        Self::parse_field("image", value)
    }

    /// Decode a base64 image data URI, naming `field` in validation errors.
    pub fn parse_field(field: &str, value: &str) -> AppResult<Self> {
        let invalid = |reason: &str| AppError::Validation(format!("{field} {reason}"));

        let rest = value
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| invalid("is not a data URI"))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("data URI has no payload"))?;

        let content_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("data URI must be base64"))?
            .to_ascii_lowercase();

        if !IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(invalid(&format!("has unsupported type: {content_type}")));
        }

        let payload = payload.trim();
        let too_large = || invalid("is too large (max 5 MB)");
        if payload.len() / 4 * 3 > MAX_IMAGE_BYTES + 2 {
            return Err(too_large());
        }

        let data = STANDARD
            .decode(payload)
            .map_err(|e| invalid(&format!("is not valid base64: {e}")))?;

        if data.len() > MAX_IMAGE_BYTES {
            return Err(too_large());
        }

        Ok(Self { content_type, data })
    }

    /// Re-encode as a data URI.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, STANDARD.encode(&self.data))
    }
}

/// File extension for an image MIME type.
#[must_use]
pub fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

/// Generate a unique storage key for an image attached to `entity`.
#[must_use]
pub fn generate_storage_key(entity: &str, content_type: &str) -> String {
    use chrono::Utc;

    let now = Utc::now();
    let date_path = now.format("%Y/%m").to_string();

    format!(
        "{}/{}/{}.{}",
        entity,
        date_path,
        uuid::Uuid::new_v4().simple(),
        extension_for(content_type)
    )
}
