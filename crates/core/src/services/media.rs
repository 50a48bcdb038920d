//! Image reference handling.
//!
//! Entities store a single image reference string. Inline data URIs coming
//! from the admin console are written to the storage backend and replaced
//! by their public URL; anything else is stored as given.

use std::sync::Arc;

use sekolah_common::{AppResult, InlineImage, StorageBackend, generate_storage_key, validation};

/// Image reference resolved by [`MediaService::store_image`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredImage {
    reference: Option<String>,
    uploaded_key: Option<String>,
}

impl StoredImage {
    /// Reference to persist on the row.
    #[must_use]
    pub fn reference(&self) -> Option<String> {
        self.reference.clone()
    }

    /// Whether this call wrote a new file.
    #[must_use]
    pub const fn is_upload(&self) -> bool {
        self.uploaded_key.is_some()
    }
}

/// Service that turns submitted image values into stored references.
#[derive(Clone)]
pub struct MediaService {
    storage: Arc<dyn StorageBackend>,
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Resolve a submitted image value into the reference to persist.
    ///
    /// `entity` names the storage folder (e.g. `jurusan`) and `field` the
    /// request field reported in validation errors.
    pub async fn store_image(
        &self,
        entity: &str,
        field: &str,
        value: Option<String>,
    ) -> AppResult<StoredImage> {
        let Some(value) = validation::optional(value) else {
            return Ok(StoredImage::default());
        };

        if !InlineImage::is_inline(&value) {
            return Ok(StoredImage {
                reference: Some(value),
                uploaded_key: None,
            });
        }

        let image = InlineImage::parse_field(field, &value)?;
        let key = generate_storage_key(entity, &image.content_type);
        let uploaded = self
            .storage
            .upload(&key, &image.data, &image.content_type)
            .await?;

        tracing::info!(
            key = %uploaded.key,
            size = uploaded.size,
            md5 = %uploaded.md5,
            "Stored inline image"
        );

        Ok(StoredImage {
            reference: Some(uploaded.url),
            uploaded_key: Some(uploaded.key),
        })
    }

    /// Pass a write result through, removing the file `image` uploaded if
    /// the write failed.
    pub async fn settle<T>(&self, image: &StoredImage, result: AppResult<T>) -> AppResult<T> {
        if result.is_err() {
            if let Some(key) = &image.uploaded_key {
                self.remove(key).await;
            }
        }
        result
    }

    /// Remove the file behind `previous` once a row no longer points at it.
    ///
    /// References this backend did not issue are left alone.
    pub async fn release(&self, previous: Option<&str>, current: Option<&str>) {
        let Some(previous) = previous else {
            return;
        };
        if current == Some(previous) {
            return;
        }
        if let Some(key) = self.storage.key_for_url(previous) {
            self.remove(&key).await;
        }
    }

    async fn remove(&self, key: &str) {
        // The row is already settled; a leftover file is only logged.
        match self.storage.delete(key).await {
            Ok(()) => tracing::info!(key, "Removed stored image"),
            Err(e) => tracing::warn!(key, error = %e, "Failed to remove stored image"),
        }
    }
}
