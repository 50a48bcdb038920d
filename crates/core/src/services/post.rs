//! Content feed (postingan) service.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sekolah_common::{AppError, AppResult, id::IdGenerator, validation};
use sekolah_db::entities::{PostType, post};
use sekolah_db::repositories::PostRepository;
use serde::Deserialize;

use super::media::MediaService;

/// Author recorded when none is given.
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Writable post fields, shared by create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, rename = "type")]
    pub post_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, alias = "videoUrl")]
    pub video_url: Option<String>,
    /// RFC 3339 timestamp, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
}

struct PostFields {
    title: String,
    content: String,
    post_type: PostType,
    category: Option<String>,
    author: String,
    video_url: Option<String>,
    date: Option<DateTime<Utc>>,
}

impl PostInput {
    fn validate(&self) -> AppResult<PostFields> {
        let title = validation::require("title", self.title.as_deref().unwrap_or_default())?;
        let content = validation::require("content", self.content.as_deref().unwrap_or_default())?;

        let post_type = match validation::optional(self.post_type.clone()) {
            None => PostType::default(),
            Some(t) => PostType::parse(&t.to_lowercase()).ok_or_else(|| {
                AppError::Validation(format!("type must be one of berita, foto, video, got {t}"))
            })?,
        };

        let date = validation::optional(self.date.clone())
            .map(|d| parse_date(&d))
            .transpose()?;

        Ok(PostFields {
            title,
            content,
            post_type,
            category: validation::optional(self.category.clone()),
            author: validation::optional(self.author.clone())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            video_url: validation::video_url("video_url", self.video_url.clone())?,
            date,
        })
    }
}

/// Parse a publication date in any of the accepted forms.
fn parse_date(value: &str) -> AppResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| AppError::Validation(format!("date is not a valid date: {value}")))
}

/// Service for the content feed.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    media: MediaService,
    id_gen: IdGenerator,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, media: MediaService) -> Self {
        Self {
            post_repo,
            media,
            id_gen: IdGenerator::new(),
        }
    }

    /// List the feed, newest first.
    pub async fn list(&self) -> AppResult<Vec<post::Model>> {
        self.post_repo.find_all().await
    }

    /// Publish a post.
    ///
    /// A client-supplied `id` is kept; otherwise a `post_` id is generated.
    /// Reusing an existing id is a conflict.
    pub async fn create(&self, id: Option<String>, input: PostInput) -> AppResult<post::Model> {
        let fields = input.validate()?;
        let image = self.media.store_image("postingan", "image", input.image).await?;

        let id = id.unwrap_or_else(|| self.id_gen.generate_prefixed("post"));
        let result = self
            .post_repo
            .create(post::Model {
                id,
                title: fields.title,
                content: fields.content,
                image: image.reference(),
                post_type: fields.post_type,
                category: fields.category,
                author: fields.author,
                video_url: fields.video_url,
                date: fields.date.unwrap_or_else(Utc::now),
            })
            .await;
        let created = self.media.settle(&image, result).await?;

        tracing::info!(id = %created.id, post_type = created.post_type.as_str(), "Created post");
        Ok(created)
    }

    /// Replace the writable fields of a post. Without a `date` the stored one stays.
    pub async fn update(&self, id: &str, input: PostInput) -> AppResult<post::Model> {
        let fields = input.validate()?;
        let previous = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post not found: {id}")))?;
        let image = self.media.store_image("postingan", "image", input.image).await?;

        let result = self
            .post_repo
            .update(
                post::Model {
                    id: id.to_string(),
                    title: fields.title,
                    content: fields.content,
                    image: image.reference(),
                    post_type: fields.post_type,
                    category: fields.category,
                    author: fields.author,
                    video_url: fields.video_url,
                    date: previous.date,
                },
                fields.date,
            )
            .await;
        let updated = self.media.settle(&image, result).await?;
        self.media
            .release(previous.image.as_deref(), updated.image.as_deref())
            .await;

        tracing::info!(id = %updated.id, "Updated post");
        Ok(updated)
    }

    /// Delete a post. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let Some(existing) = self.post_repo.find_by_id(id).await? else {
            tracing::info!(id = %id, removed = 0, "Deleted post");
            return Ok(());
        };

        let removed = self.post_repo.delete(id).await?;
        self.media.release(existing.image.as_deref(), None).await;

        tracing::info!(id = %id, removed, "Deleted post");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::media::tests::memory_media;
    use chrono::{Datelike, Timelike};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn service(db: MockDatabase) -> PostService {
        PostService::new(
            PostRepository::new(Arc::new(db.into_connection())),
            memory_media().0,
        )
    }

    fn input(title: &str, content: &str) -> PostInput {
        PostInput {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let fields = input("Class Meeting", "Lomba antar kelas").validate().unwrap();
        assert_eq!(fields.post_type, PostType::Berita);
        assert_eq!(fields.author, DEFAULT_AUTHOR);
        assert!(fields.date.is_none());
    }

    #[test]
    fn test_empty_title_or_content_rejected() {
        assert!(matches!(input("", "x").validate(), Err(AppError::Validation(_))));
        assert!(matches!(input("x", " ").validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_date_forms() {
        let d = parse_date("2024-08-17").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 8, 17));

        let d = parse_date("2024-08-17 07:30:00").unwrap();
        assert_eq!(d.hour(), 7);

        let d = parse_date("2024-08-17T10:00:00+07:00").unwrap();
        assert_eq!(d.hour(), 3);

        assert!(parse_date("17/08/2024").is_err());
    }

    #[tokio::test]
    async fn test_create_generates_prefixed_id() {
        let row = post::Model {
            id: "post_01j".to_string(),
            title: "Class Meeting".to_string(),
            content: "Lomba antar kelas".to_string(),
            image: None,
            post_type: PostType::Berita,
            category: None,
            author: DEFAULT_AUTHOR.to_string(),
            video_url: None,
            date: Utc::now(),
        };
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .append_query_results([[row]]),
        );

        let created = svc
            .create(None, input("Class Meeting", "Lomba antar kelas"))
            .await
            .unwrap();

        assert!(created.id.starts_with("post_"));
    }

    fn stored(id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            title: "Class Meeting".to_string(),
            content: "Lomba antar kelas".to_string(),
            image: None,
            post_type: PostType::Berita,
            category: None,
            author: DEFAULT_AUTHOR.to_string(),
            video_url: None,
            date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![stored("post_123")], Vec::new()])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }]),
        );

        svc.delete("post_123").await.unwrap();
        svc.delete("post_123").await.unwrap();
    }

    #[tokio::test]
    async fn test_conflicting_id_leaves_no_uploaded_image() {
        let (media, storage) = memory_media();
        let svc = PostService::new(
            PostRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([[stored("post_123")]])
                    .into_connection(),
            )),
            media,
        );

        let mut body = input("Baru", "Isi");
        body.image = Some("data:image/png;base64,iVBORw==".to_string());
        let result = svc.create(Some("post_123".to_string()), body).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_without_date_keeps_stored_date() {
        let mut existing = stored("post_7");
        existing.date = Utc::now() - chrono::Duration::days(30);
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing.clone()], [existing.clone()]]),
        );

        let updated = svc
            .update("post_7", input("Class Meeting", "Lomba antar kelas"))
            .await
            .unwrap();

        assert_eq!(updated.date, existing.date);
    }
}
