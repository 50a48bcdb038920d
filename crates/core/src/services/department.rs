//! Department (jurusan) service.

use chrono::Utc;
use sekolah_common::{AppError, AppResult, id::IdGenerator, validation};
use sekolah_db::entities::{DepartmentIcon, department};
use sekolah_db::repositories::DepartmentRepository;
use serde::Deserialize;

use super::media::MediaService;

/// Style token used when none is given.
pub const DEFAULT_COLOR: &str = "text-green-500";

/// Writable department fields, shared by create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "videoUrl")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Validated department fields, image not yet resolved.
struct DepartmentFields {
    name: String,
    description: Option<String>,
    icon: DepartmentIcon,
    video_url: Option<String>,
    color: String,
}

impl DepartmentInput {
    fn validate(&self) -> AppResult<DepartmentFields> {
        let name = validation::require("name", self.name.as_deref().unwrap_or_default())?;

        let icon = match validation::optional(self.icon.clone()) {
            None => DepartmentIcon::default(),
            Some(icon) => DepartmentIcon::parse(&icon).ok_or_else(|| {
                AppError::Validation(format!("icon must be one of Briefcase, Cpu, Code, got {icon}"))
            })?,
        };

        Ok(DepartmentFields {
            name,
            description: validation::optional(self.description.clone()),
            icon,
            video_url: validation::video_url("video_url", self.video_url.clone())?,
            color: validation::optional(self.color.clone())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        })
    }
}

/// Service for managing departments.
#[derive(Clone)]
pub struct DepartmentService {
    department_repo: DepartmentRepository,
    media: MediaService,
    id_gen: IdGenerator,
}

impl DepartmentService {
    /// Create a new department service.
    #[must_use]
    pub const fn new(department_repo: DepartmentRepository, media: MediaService) -> Self {
        Self {
            department_repo,
            media,
            id_gen: IdGenerator::new(),
        }
    }

    /// List every department by name.
    pub async fn list(&self) -> AppResult<Vec<department::Model>> {
        self.department_repo.find_all().await
    }

    /// Create a department.
    pub async fn create(&self, input: DepartmentInput) -> AppResult<department::Model> {
        let fields = input.validate()?;
        let image = self.media.store_image("jurusan", "image", input.image).await?;

        let result = self
            .department_repo
            .create(department::Model {
                id: self.id_gen.generate(),
                name: fields.name,
                description: fields.description,
                icon: fields.icon,
                image: image.reference(),
                video_url: fields.video_url,
                color: fields.color,
                created_at: Utc::now(),
            })
            .await;
        let created = self.media.settle(&image, result).await?;

        tracing::info!(id = %created.id, name = %created.name, "Created department");
        Ok(created)
    }

    /// Replace every writable field of an existing department.
    pub async fn update(&self, id: &str, input: DepartmentInput) -> AppResult<department::Model> {
        let fields = input.validate()?;
        let previous = self
            .department_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Jurusan not found: {id}")))?;
        let image = self.media.store_image("jurusan", "image", input.image).await?;

        let result = self
            .department_repo
            .update(department::Model {
                id: id.to_string(),
                name: fields.name,
                description: fields.description,
                icon: fields.icon,
                image: image.reference(),
                video_url: fields.video_url,
                color: fields.color,
                created_at: previous.created_at,
            })
            .await;
        let updated = self.media.settle(&image, result).await?;
        self.media
            .release(previous.image.as_deref(), updated.image.as_deref())
            .await;

        tracing::info!(id = %updated.id, "Updated department");
        Ok(updated)
    }

    /// Delete a department. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let Some(existing) = self.department_repo.find_by_id(id).await? else {
            tracing::info!(id = %id, removed = 0, "Deleted department");
            return Ok(());
        };

        let removed = self.department_repo.delete(id).await?;
        self.media.release(existing.image.as_deref(), None).await;

        tracing::info!(id = %id, removed, "Deleted department");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::media::tests::memory_media;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    const PNG: &str = "data:image/png;base64,iVBORw==";

    fn service(db: MockDatabase) -> DepartmentService {
        let repo = DepartmentRepository::new(Arc::new(db.into_connection()));
        DepartmentService::new(repo, memory_media().0)
    }

    fn stored(id: &str, name: &str, icon: DepartmentIcon) -> department::Model {
        department::Model {
            id: id.to_string(),
            name: name.to_string(),
            description: Some("Jaringan dan server".to_string()),
            icon,
            image: None,
            video_url: None,
            color: DEFAULT_COLOR.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_without_touching_db() {
        // No query results queued: any database call would fail.
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));

        let result = svc
            .create(DepartmentInput {
                name: Some("  ".to_string()),
                ..Default::default()
            })
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "name is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_icon() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));

        let result = svc
            .create(DepartmentInput {
                name: Some("Multimedia".to_string()),
                icon: Some("Camera".to_string()),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_returns_row_with_id() {
        let row = stored("01jtkj", "Teknik Komputer Jaringan", DepartmentIcon::Cpu);
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[row]]));

        let created = svc
            .create(DepartmentInput {
                name: Some("Teknik Komputer Jaringan".to_string()),
                description: Some("Jaringan dan server".to_string()),
                icon: Some("Cpu".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.icon, DepartmentIcon::Cpu);
    }

    #[test]
    fn test_defaults_and_video_normalisation() {
        let fields = DepartmentInput {
            name: Some("Rekayasa Perangkat Lunak".to_string()),
            video_url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();

        assert_eq!(fields.icon, DepartmentIcon::Briefcase);
        assert_eq!(fields.color, DEFAULT_COLOR);
        assert_eq!(
            fields.video_url.as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_url_alias_is_accepted() {
        let input: DepartmentInput =
            serde_json::from_str(r#"{"name":"TKJ","videoUrl":"https://youtu.be/dQw4w9WgXcQ"}"#)
                .unwrap();
        assert!(input.video_url.is_some());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<department::Model>::new()]),
        );

        assert!(svc.delete("nope").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_replacing_image_removes_old_file() {
        let (media, storage) = memory_media();
        let old_url = media
            .store_image("jurusan", "image", Some(PNG.to_string()))
            .await
            .unwrap()
            .reference()
            .unwrap();

        let mut before = stored("01jtkj", "TKJ", DepartmentIcon::Cpu);
        before.image = Some(old_url);
        let mut after = before.clone();
        after.image = Some("https://cdn.example.com/tkj.jpg".to_string());

        let repo = DepartmentRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[before]])
                .append_query_results([[after]])
                .into_connection(),
        ));
        let svc = DepartmentService::new(repo, media);

        let updated = svc
            .update(
                "01jtkj",
                DepartmentInput {
                    name: Some("TKJ".to_string()),
                    icon: Some("Cpu".to_string()),
                    image: Some("https://cdn.example.com/tkj.jpg".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.image.as_deref(), Some("https://cdn.example.com/tkj.jpg"));
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_leaves_no_file() {
        let (media, storage) = memory_media();
        let repo = DepartmentRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([sea_orm::DbErr::Custom("connection lost".to_string())])
                .into_connection(),
        ));
        let svc = DepartmentService::new(repo, media);

        let result = svc
            .create(DepartmentInput {
                name: Some("Multimedia".to_string()),
                image: Some(PNG.to_string()),
                ..Default::default()
            })
            .await;

        assert!(result.is_err());
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_stored_image() {
        let (media, storage) = memory_media();
        let url = media
            .store_image("jurusan", "image", Some(PNG.to_string()))
            .await
            .unwrap()
            .reference()
            .unwrap();

        let mut row = stored("01jmm", "Multimedia", DepartmentIcon::Code);
        row.image = Some(url);
        let repo = DepartmentRepository::new(Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[row]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        ));
        let svc = DepartmentService::new(repo, media);

        svc.delete("01jmm").await.unwrap();

        assert!(storage.files.lock().await.is_empty());
    }
}
