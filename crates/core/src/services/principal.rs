//! Principal history service.

use chrono::Utc;
use sekolah_common::{AppError, AppResult, id::IdGenerator, validation};
use sekolah_db::entities::principal;
use sekolah_db::repositories::PrincipalRepository;
use serde::Deserialize;

use super::media::MediaService;

const MISSING_FIELDS: &str = "Nama dan periode harus diisi";

/// Writable principal record fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrincipalInput {
    #[serde(default)]
    pub nama: Option<String>,
    #[serde(default)]
    pub tahun_jabatan: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
}

impl PrincipalInput {
    fn validate(&self) -> AppResult<(String, String)> {
        let nama = validation::optional(self.nama.clone());
        let tahun_jabatan = validation::optional(self.tahun_jabatan.clone());

        match (nama, tahun_jabatan) {
            (Some(nama), Some(tahun_jabatan)) => Ok((nama, tahun_jabatan)),
            _ => Err(AppError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

/// Service for the principal history.
#[derive(Clone)]
pub struct PrincipalService {
    principal_repo: PrincipalRepository,
    media: MediaService,
    id_gen: IdGenerator,
}

impl PrincipalService {
    #[must_use]
    pub const fn new(principal_repo: PrincipalRepository, media: MediaService) -> Self {
        Self {
            principal_repo,
            media,
            id_gen: IdGenerator::new(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<principal::Model>> {
        self.principal_repo.find_all().await
    }

    pub async fn create(&self, input: PrincipalInput) -> AppResult<principal::Model> {
        let (nama, tahun_jabatan) = input.validate()?;
        let foto = self.media.store_image("principals", "foto", input.foto).await?;

        let result = self
            .principal_repo
            .create(principal::Model {
                id: self.id_gen.generate(),
                nama,
                tahun_jabatan,
                foto: foto.reference(),
                created_at: Utc::now(),
            })
            .await;
        let created = self.media.settle(&foto, result).await?;

        tracing::info!(id = %created.id, "Created principal record");
        Ok(created)
    }

    pub async fn update(&self, id: &str, input: PrincipalInput) -> AppResult<principal::Model> {
        let (nama, tahun_jabatan) = input.validate()?;
        let previous = self
            .principal_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Principal not found: {id}")))?;
        let foto = self.media.store_image("principals", "foto", input.foto).await?;

        let result = self
            .principal_repo
            .update(principal::Model {
                id: id.to_string(),
                nama,
                tahun_jabatan,
                foto: foto.reference(),
                created_at: previous.created_at,
            })
            .await;
        let updated = self.media.settle(&foto, result).await?;
        self.media
            .release(previous.foto.as_deref(), updated.foto.as_deref())
            .await;

        tracing::info!(id = %updated.id, "Updated principal record");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let Some(existing) = self.principal_repo.find_by_id(id).await? else {
            tracing::info!(id = %id, removed = 0, "Deleted principal record");
            return Ok(());
        };

        let removed = self.principal_repo.delete(id).await?;
        self.media.release(existing.foto.as_deref(), None).await;

        tracing::info!(id = %id, removed, "Deleted principal record");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::media::tests::memory_media;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn service(db: MockDatabase) -> PrincipalService {
        PrincipalService::new(
            PrincipalRepository::new(Arc::new(db.into_connection())),
            memory_media().0,
        )
    }

    #[tokio::test]
    async fn test_missing_period_is_rejected() {
        let svc = service(MockDatabase::new(DatabaseBackend::Postgres));

        let err = svc
            .create(PrincipalInput {
                nama: Some("Siti Aminah".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), MISSING_FIELDS);
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_is_not_found() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<principal::Model>::new()]),
        );

        let result = svc
            .update(
                "5",
                PrincipalInput {
                    nama: Some("Ahmad".to_string()),
                    tahun_jabatan: Some("2010-2015".to_string()),
                    foto: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_uploads_nothing() {
        let (media, storage) = memory_media();
        let svc = PrincipalService::new(
            PrincipalRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([Vec::<principal::Model>::new()])
                    .into_connection(),
            )),
            media,
        );

        let result = svc
            .update(
                "5",
                PrincipalInput {
                    nama: Some("Ahmad".to_string()),
                    tahun_jabatan: Some("2010-2015".to_string()),
                    foto: Some("data:image/png;base64,iVBORw==".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_failing_in_database_removes_new_photo() {
        let (media, storage) = memory_media();
        let existing = principal::Model {
            id: "5".to_string(),
            nama: "Ahmad".to_string(),
            tahun_jabatan: "2010-2015".to_string(),
            foto: None,
            created_at: Utc::now(),
        };
        let svc = PrincipalService::new(
            PrincipalRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([[existing]])
                    .append_query_errors([sea_orm::DbErr::Custom("deadlock".to_string())])
                    .into_connection(),
            )),
            media,
        );

        let result = svc
            .update(
                "5",
                PrincipalInput {
                    nama: Some("Ahmad".to_string()),
                    tahun_jabatan: Some("2010-2015".to_string()),
                    foto: Some("data:image/png;base64,iVBORw==".to_string()),
                },
            )
            .await;

        assert!(result.is_err());
        assert!(storage.files.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_stores_inline_photo() {
        let now = Utc::now();
        let row = principal::Model {
            id: "01jx".to_string(),
            nama: "Ahmad".to_string(),
            tahun_jabatan: "2010-2015".to_string(),
            foto: Some("/files/principals/x.png".to_string()),
            created_at: now,
        };
        let (media, storage) = memory_media();
        let svc = PrincipalService::new(
            PrincipalRepository::new(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres)
                    .append_query_results([[row]])
                    .into_connection(),
            )),
            media,
        );

        let created = svc
            .create(PrincipalInput {
                nama: Some("Ahmad".to_string()),
                tahun_jabatan: Some("2010-2015".to_string()),
                foto: Some("data:image/png;base64,iVBORw==".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(created.nama, "Ahmad");
        assert_eq!(storage.files.lock().await.len(), 1);
    }
}
