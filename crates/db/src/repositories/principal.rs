//! Principal history repository.

use std::sync::Arc;

use sekolah_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Order, QueryOrder, Set,
    Unchanged,
};

use crate::entities::{Principal, principal};

/// Repository for principal history records.
#[derive(Clone)]
pub struct PrincipalRepository {
    db: Arc<DatabaseConnection>,
}

impl PrincipalRepository {
    /// Create a new principal repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find principal record by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<principal::Model>> {
        Principal::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all principal records, most recently created first.
    pub async fn find_all(&self) -> AppResult<Vec<principal::Model>> {
        Principal::find()
            .order_by(principal::Column::CreatedAt, Order::Desc)
            .order_by(principal::Column::Id, Order::Desc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a principal record.
    pub async fn create(&self, model: principal::Model) -> AppResult<principal::Model> {
        let active_model = principal::ActiveModel {
            id: Set(model.id),
            nama: Set(model.nama),
            tahun_jabatan: Set(model.tahun_jabatan),
            foto: Set(model.foto),
            created_at: Set(model.created_at),
        };

        active_model.insert(self.db.as_ref()).await.map_err(AppError::from)
    }

    /// Overwrite every writable column of an existing record.
    pub async fn update(&self, model: principal::Model) -> AppResult<principal::Model> {
        let id = model.id.clone();
        let active = principal::ActiveModel {
            id: Unchanged(model.id),
            nama: Set(model.nama),
            tahun_jabatan: Set(model.tahun_jabatan),
            foto: Set(model.foto),
            created_at: NotSet,
        };

        active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound(format!("Principal not found: {id}")),
            other => other.into(),
        })
    }

    /// Delete a principal record. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = Principal::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
