//! Department repository.

use std::sync::Arc;

use sekolah_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Order, QueryOrder, Set,
    Unchanged,
};

use crate::entities::{Department, department};

/// Repository for department operations.
#[derive(Clone)]
pub struct DepartmentRepository {
    db: Arc<DatabaseConnection>,
}

impl DepartmentRepository {
    /// Create a new department repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find department by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<department::Model>> {
        Department::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all departments, alphabetically by name.
    pub async fn find_all(&self) -> AppResult<Vec<department::Model>> {
        Department::find()
            .order_by(department::Column::Name, Order::Asc)
            .order_by(department::Column::Id, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a department.
    pub async fn create(&self, model: department::Model) -> AppResult<department::Model> {
        let active_model = department::ActiveModel {
            id: Set(model.id),
            name: Set(model.name),
            description: Set(model.description),
            icon: Set(model.icon),
            image: Set(model.image),
            video_url: Set(model.video_url),
            color: Set(model.color),
            created_at: Set(model.created_at),
        };

        active_model.insert(self.db.as_ref()).await.map_err(AppError::from)
    }

    /// Overwrite every writable column of an existing department.
    pub async fn update(&self, model: department::Model) -> AppResult<department::Model> {
        let id = model.id.clone();
        let active = department::ActiveModel {
            id: Unchanged(model.id),
            name: Set(model.name),
            description: Set(model.description),
            icon: Set(model.icon),
            image: Set(model.image),
            video_url: Set(model.video_url),
            color: Set(model.color),
            created_at: NotSet,
        };

        active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound(format!("Jurusan not found: {id}")),
            other => other.into(),
        })
    }

    /// Delete a department. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = Department::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
