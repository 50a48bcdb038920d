//! Post repository.

use std::sync::Arc;

use sekolah_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Order, QueryOrder, Set,
    Unchanged,
};

use crate::entities::{Post, post};

/// Repository for post operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all posts, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<post::Model>> {
        Post::find()
            .order_by(post::Column::Date, Order::Desc)
            .order_by(post::Column::Id, Order::Asc)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a post. Fails with a conflict if the ID is taken.
    pub async fn create(&self, model: post::Model) -> AppResult<post::Model> {
        if self.find_by_id(&model.id).await?.is_some() {
            return Err(AppError::Conflict(format!("Post already exists: {}", model.id)));
        }

        let active_model = post::ActiveModel {
            id: Set(model.id),
            title: Set(model.title),
            content: Set(model.content),
            image: Set(model.image),
            post_type: Set(model.post_type),
            category: Set(model.category),
            author: Set(model.author),
            video_url: Set(model.video_url),
            date: Set(model.date),
        };

        active_model.insert(self.db.as_ref()).await.map_err(AppError::from)
    }

    /// Overwrite the writable columns of an existing post.
    ///
    /// `date` is only replaced when given.
    pub async fn update(
        &self,
        model: post::Model,
        date: Option<chrono::DateTime<chrono::Utc>>,
    ) -> AppResult<post::Model> {
        let id = model.id.clone();
        let active = post::ActiveModel {
            id: Unchanged(model.id),
            title: Set(model.title),
            content: Set(model.content),
            image: Set(model.image),
            post_type: Set(model.post_type),
            category: Set(model.category),
            author: Set(model.author),
            video_url: Set(model.video_url),
            date: date.map_or(NotSet, Set),
        };

        active.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::NotFound(format!("Post not found: {id}")),
            other => other.into(),
        })
    }

    /// Delete a post. Returns the number of rows removed.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = Post::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
