//! Content feed endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use sekolah_common::AppResult;
use sekolah_core::PostInput;
use sekolah_db::entities::post;
use serde::Serialize;

use super::preflight;
use crate::{
    extractors::{IdQuery, JsonBody, WithId, require_id},
    middleware::AppState,
    response::ApiResponse,
};

/// Create post router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_posts)
                .post(create_post)
                .put(update_post)
                .delete(delete_post_by_query)
                .options(preflight),
        )
        .route("/{id}", delete(delete_post_by_path).options(preflight))
}

/// Post response.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub post_type: &'static str,
    pub category: Option<String>,
    pub author: String,
    pub video_url: Option<String>,
    pub date: DateTime<Utc>,
}

impl From<post::Model> for PostResponse {
    fn from(post: post::Model) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image: post.image,
            post_type: post.post_type.as_str(),
            category: post.category,
            author: post.author,
            video_url: post.video_url,
            date: post.date,
        }
    }
}

async fn list_posts(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<PostResponse>>> {
    let posts = state.post_service.list().await?;
    Ok(ApiResponse::ok(posts.into_iter().map(Into::into).collect()))
}

/// Publish a post. The body may carry its own `id`.
async fn create_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<WithId<PostInput>>,
) -> AppResult<ApiResponse<PostResponse>> {
    let post = state.post_service.create(body.id, body.fields).await?;
    Ok(ApiResponse::ok(post.into()).with_message("Post created"))
}

async fn update_post(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<WithId<PostInput>>,
) -> AppResult<ApiResponse<PostResponse>> {
    let id = require_id(body.id)?;
    let post = state.post_service.update(&id, body.fields).await?;
    Ok(ApiResponse::ok(post.into()).with_message("Post updated"))
}

async fn delete_post_by_query(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<ApiResponse<()>> {
    let id = require_id(query.id)?;
    state.post_service.delete(&id).await?;
    Ok(ApiResponse::message("Post deleted"))
}

async fn delete_post_by_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.post_service.delete(&id).await?;
    Ok(ApiResponse::message("Post deleted"))
}
