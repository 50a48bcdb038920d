//! Department endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use sekolah_common::AppResult;
use sekolah_core::DepartmentInput;
use sekolah_db::entities::department;
use serde::Serialize;

use super::preflight;
use crate::{
    extractors::{IdQuery, JsonBody, WithId, require_id},
    middleware::AppState,
    response::ApiResponse,
};

/// Create department router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_departments)
                .post(create_department)
                .put(update_department)
                .delete(delete_department_by_query)
                .options(preflight),
        )
        .route(
            "/{id}",
            delete(delete_department_by_path).options(preflight),
        )
}

/// Department response.
#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: &'static str,
    pub image: Option<String>,
    pub video_url: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl From<department::Model> for DepartmentResponse {
    fn from(department: department::Model) -> Self {
        Self {
            id: department.id,
            name: department.name,
            description: department.description,
            icon: department.icon.as_str(),
            image: department.image,
            video_url: department.video_url,
            color: department.color,
            created_at: department.created_at,
        }
    }
}

async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<DepartmentResponse>>> {
    let departments = state.department_service.list().await?;
    Ok(ApiResponse::ok(
        departments.into_iter().map(Into::into).collect(),
    ))
}

async fn create_department(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<DepartmentInput>,
) -> AppResult<ApiResponse<DepartmentResponse>> {
    let department = state.department_service.create(input).await?;
    Ok(ApiResponse::ok(department.into()).with_message("Jurusan berhasil ditambahkan"))
}

async fn update_department(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<WithId<DepartmentInput>>,
) -> AppResult<ApiResponse<DepartmentResponse>> {
    let id = require_id(body.id)?;
    let department = state.department_service.update(&id, body.fields).await?;
    Ok(ApiResponse::ok(department.into()).with_message("Jurusan berhasil diperbarui"))
}

async fn delete_department_by_query(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<ApiResponse<()>> {
    delete_department(&state, require_id(query.id)?).await
}

async fn delete_department_by_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    delete_department(&state, id).await
}

async fn delete_department(state: &AppState, id: String) -> AppResult<ApiResponse<()>> {
    state.department_service.delete(&id).await?;
    Ok(ApiResponse::message("Jurusan berhasil dihapus"))
}
