//! Principal history endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use sekolah_common::AppResult;
use sekolah_core::PrincipalInput;
use sekolah_db::entities::principal;
use serde::Serialize;

use super::preflight;
use crate::{
    extractors::{IdQuery, JsonBody, WithId, require_id},
    middleware::AppState,
    response::ApiResponse,
};

/// Create principal history router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_principals)
                .post(create_principal)
                .put(update_principal)
                .delete(delete_principal_by_query)
                .options(preflight),
        )
        .route(
            "/{id}",
            delete(delete_principal_by_path).options(preflight),
        )
}

/// Principal record response.
#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    pub id: String,
    pub nama: String,
    pub tahun_jabatan: String,
    pub foto: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<principal::Model> for PrincipalResponse {
    fn from(record: principal::Model) -> Self {
        Self {
            id: record.id,
            nama: record.nama,
            tahun_jabatan: record.tahun_jabatan,
            foto: record.foto,
            created_at: record.created_at,
        }
    }
}

async fn list_principals(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<PrincipalResponse>>> {
    let records = state.principal_service.list().await?;
    Ok(ApiResponse::ok(records.into_iter().map(Into::into).collect()))
}

async fn create_principal(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<PrincipalInput>,
) -> AppResult<ApiResponse<PrincipalResponse>> {
    let record = state.principal_service.create(input).await?;
    Ok(ApiResponse::ok(record.into()).with_message("Data kepala sekolah berhasil ditambahkan"))
}

async fn update_principal(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<WithId<PrincipalInput>>,
) -> AppResult<ApiResponse<PrincipalResponse>> {
    let id = require_id(body.id)?;
    let record = state.principal_service.update(&id, body.fields).await?;
    Ok(ApiResponse::ok(record.into()).with_message("Data kepala sekolah berhasil diperbarui"))
}

async fn delete_principal_by_query(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<ApiResponse<()>> {
    let id = require_id(query.id)?;
    state.principal_service.delete(&id).await?;
    Ok(ApiResponse::message("Data kepala sekolah berhasil dihapus"))
}

async fn delete_principal_by_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.principal_service.delete(&id).await?;
    Ok(ApiResponse::message("Data kepala sekolah berhasil dihapus"))
}
