//! Staff directory endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use chrono::{DateTime, Utc};
use sekolah_common::AppResult;
use sekolah_core::StaffInput;
use sekolah_db::entities::staff_member;
use serde::Serialize;

use super::preflight;
use crate::{
    extractors::{IdQuery, JsonBody, WithId, require_id},
    middleware::AppState,
    response::ApiResponse,
};

/// Create staff directory router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_staff)
                .post(create_staff)
                .put(update_staff)
                .delete(delete_staff_by_query)
                .options(preflight),
        )
        .route("/{id}", delete(delete_staff_by_path).options(preflight))
}

/// Staff member response.
#[derive(Debug, Serialize)]
pub struct StaffResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: &'static str,
    #[serde(rename = "type")]
    pub staff_type: Option<String>,
    pub subject: Option<String>,
    pub expertise: Option<String>,
    pub position: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<staff_member::Model> for StaffResponse {
    fn from(member: staff_member::Model) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
            role: member.role.as_str(),
            staff_type: member.staff_type,
            subject: member.subject,
            expertise: member.expertise,
            position: member.position,
            image: member.image,
            created_at: member.created_at,
        }
    }
}

async fn list_staff(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<StaffResponse>>> {
    let members: Vec<StaffResponse> = state
        .staff_service
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let count = members.len();

    Ok(ApiResponse::ok(members).with_count(count))
}

async fn create_staff(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<StaffInput>,
) -> AppResult<ApiResponse<StaffResponse>> {
    let member = state.staff_service.create(input).await?;
    Ok(ApiResponse::ok(member.into()).with_message("Data berhasil ditambahkan"))
}

async fn update_staff(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<WithId<StaffInput>>,
) -> AppResult<ApiResponse<StaffResponse>> {
    let id = require_id(body.id)?;
    let member = state.staff_service.update(&id, body.fields).await?;
    Ok(ApiResponse::ok(member.into()).with_message("Data berhasil diperbarui"))
}

async fn delete_staff_by_query(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<ApiResponse<()>> {
    let id = require_id(query.id)?;
    state.staff_service.delete(&id).await?;
    Ok(ApiResponse::message("Data berhasil dihapus"))
}

async fn delete_staff_by_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.staff_service.delete(&id).await?;
    Ok(ApiResponse::message("Data berhasil dihapus"))
}
