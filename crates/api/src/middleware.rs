//! API middleware and shared state.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use sekolah_common::AppError;
use sekolah_core::{DepartmentService, PostService, PrincipalService, StaffService};
use tower_http::cors::{Any, CorsLayer};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub department_service: DepartmentService,
    pub staff_service: StaffService,
    pub post_service: PostService,
    pub principal_service: PrincipalService,
    /// Bearer token required for writes. `None` leaves writes open.
    pub admin_token: Option<Arc<str>>,
}

/// Admin gate: when a token is configured, every method other than GET, HEAD
/// and OPTIONS must carry `Authorization: Bearer <token>`.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.admin_token.as_deref() else {
        return next.run(req).await;
    };

    let method = req.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return next.run(req).await;
    }

    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| constant_time_eq(token.trim().as_bytes(), expected.as_bytes()));

    if !authorized {
        tracing::debug!(method = %req.method(), uri = %req.uri(), "Rejected unauthenticated write");
        return AppError::Unauthorized.into_response();
    }

    next.run(req).await
}

/// Compare two secrets without short-circuiting on the first mismatch.
fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Fully permissive CORS.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
