//! HTTP API layer for the school site.
//!
//! One router per entity (`/jurusan`, `/guru_staff`, `/postingan`,
//! `/principals`), each answering list, create, update and delete with the
//! same JSON envelope. Built on Axum 0.8 with Tower middleware.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

use axum::{Router, extract::DefaultBodyLimit};
use tower_http::limit::RequestBodyLimitLayer;

pub use endpoints::router;
pub use middleware::AppState;

/// Largest accepted request body. Inline images travel as base64 JSON, so
/// this sits well above the per-image cap.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Build the API application: entity routes behind the admin gate and CORS.
///
/// axum's own 2 MB default is replaced by [`MAX_BODY_BYTES`].
pub fn app(state: AppState) -> Router {
    router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::admin_auth_middleware,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::cors_layer())
        .with_state(state)
}
