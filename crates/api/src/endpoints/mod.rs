//! API endpoints.

mod guru_staff;
mod jurusan;
mod postingan;
mod principals;

use axum::{Router, http::StatusCode};

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/jurusan", jurusan::router())
        .nest("/guru_staff", guru_staff::router())
        .nest("/postingan", postingan::router())
        .nest("/principals", principals::router())
}

/// Plain `OPTIONS` request (not a CORS preflight): empty 200.
async fn preflight() -> StatusCode {
    StatusCode::OK
}
