//! School site server entry point.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use sekolah_api::AppState;
use sekolah_common::{Config, LocalStorage};
use sekolah_core::{DepartmentService, MediaService, PostService, PrincipalService, StaffService};
use sekolah_db::repositories::{
    DepartmentRepository, PostRepository, PrincipalRepository, StaffMemberRepository,
};
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sekolah=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting sekolah server...");

    let config = Config::load().context("loading configuration")?;

    let db = sekolah_db::init(&config)
        .await
        .context("connecting to database")?;
    info!("Connected to database");

    info!("Running database migrations...");
    sekolah_db::migrate(&db).await.context("running migrations")?;
    info!("Migrations completed");

    let db = Arc::new(db);

    // Media storage
    let storage = LocalStorage::from_settings(&config.storage);
    tokio::fs::create_dir_all(storage.base_path())
        .await
        .with_context(|| format!("creating {}", storage.base_path().display()))?;
    let media = MediaService::new(Arc::new(storage));

    // Initialize repositories and services
    let state = AppState {
        department_service: DepartmentService::new(
            DepartmentRepository::new(Arc::clone(&db)),
            media.clone(),
        ),
        staff_service: StaffService::new(
            StaffMemberRepository::new(Arc::clone(&db)),
            media.clone(),
        ),
        post_service: PostService::new(PostRepository::new(Arc::clone(&db)), media.clone()),
        principal_service: PrincipalService::new(
            PrincipalRepository::new(Arc::clone(&db)),
            media,
        ),
        admin_token: config.admin.token.as_deref().map(Arc::from),
    };

    if state.admin_token.is_none() {
        info!("No admin token configured; write endpoints are open");
    }

    let files_route = format!("/{}", config.storage.base_url.trim_matches('/'));
    let app = Router::new()
        .merge(sekolah_api::app(state))
        .nest_service(&files_route, ServeDir::new(&config.storage.base_path))
        .layer(TraceLayer::new_for_http());

    // Start server with graceful shutdown
    let host: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server.host {}", config.server.host))?;
    let addr = SocketAddr::new(host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
