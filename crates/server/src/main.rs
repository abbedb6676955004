//! Lost & found server entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, middleware};
use lostfound_api::{AppState, auth_middleware, router as api_router};
use lostfound_common::{Config, LocalPhotoStore};
use lostfound_core::{
    ClaimService, FoundItemService, IdentityService, LostItemService, PhotoStorage,
    SearchService,
};
use lostfound_db::repositories::{
    ClaimRepository, FoundItemRepository, LostItemRepository, UserRepository,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Requests taking longer than this are aborted.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
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
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lostfound=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting lost & found server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = lostfound_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    lostfound_db::migrate(&db).await?;
    info!("Migrations completed");

    let db = Arc::new(db);

    // Initialize repositories
    let user_repo = UserRepository::new(Arc::clone(&db));
    let lost_item_repo = LostItemRepository::new(Arc::clone(&db));
    let found_item_repo = FoundItemRepository::new(Arc::clone(&db));
    let claim_repo = ClaimRepository::new(Arc::clone(&db));

    // Photo storage
    let photos: PhotoStorage = Arc::new(LocalPhotoStore::new(
        PathBuf::from(&config.storage.base_path),
        config.storage.base_url.clone(),
    ));

    // Initialize services
    let state = AppState {
        identity_service: IdentityService::new(user_repo, &config.auth),
        found_item_service: FoundItemService::new(
            found_item_repo.clone(),
            claim_repo.clone(),
            photos,
        ),
        lost_item_service: LostItemService::new(lost_item_repo.clone()),
        search_service: SearchService::new(
            lost_item_repo.clone(),
            found_item_repo.clone(),
            claim_repo.clone(),
        ),
        claim_service: ClaimService::new(found_item_repo, claim_repo, lost_item_repo),
    };

    if config.auth.allowed_email_domain.is_none() {
        warn!("No allowed email domain configured; any verified email may sign in");
    }

    let api = api_router().layer(middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let photo_route = config.storage.route();

    let app = Router::new()
        .nest("/api", api)
        .nest_service(&photo_route, ServeDir::new(&config.storage.base_path))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = config.bind_address();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
