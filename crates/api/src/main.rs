use std::net::SocketAddr;
use std::sync::Arc;

use airdrop_core::store::CollectionStore;
use airdrop_db::PgCollectionStore;
use airdrop_postgrest::PostgrestCollectionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airdrop_api::catalog::Catalog;
use airdrop_api::config::{BackendConfig, ServerConfig};
use airdrop_api::router::build_app_router;
use airdrop_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airdrop_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Backend ---
    let store = connect_store(&config).await;

    let catalog = Catalog::new(store, config.retry_policy)
        .with_fixture_fallback(config.fixture_fallback);
    tracing::info!(
        backend = catalog.backend_name(),
        cache_ttl_ms = config.retry_policy.cache_ttl.as_millis() as u64,
        max_retries = config.retry_policy.max_retries,
        fixture_fallback = config.fixture_fallback,
        "Catalog ready",
    );

    // --- App state ---
    let state = AppState {
        catalog: Arc::new(catalog),
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Build the configured [`CollectionStore`], or `None` when no backend is
/// configured.
///
/// Never fails startup: an unreachable database is only logged, and reads
/// against it fall back like any other backend failure.
async fn connect_store(config: &ServerConfig) -> Option<Arc<dyn CollectionStore>> {
    match &config.backend {
        BackendConfig::Postgres { database_url } => {
            let pool = match airdrop_db::create_pool(database_url, config.db_max_connections) {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error = %e, "Invalid DATABASE_URL, serving sample data");
                    return None;
                }
            };
            tracing::info!("Database connection pool created");

            match airdrop_db::health_check(&pool).await {
                Ok(()) => tracing::info!("Database health check passed"),
                Err(e) => tracing::warn!(error = %e, "Database not reachable at startup"),
            }

            let store: Arc<dyn CollectionStore> = Arc::new(PgCollectionStore::new(pool));
            Some(store)
        }
        BackendConfig::Postgrest(rest) => {
            tracing::info!(base_url = %rest.base_url, table = %rest.table, "Using REST backend");
            let store: Arc<dyn CollectionStore> =
                Arc::new(PostgrestCollectionStore::new(rest.clone()));
            Some(store)
        }
        BackendConfig::Unconfigured => {
            tracing::warn!(
                "Neither DATABASE_URL nor SUPABASE_URL/SUPABASE_ANON_KEY is set, serving sample data"
            );
            None
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
