//! Server setup and initialization
//!
//! Wires the pool, the realtime router and the services, then serves REST
//! and the socket from one listener.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use rpg_common::{AppConfig, AppError, JwtService};
use rpg_db::{create_pool, run_migrations};
use rpg_gateway::ChannelRouter;
use rpg_service::ServiceContext;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, with_static_client};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let mut router = create_router(&config.rate_limit);

    if config.app.env.is_production() {
        info!(dir = %config.server.static_dir, "Serving static client");
        router = with_static_client(router, &config.server.static_dir);
    }

    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = rpg_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    // The services emit through the same router the sockets join
    let router = ChannelRouter::new_shared();
    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));
    let service_context = Arc::new(ServiceContext::postgres(
        pool.clone(),
        jwt_service,
        router.clone(),
    ));

    Ok(AppState::new(service_context, router, pool, config))
}

/// Run the HTTP server until ctrl-c or SIGTERM
pub async fn run_server(app: Router, addr: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}

/// Serve on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(local) = listener.local_addr() {
        info!("Server listening on http://{}", local);
    }

    // Peer addresses feed the auth rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::Internal(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.server.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, &addr).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install ctrl-c handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
