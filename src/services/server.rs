use anyhow::{Context, Result};
use log::{info, warn};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::settings::AppConfig;
use crate::database::{self, DbPool};

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(self) -> Result<()> {
        let pool = open_database(&self.config)?;

        let state = Arc::new(AppState {
            pool,
            config: self.config,
        });

        let app = create_router(state)
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Opens the pool and brings the schema up to date before any request is
/// served.
pub fn open_database(config: &AppConfig) -> Result<DbPool> {
    info!("Opening database at {}", config.database.path);
    let pool = database::create_pool(&config.database)?;
    let mut conn = database::get_connection(&pool)?;
    let applied = database::run_migrations(&mut conn)?;
    if applied > 0 {
        info!("Applied {} migration(s)", applied);
    }
    drop(conn);
    Ok(pool)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    warn!("Received Ctrl+C, shutting down");
}
