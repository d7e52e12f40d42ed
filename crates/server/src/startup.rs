use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use service::room::{repo::SeaOrmRoomRepository, RoomService, RoomValidator};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::auth::ServerAuthConfig;
use crate::errors::StartupError;
use crate::rate_limit::RateLimiter;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", server.host, server.port)))
}

/// Connect the store, apply migrations and wire the room service.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    if cfg.database.is_sqlite() {
        common::env::ensure_database_dir(&cfg.database.url).await?;
    }

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    info!("applying migrations");
    match migration::Migrator::up(&db, None).await {
        Ok(()) => info!("database is ready"),
        Err(e) => error!(error = %e, "applying migrations failed"),
    }

    let repo = Arc::new(SeaOrmRoomRepository::new(db));
    let rooms = Arc::new(RoomService::new(repo, RoomValidator::new()));

    if cfg.auth.api_key.trim().is_empty() {
        warn!("no api key configured; any X-Api-Key value is accepted");
    }

    Ok(ServerState {
        rooms,
        auth: ServerAuthConfig { api_key: cfg.auth.api_key.clone() },
        limiter: RateLimiter::from_config(&cfg.rate_limit),
    })
}

/// Build the application router from configuration.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "cannot listen for ctrl-c");
        return;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: build the app and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting hotel room server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_rejects_bad_host() {
        let ok = ServerConfig { host: "127.0.0.1".into(), port: 8080, worker_threads: None };
        assert_eq!(bind_addr(&ok).unwrap().port(), 8080);
        let bad = ServerConfig { host: "not a host".into(), port: 8080, worker_threads: None };
        assert!(matches!(bind_addr(&bad), Err(StartupError::InvalidConfig(_))));
    }
}
