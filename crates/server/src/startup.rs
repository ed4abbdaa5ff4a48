use std::{env, net::SocketAddr, time::Duration};

use axum::http::HeaderValue;
use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use crate::routes::{self, AppState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

/// Permissive CORS unless the config pins an origin list.
fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::very_permissive();
    }
    let origins: Vec<HeaderValue> = allowed_origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

fn database_config(cfg: &configs::DatabaseConfig) -> models::db::DatabaseConfig {
    models::db::DatabaseConfig {
        url: cfg.url.clone(),
        max_connections: cfg.max_connections,
        min_connections: cfg.min_connections,
        connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
        idle_timeout: Duration::from_secs(cfg.idle_timeout_secs),
        max_lifetime: Duration::from_secs(cfg.max_lifetime_secs),
        acquire_timeout: Duration::from_secs(cfg.acquire_timeout_secs),
        sqlx_logging: cfg.sqlx_logging,
    }
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> anyhow::Result<SocketAddr> {
    let (host, port) = match cfg {
        Some(c) => (c.server.host.clone(), c.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // Config file is optional; without one, env vars and defaults apply
    let cfg = configs::AppConfig::load_and_validate().ok();

    let db_cfg = match &cfg {
        Some(c) => database_config(&c.database),
        None => models::db::DatabaseConfig::from_env(),
    };
    let db = models::db::connect_with_config(&db_cfg).await?;
    models::schema::init(&db).await?;

    let state = AppState::new(db);
    let cors = build_cors(
        cfg.as_ref()
            .map(|c| c.server.allowed_origins.as_slice())
            .unwrap_or(&[]),
    );
    let app: Router = routes::build_router(state, cors);

    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, "starting lilazul backend");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
