//! MemberDesk server binary.
//!
//! Loads configuration, connects to PostgreSQL, wires the adapters and
//! serves the member API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use memberdesk::adapters::http::{member_router, MemberAppState};
use memberdesk::adapters::postgres::{PostgresMemberReader, PostgresMemberRepository};
use memberdesk::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let state = MemberAppState::new(
        Arc::new(PostgresMemberRepository::new(pool.clone())),
        Arc::new(PostgresMemberReader::new(pool)),
        config.packages.policy(),
    );

    let app = Router::new()
        .nest("/api", member_router())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server)?)
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(environment = ?config.server.environment, "listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the CORS layer from configured origins, or a permissive layer
/// when none are configured (development).
fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let mut parsed = Vec::with_capacity(origins.len());
    for origin in &origins {
        parsed.push(origin.parse::<HeaderValue>()?);
    }
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any))
}
