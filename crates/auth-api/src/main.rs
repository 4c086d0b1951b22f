//! 인증 API 서버.
//!
//! Axum 기반 REST 서버를 시작합니다. 가입/로그인, 토큰 검증,
//! 역할 기반 인가를 제공합니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use auth_api::config::AuthConfig;
use auth_api::routes::create_api_router;
use auth_api::state::AppState;
use auth_api::store::{MemoryUserStore, PgUserStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AuthConfig::from_env()?;

    let store: Arc<dyn UserStore> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(5))
                .connect(url)
                .await
                .context("Postgres 연결 실패")?;
            info!("connected to Postgres");
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory user store");
            Arc::new(MemoryUserStore::new())
        }
    };

    let state = Arc::new(AppState::new(&config, store)?);

    let app = create_api_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.socket_addr().context("잘못된 API_HOST/API_PORT")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("바인딩 실패: {addr}"))?;

    info!(%addr, version = env!("CARGO_PKG_VERSION"), "auth API server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
