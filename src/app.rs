/*
 * Responsibility
 * - Config読み込み → 依存生成 (DB pool / session cache) → Router 組み立て
 * - Middleware の適用 (CORS / security headers / request-id / trace など)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{Config, SessionBackend, StorageBackend},
    middleware,
    repos::Repos,
    services::cache::{CacheClient, MemoryCache, ValkeyClient},
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG があればそれを優先
    // ex: RUST_LOG=info,subway_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development では即落として気付けるようにする
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting subway-api in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let repos = match &config.storage {
        StorageBackend::Postgres {
            database_url,
            max_connections,
            run_migrations,
        } => {
            let pool = PgPoolOptions::new()
                .max_connections(*max_connections)
                .acquire_timeout(Duration::from_secs(5))
                .connect(database_url)
                .await
                .context("failed to connect to postgres")?;

            if *run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("failed to run migrations")?;
                tracing::info!("migrations applied");
            }
            Repos::postgres(pool)
        }
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on restart");
            Repos::memory()
        }
    };

    let cache: Arc<dyn CacheClient> = match &config.session {
        SessionBackend::Valkey { url } => Arc::new(
            ValkeyClient::new(url)
                .await
                .context("failed to connect to valkey")?,
        ),
        SessionBackend::Memory => Arc::new(MemoryCache::new()),
    };
    tracing::info!(backend = cache.backend_name(), "session store ready");

    Ok(AppState::new(config, repos, cache)?)
}

/// Full application router, middleware included.
pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes(state.clone()).with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
