use axum::{routing::get, routing::post, Router};
use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::NoTls;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod db;
pub mod middleware;
pub mod modules;
pub mod seed;
pub mod types;

#[cfg(test)]
mod test_support;

use crate::config::Config;
use crate::middleware::auth::auth;
use crate::modules::health::api::*;
use crate::modules::missing_positive::api::*;
use crate::modules::notes::api::*;
use crate::seed::MemorySeed;
use crate::types::{AppState, StartupError};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_lookup=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run().await {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;
    let state = build_state(&config).await?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .map_err(StartupError::Bind)?;

    tracing::info!("listening on {}", config.listen_addr);

    axum::serve(listener, app(state))
        .await
        .map_err(StartupError::Serve)
}

async fn build_state(config: &Config) -> Result<AppState, StartupError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL is not set, serving from in-memory stores");
        let seed = match &config.seed_path {
            Some(path) => MemorySeed::load(path)?,
            None => MemorySeed::default(),
        };
        tracing::info!(tokens = seed.tokens.len(), notes = seed.notes.len(), "loaded seed");
        return Ok(seed.into_state());
    };

    // set up connection pool
    let manager = PostgresConnectionManager::new_from_stringlike(url, NoTls)?;
    let pool = Pool::builder().max_size(config.pool_size).build(manager).await?;

    let applied = db::migrate(&pool).await?;
    tracing::info!(applied, "database schema is up to date");

    Ok(AppState::postgres(pool))
}

pub fn app(state: AppState) -> Router {
    let authenticated = Router::new()
        .route("/notes", get(get_notes))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth));

    let open = Router::new()
        .route("/invoke", post(invoke))
        .route("/missing-positive", post(missing_positive))
        .route("/health", get(health));

    Router::new()
        .merge(authenticated)
        .merge(open)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
