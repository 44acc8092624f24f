use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use bb8::Pool;
use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::NoTls;

use crate::modules::auth::store::{MemoryTokenStore, PgTokenStore, TokenIdentityStore};
use crate::modules::notes::store::{MemoryNotesStore, NotesStore, PgNotesStore};

pub type ConnectionPool = Pool<PostgresConnectionManager<NoTls>>;

pub const TOKEN_TABLE_NAME: &str = "token_email_lookup";
pub const NOTES_TABLE_NAME: &str = "user_notes";

/// Hard cap on the number of notes returned for one identity.
pub const NOTES_LIMIT: i64 = 10;

pub const RESPONSE_HEADERS: [(&str, &str); 2] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
];

/// Utility function for mapping any error into a `500 Internal Server Error` response.
pub fn internal_error<E>(err: E) -> (StatusCode, String) where E: std::error::Error {
    tracing::error!("internal error: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// Builds a response carrying the JSON and CORS headers every lookup answer has.
pub fn json_response(status: StatusCode, body: Option<String>) -> Response {
    match body {
        Some(body) => (status, RESPONSE_HEADERS, body).into_response(),
        None => (status, RESPONSE_HEADERS).into_response(),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<dyn TokenIdentityStore>,
    pub notes: Arc<dyn NotesStore>,
    pub pool: Option<ConnectionPool>,
}

impl AppState {
    pub fn postgres(pool: ConnectionPool) -> Self {
        Self {
            tokens: Arc::new(PgTokenStore::new(pool.clone())),
            notes: Arc::new(PgNotesStore::new(pool.clone())),
            pool: Some(pool),
        }
    }

    pub fn in_memory(tokens: MemoryTokenStore, notes: MemoryNotesStore) -> Self {
        Self {
            tokens: Arc::new(tokens),
            notes: Arc::new(notes),
            pool: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
    #[error(transparent)]
    Seed(#[from] crate::seed::SeedError),
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),
    #[error("could not get a connection for migrations: {0}")]
    Pool(#[from] bb8::RunError<tokio_postgres::Error>),
    #[error("migration failed: {0}")]
    Migration(#[from] refinery::Error),
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
