use std::collections::HashMap;
use std::sync::RwLock;

use axum::async_trait;

use crate::modules::auth::types::Identity;
use crate::modules::common::StoreError;
use crate::types::{ConnectionPool, TOKEN_TABLE_NAME};

/// Exact-match lookup from an opaque bearer token to its owner.
#[async_trait]
pub trait TokenIdentityStore: Send + Sync {
    async fn lookup(&self, token: &str) -> Result<Option<Identity>, StoreError>;
}

pub struct PgTokenStore {
    pool: ConnectionPool,
}

impl PgTokenStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenIdentityStore for PgTokenStore {
    async fn lookup(&self, token: &str) -> Result<Option<Identity>, StoreError> {
        let conn = self.pool.get().await?;

        let row = conn
            .query_opt(
                &format!("SELECT email FROM {TOKEN_TABLE_NAME} WHERE token = $1"),
                &[&token],
            )
            .await?;

        Ok(row.map(|row| Identity(row.get(0))))
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<String, Identity>>,
}

impl MemoryTokenStore {
    pub fn new(tokens: HashMap<String, Identity>) -> Self {
        Self { tokens: RwLock::new(tokens) }
    }

    pub fn insert(&self, token: impl Into<String>, identity: Identity) -> Result<(), StoreError> {
        let mut tokens = self.tokens.write().map_err(|_| StoreError::Poisoned)?;
        tokens.insert(token.into(), identity);
        Ok(())
    }
}

#[async_trait]
impl TokenIdentityStore for MemoryTokenStore {
    async fn lookup(&self, token: &str) -> Result<Option<Identity>, StoreError> {
        let tokens = self.tokens.read().map_err(|_| StoreError::Poisoned)?;
        Ok(tokens.get(token).cloned())
    }
}
