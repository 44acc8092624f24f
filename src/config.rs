use std::net::{Ipv6Addr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    /// Postgres connection string; in-memory stores are used when absent.
    pub database_url: Option<String>,
    pub pool_size: u32,
    /// JSON file with tokens and notes loaded into the in-memory stores.
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),
    #[error("invalid {name} value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    /// Reads the process environment, after applying a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let listen_addr: SocketAddr = match non_empty("LISTEN_ADDR") {
            Some(value) => value.parse().map_err(|err: std::net::AddrParseError| {
                ConfigError::Invalid {
                    name: "LISTEN_ADDR",
                    value: value.clone(),
                    reason: err.to_string(),
                }
            })?,
            None => SocketAddr::from((Ipv6Addr::UNSPECIFIED, DEFAULT_PORT)),
        };

        let pool_size = match non_empty("POOL_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        name: "POOL_SIZE",
                        value,
                        reason: "must be at least 1".to_string(),
                    })
                }
                Err(err) => {
                    return Err(ConfigError::Invalid {
                        name: "POOL_SIZE",
                        value,
                        reason: err.to_string(),
                    })
                }
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            listen_addr,
            database_url: non_empty("DATABASE_URL"),
            pool_size,
            seed_path: non_empty("SEED_PATH").map(PathBuf::from),
        })
    }
}
