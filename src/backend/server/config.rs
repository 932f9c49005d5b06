/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opening the database connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables once at startup. The
 * binary loads `config/config.env` and then `.env` into the environment
 * before calling [`AppConfig::from_env`]. Tests build a config from a
 * closure with [`AppConfig::from_vars`] instead of touching the process
 * environment.
 *
 * | Variable | Default |
 * |---|---|
 * | `SESSION_SECRET` | required |
 * | `APP_ENV` | `production` |
 * | `PORT` | `3001` |
 * | `DATABASE_URL` | `sqlite://huddle.db` |
 * | `IMAGES_DIR` | `../public/images` |
 * | `STATIC_DIR` | `public` |
 * | `SESSION_TTL_SECS` | `1209600` |
 * | `SESSION_CLEANUP_INTERVAL_SECS` | `600` |
 *
 * # Error Handling
 *
 * Unlike optional integrations, everything here is required for the server
 * to do its job: a missing secret, an unparsable number or an unreachable
 * database all abort startup.
 */

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::backend::error::BackendError;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://huddle.db";
pub const DEFAULT_IMAGES_DIR: &str = "../public/images";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 14 * 24 * 60 * 60;
pub const DEFAULT_SESSION_CLEANUP_INTERVAL_SECS: u64 = 600;

/// Configuration errors raised while reading the environment
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    MissingValue(&'static str),

    #[error("Invalid number for {name}: {value:?}")]
    InvalidNumber {
        name: &'static str,
        value: String,
    },
}

/// Run mode selected by `APP_ENV`
///
/// Only development mode changes behaviour (request logging). Any other
/// value is kept verbatim so it can be reported in the startup line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Other(String),
}

impl RunMode {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl From<&str> for RunMode {
    fn from(value: &str) -> Self {
        match value {
            "development" => Self::Development,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Other(mode) => f.write_str(mode),
        }
    }
}

/// Typed startup configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub run_mode: RunMode,
    pub session_secret: String,
    pub database_url: String,
    pub images_dir: PathBuf,
    pub static_dir: PathBuf,
    pub session_ttl: Duration,
    pub session_cleanup_interval: Duration,
}

impl AppConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary lookup function
    ///
    /// Empty values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let session_secret =
            get("SESSION_SECRET").ok_or(ConfigError::MissingValue("SESSION_SECRET"))?;

        let run_mode = get("APP_ENV")
            .map(|mode| RunMode::from(mode.as_str()))
            .unwrap_or_else(|| RunMode::Other("production".to_string()));

        let port = match get("PORT") {
            Some(value) => parse_number::<u16>("PORT", &value)?,
            None => DEFAULT_PORT,
        };

        let session_ttl_secs = match get("SESSION_TTL_SECS") {
            Some(value) => parse_number::<u64>("SESSION_TTL_SECS", &value)?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        let cleanup_secs = match get("SESSION_CLEANUP_INTERVAL_SECS") {
            Some(value) => parse_number::<u64>("SESSION_CLEANUP_INTERVAL_SECS", &value)?,
            None => DEFAULT_SESSION_CLEANUP_INTERVAL_SECS,
        };

        Ok(Self {
            port,
            run_mode,
            session_secret,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            images_dir: PathBuf::from(
                get("IMAGES_DIR").unwrap_or_else(|| DEFAULT_IMAGES_DIR.to_string()),
            ),
            static_dir: PathBuf::from(
                get("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            ),
            session_ttl: Duration::from_secs(session_ttl_secs),
            session_cleanup_interval: Duration::from_secs(cleanup_secs.max(1)),
        })
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

/// Open the database connection pool and run migrations
///
/// This function:
/// 1. Parses `database_url` as a SQLite URL (creating the file if missing)
/// 2. Creates the connection pool
/// 3. Runs the embedded migrations from `migrations/`
///
/// In-memory databases live only as long as their connection, so they are
/// pinned to a single connection that is never recycled.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new().connect_with(options).await?
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
