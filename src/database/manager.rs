use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    /// The store rejected a write because a unique key already exists
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::UniqueViolation(db_err.constraint().unwrap_or("unknown").to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

/// Builds the connection pool shared by every request
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool using the configured settings
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&connection_string)
            .await?;

        info!(
            "Created database pool for {} (max {} connections)",
            config.name, config.max_connections
        );
        Ok(pool)
    }

    /// Use DATABASE_URL verbatim when present, otherwise assemble one from parts
    pub fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        if let Some(url) = &config.url {
            url::Url::parse(url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
            return Ok(url.clone());
        }

        let mut url = url::Url::parse("postgres://localhost").map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_host(Some(&config.host)).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_port(Some(config.port)).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        url.set_username(&config.user).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !config.password.is_empty() {
            url.set_password(Some(&config.password)).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        url.set_path(&format!("/{}", config.name));
        Ok(url.into())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
