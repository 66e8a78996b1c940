use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Full connection string; when set it wins over the individual fields
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("DATABASE_PORT") {
            self.database.port = v.parse().unwrap_or(self.database.port);
        }
        if let Ok(v) = env::var("DATABASE_USER") {
            self.database.user = v;
        }
        if let Ok(v) = env::var("DATABASE_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("DATABASE_NAME") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Ok(v) = env::var("EDUTRACK_HOST") {
            self.api.host = v;
        }
        if let Some(port) = env::var("EDUTRACK_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = parse_origins(&v);
        }
        if let Ok(v) = env::var("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                host: "localhost".to_string(),
                port: 5432,
                user: "postgres".to_string(),
                password: String::new(),
                name: "edutrack_lms".to_string(),
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 4000,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                // The bundled frontend is opened from file://, so allow any origin
                cors_origins: vec!["*".to_string()],
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
                ..Self::development().database
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 4000,
                max_request_size_bytes: 1024 * 1024,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.edutrack.local".to_string()],
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
                ..Self::development().database
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 4000,
                max_request_size_bytes: 1024 * 1024,
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
                bcrypt_cost: 12,
            },
        }
    }

    /// Socket address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
