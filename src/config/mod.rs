use std::env;

use serde::{Deserialize, Serialize};

/// Application configuration, built once in `main` and passed into the
/// persistence and auth layers explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file, created on first start.
    pub path: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("ATENDE_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("ATENDE_DATABASE_PATH") {
            self.database.path = v;
        }
        if let Ok(v) = env::var("ATENDE_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("ATENDE_JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("ATENDE_JWT_EXPIRY_MINUTES") {
            self.security.jwt_expiry_minutes = v.parse().unwrap_or(self.security.jwt_expiry_minutes);
        }
        if let Ok(v) = env::var("ATENDE_BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 8000 },
            database: DatabaseConfig {
                path: "atendimentos.db".to_string(),
                max_connections: 5,
            },
            security: SecurityConfig {
                // Development fallback only; set ATENDE_JWT_SECRET in production
                jwt_secret: "dev-secret-mude-em-producao".to_string(),
                jwt_expiry_minutes: 60,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 8000 },
            database: DatabaseConfig {
                path: "atendimentos.db".to_string(),
                max_connections: 10,
            },
            security: SecurityConfig {
                // Must come from ATENDE_JWT_SECRET; an empty secret fails
                // token generation at the first auth request
                jwt_secret: String::new(),
                jwt_expiry_minutes: 60,
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }
}
