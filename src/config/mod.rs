use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file backing the blog
    pub path: PathBuf,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_cors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Signing secret for session tokens
    pub secret_key: String,
    pub session_hours: u64,
    /// bcrypt work factor for stored passwords
    pub password_cost: u32,
}

/// Upper bound on session lifetime: ten years.
pub const MAX_SESSION_HOURS: u64 = 24 * 365 * 10;

fn parse_session_hours(raw: &str, current: u64) -> u64 {
    raw.parse::<u64>().unwrap_or(current).min(MAX_SESSION_HOURS)
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("FLASKR_DATABASE") {
            self.database.path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("FLASKR_BUSY_TIMEOUT_MS") {
            self.database.busy_timeout_ms = v.parse().unwrap_or(self.database.busy_timeout_ms);
        }

        // FLASKR_PORT wins over the generic PORT used by most hosts
        if let Some(port) = env::var("FLASKR_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("FLASKR_ENABLE_CORS") {
            self.server.enable_cors = v.parse().unwrap_or(self.server.enable_cors);
        }

        if let Ok(v) = env::var("FLASKR_SECRET_KEY") {
            self.security.secret_key = v;
        }
        if let Ok(v) = env::var("FLASKR_SESSION_HOURS") {
            self.security.session_hours = parse_session_hours(&v, self.security.session_hours);
        }
        if let Ok(v) = env::var("FLASKR_PASSWORD_COST") {
            self.security.password_cost = v.parse().unwrap_or(self.security.password_cost);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                path: PathBuf::from("instance/flaskr.sqlite"),
                busy_timeout_ms: 5_000,
            },
            server: ServerConfig {
                port: 5000,
                enable_cors: true,
            },
            security: SecurityConfig {
                secret_key: "dev".to_string(),
                session_hours: 24 * 7,
                password_cost: crate::auth::DEFAULT_COST,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                path: PathBuf::from("instance/flaskr.sqlite"),
                busy_timeout_ms: 1_000,
            },
            server: ServerConfig {
                port: 5000,
                enable_cors: false,
            },
            security: SecurityConfig {
                // Left empty so token signing fails loudly until FLASKR_SECRET_KEY is set
                secret_key: String::new(),
                session_hours: 4,
                password_cost: crate::auth::DEFAULT_COST,
            },
        }
    }

    /// Development defaults pointed at a specific database file.
    pub fn for_database(path: impl Into<PathBuf>) -> Self {
        let mut config = Self::development();
        config.database.path = path.into();
        config
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.security.secret_key, "dev");
        assert_eq!(config.database.path, PathBuf::from("instance/flaskr.sqlite"));
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(config.security.secret_key.is_empty());
        assert!(!config.server.enable_cors);
    }

    #[test]
    fn test_for_database_overrides_path_only() {
        let config = AppConfig::for_database("/tmp/blog.sqlite");
        assert_eq!(config.database.path, PathBuf::from("/tmp/blog.sqlite"));
        assert_eq!(config.security.session_hours, 24 * 7);
    }

    #[test]
    fn test_session_hours_are_clamped() {
        assert_eq!(parse_session_hours("12", 4), 12);
        assert_eq!(parse_session_hours("not-a-number", 4), 4);
        assert_eq!(parse_session_hours("18446744073709551615", 4), MAX_SESSION_HOURS);
    }
}
