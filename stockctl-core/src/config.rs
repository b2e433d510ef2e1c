//! Database configuration
//!
//! Built once at startup and handed to [`ConnectionProvider`](crate::ConnectionProvider).
//! Values come from `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and
//! `DB_NAME`, falling back to a local development database.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Default host for a local development database
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default PostgreSQL port
pub const DEFAULT_PORT: u16 = 5432;
/// Default role name
pub const DEFAULT_USER: &str = "tlapp";
/// Default database name
pub const DEFAULT_DATABASE: &str = "twinliquors";

/// Connection settings for the relational store
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: String::new(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

// Password stays out of logs.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

impl DbConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to the defaults; a `DB_PORT` that is not a valid
    /// port number is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("DB_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                StoreError::config(format!("DB_PORT must be a port number, got '{}'", raw))
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port,
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
        })
    }

    /// `host:port/database` for log lines
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

/// Get the stockctl config directory path (~/.stockctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stockctl"))
}

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Variables already set in the environment
/// 2. Current directory .env
/// 3. ~/.stockctl/.env
///
/// dotenvy never overwrites a variable that is already set, so loading the
/// current directory first gives it precedence over the home file.
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path.display().to_string());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.stockctl: {}", env_file.display());
                    loaded_from.push(env_file.display().to_string());
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.stockctl)");
    } else {
        info!("Loaded configuration from: {}", loaded_from.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn defaults_target_local_database() {
        let config = DbConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, DbConfig::default());
        assert_eq!(config.target(), "127.0.0.1:5432/twinliquors");
        assert_eq!(config.user, "tlapp");
        assert!(config.password.is_empty());
    }

    #[test]
    fn environment_overrides_each_field() {
        let config = DbConfig::from_lookup(lookup_in(HashMap::from([
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "stock"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "store_42"),
        ])))
        .unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "stock");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.database, "store_42");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = DbConfig::from_lookup(lookup_in(HashMap::from([("DB_PORT", "not-a-port")])))
            .unwrap_err();
        assert!(err.to_string().contains("DB_PORT"));
    }

    #[test]
    fn debug_hides_password() {
        let config = DbConfig {
            password: "hunter2".into(),
            ..DbConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
    }
}
