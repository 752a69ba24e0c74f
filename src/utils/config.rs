use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use thiserror::Error;

const MIN_SECRET_KEY_LEN: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::Invalid {
                name: "STORAGE_BACKEND",
                reason: format!("expected 'mongo' or 'memory', got '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub database_url: Option<String>,
    pub database_name: String,
    pub bind_address: String,
    pub secret_key: String,
    pub access_token_minutes: i64,
    pub seed_demo_data: bool,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub log_format: LogFormat,
}

impl AppConfig {

    /// Loads `.env` (if present) and then reads the process environment.
    pub fn load() -> Result<AppConfig, ConfigError> {
        dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let storage_backend = match optional("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Mongo,
        };

        let database_url = optional("DATABASE_URL");
        if storage_backend == StorageBackend::Mongo && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let secret_key = optional("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;
        if secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(ConfigError::Invalid {
                name: "SECRET_KEY",
                reason: format!("must be at least {} characters", MIN_SECRET_KEY_LEN),
            });
        }

        let access_token_minutes = match optional("ACCESS_TOKEN_MINUTES") {
            Some(value) => value.parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "ACCESS_TOKEN_MINUTES",
                    reason: format!("expected a positive number of minutes, got '{}'", value),
                })?,
            None => 15,
        };

        let log_format = match optional("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("compact") | None => LogFormat::Compact,
            Some(other) => return Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                reason: format!("expected 'compact' or 'json', got '{}'", other),
            }),
        };

        let admin_username = optional("ADMIN_USERNAME");
        let admin_password = optional("ADMIN_PASSWORD");
        if admin_username.is_some() != admin_password.is_some() {
            return Err(ConfigError::Invalid {
                name: "ADMIN_USERNAME",
                reason: "ADMIN_USERNAME and ADMIN_PASSWORD must be set together".to_string(),
            });
        }

        Ok(AppConfig {
            storage_backend,
            database_url,
            database_name: optional("DATABASE_NAME").unwrap_or_else(|| "petclinic".to_string()),
            bind_address: optional("BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            secret_key,
            access_token_minutes,
            seed_demo_data: flag("SEED_DEMO_DATA")?,
            admin_username,
            admin_password,
            log_format,
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn flag(name: &'static str) -> Result<bool, ConfigError> {
    match optional(name).as_deref() {
        None => Ok(false),
        Some("1") | Some("true") | Some("TRUE") | Some("yes") => Ok(true),
        Some("0") | Some("false") | Some("FALSE") | Some("no") => Ok(false),
        Some(other) => Err(ConfigError::Invalid {
            name,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
impl AppConfig {
    pub fn test_config() -> AppConfig {
        AppConfig {
            storage_backend: StorageBackend::Memory,
            database_url: None,
            database_name: "petclinic_test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            secret_key: "test_secret_key_for_jwt_signing_operations".to_string(),
            access_token_minutes: 15,
            seed_demo_data: false,
            admin_username: None,
            admin_password: None,
            log_format: LogFormat::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 10] = [
        "STORAGE_BACKEND",
        "DATABASE_URL",
        "DATABASE_NAME",
        "BIND_ADDRESS",
        "SECRET_KEY",
        "ACCESS_TOKEN_MINUTES",
        "SEED_DEMO_DATA",
        "ADMIN_USERNAME",
        "ADMIN_PASSWORD",
        "LOG_FORMAT",
    ];

    fn with_env<F: FnOnce()>(vars: Vec<(&str, &str)>, f: F) {
        let mut all: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|name| (*name, None)).collect();
        for (name, value) in vars {
            if let Some(slot) = all.iter_mut().find(|(n, _)| *n == name) {
                slot.1 = Some(value);
            }
        }
        temp_env::with_vars(all, f);
    }

    #[test]
    fn test_config_defaults_for_mongo_backend() {
        with_env(vec![
            ("DATABASE_URL", "mongodb://localhost:27017"),
            ("SECRET_KEY", "test_secret_key_0123456789"),
        ], || {
            let config = AppConfig::from_env().unwrap();

            assert_eq!(config.storage_backend, StorageBackend::Mongo);
            assert_eq!(config.database_url.as_deref(), Some("mongodb://localhost:27017"));
            assert_eq!(config.database_name, "petclinic");
            assert_eq!(config.bind_address, "127.0.0.1:8080");
            assert_eq!(config.access_token_minutes, 15);
            assert!(!config.seed_demo_data);
            assert_eq!(config.log_format, LogFormat::Compact);
        });
    }

    #[test]
    fn test_mongo_backend_requires_database_url() {
        with_env(vec![("SECRET_KEY", "test_secret_key_0123456789")], || {
            assert_eq!(AppConfig::from_env().unwrap_err(), ConfigError::Missing("DATABASE_URL"));
        });
    }

    #[test]
    fn test_memory_backend_without_database_url() {
        with_env(vec![
            ("STORAGE_BACKEND", "memory"),
            ("SECRET_KEY", "test_secret_key_0123456789"),
            ("SEED_DEMO_DATA", "true"),
        ], || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.storage_backend, StorageBackend::Memory);
            assert!(config.database_url.is_none());
            assert!(config.seed_demo_data);
        });
    }

    #[test]
    fn test_secret_key_is_required_and_long_enough() {
        with_env(vec![("STORAGE_BACKEND", "memory")], || {
            assert_eq!(AppConfig::from_env().unwrap_err(), ConfigError::Missing("SECRET_KEY"));
        });

        with_env(vec![("STORAGE_BACKEND", "memory"), ("SECRET_KEY", "short")], || {
            assert!(matches!(
                AppConfig::from_env().unwrap_err(),
                ConfigError::Invalid { name: "SECRET_KEY", .. }
            ));
        });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        with_env(vec![
            ("STORAGE_BACKEND", "postgres"),
            ("SECRET_KEY", "test_secret_key_0123456789"),
        ], || {
            assert!(matches!(
                AppConfig::from_env().unwrap_err(),
                ConfigError::Invalid { name: "STORAGE_BACKEND", .. }
            ));
        });

        with_env(vec![
            ("STORAGE_BACKEND", "memory"),
            ("SECRET_KEY", "test_secret_key_0123456789"),
            ("ACCESS_TOKEN_MINUTES", "-5"),
        ], || {
            assert!(matches!(
                AppConfig::from_env().unwrap_err(),
                ConfigError::Invalid { name: "ACCESS_TOKEN_MINUTES", .. }
            ));
        });
    }

    #[test]
    fn test_admin_credentials_must_come_in_pairs() {
        with_env(vec![
            ("STORAGE_BACKEND", "memory"),
            ("SECRET_KEY", "test_secret_key_0123456789"),
            ("ADMIN_USERNAME", "admin"),
        ], || {
            assert!(matches!(
                AppConfig::from_env().unwrap_err(),
                ConfigError::Invalid { name: "ADMIN_USERNAME", .. }
            ));
        });
    }
}
