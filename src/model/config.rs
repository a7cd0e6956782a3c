use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::RulesetTable;

const ENV_CONFIG_PATH: &str = "ELECTIFY_CONFIG_PATH";
const ENV_JWT_SECRET: &str = "JWT_SECRET";
const ENV_DATABASE_DISABLED: &str = "ELECTIFY_DATABASE_DISABLED";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_PORT: u16 = 5000;

const ENV_POSTGRES_HOST: &str = "ELECTIFY_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "ELECTIFY_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "ELECTIFY_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "ELECTIFY_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "ELECTIFY_POSTGRES_DB";
const ENV_POSTGRES_MAX_CONNECTIONS: &str = "ELECTIFY_POSTGRES_MAX_CONNECTIONS";
const DEFAULT_POSTGRES_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Extra or overriding anonymization rulesets and the default selector
    #[serde(default)]
    pub anonymizer: RulesetTable,
}

/// PostgreSQL connection settings for the activity store
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_POSTGRES_PORT,
            user: "electify".to_string(),
            password: "electify".to_string(),
            name: "electify".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

impl DatabaseConfig {
    /// Read `ELECTIFY_POSTGRES_*` and `ELECTIFY_DATABASE_DISABLED` through `lookup`.
    /// Unset or unparseable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let enabled = !lookup(ENV_DATABASE_DISABLED)
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            enabled,
            host: lookup(ENV_POSTGRES_HOST).unwrap_or(defaults.host),
            port: lookup(ENV_POSTGRES_PORT)
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            user: lookup(ENV_POSTGRES_USER).unwrap_or(defaults.user),
            password: lookup(ENV_POSTGRES_PASSWORD).unwrap_or(defaults.password),
            name: lookup(ENV_POSTGRES_DB).unwrap_or(defaults.name),
            max_connections: lookup(ENV_POSTGRES_MAX_CONNECTIONS)
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_connections),
        }
    }

    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub anonymizer: RulesetTable,
    pub port: u16,
    pub host: String,
    /// HS256 secret for bearer tokens. Without it every caller is anonymous.
    pub jwt_secret: Option<String>,
    pub database: DatabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            anonymizer: RulesetTable::default(),
            port: DEFAULT_PORT,
            host: "127.0.0.1".to_string(),
            jwt_secret: None,
            database: DatabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let jwt_secret = std::env::var(ENV_JWT_SECRET)
            .ok()
            .filter(|s| !s.trim().is_empty());

        let database = DatabaseConfig::from_lookup(|key| std::env::var(key).ok());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let anonymizer = Self::load_config_file(&config_path)
            .map(|cf| cf.anonymizer)
            .unwrap_or_default();

        Self {
            anonymizer,
            port,
            host,
            jwt_secret,
            database,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse_config_file(&contents) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration from file");
                    Some(config)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    /// Parse config file contents; an empty file yields the defaults
    fn parse_config_file(contents: &str) -> Result<ConfigFile, serde_yaml::Error> {
        let contents = contents.trim();
        if contents.is_empty() {
            return Ok(ConfigFile::default());
        }
        serde_yaml::from_str(contents)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
