//! Configuration loading and management
//!
//! Settings are layered: an optional YAML file (path in `BOOKING_CONFIG`),
//! then a `.env` file in the working directory, then the process
//! environment. Later layers win.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_NAME: &str = "Restaurant-AI";

/// Which record store backs the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Mongodb,
    Memory,
}

/// Document database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string; required when the MongoDB backend is selected
    #[serde(default)]
    pub connection_string: Option<String>,

    #[serde(default = "default_db_name")]
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            database: default_db_name(),
        }
    }
}

/// Media service credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveKitConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub storage: StorageBackend,

    #[serde(default)]
    pub mongo: MongoConfig,

    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Insert the demo bookings at startup
    #[serde(default)]
    pub seed_demo: bool,
}

/// Non-blank, trimmed value of an environment variable
fn lookup<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            storage: StorageBackend::default(),
            mongo: MongoConfig::default(),
            livekit: LiveKitConfig::default(),
            seed_demo: false,
        }
    }
}

impl AppConfig {
    /// Load from every layer and validate.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is fine; variables may come from the real environment.
        let _ = dotenvy::dotenv();

        let vars: HashMap<String, String> = std::env::vars().collect();
        let mut config = match vars.get("BOOKING_CONFIG") {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(&vars)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Override fields from environment variables.
    pub fn apply_env(&mut self, vars: &HashMap<String, String>) -> Result<(), ConfigError> {
        let get = |key: &str| lookup(vars, key);

        if let Some(host) = get("HOST") {
            self.host = host.to_string();
        }
        if let Some(port) = get("PORT") {
            self.port = port.parse().map_err(|e| ConfigError::InvalidValue {
                field: "PORT",
                value: port.to_string(),
                message: format!("{e}"),
            })?;
        }
        if let Some(storage) = get("BOOKING_STORAGE") {
            self.storage = match storage.to_ascii_lowercase().as_str() {
                "mongodb" | "mongo" => StorageBackend::Mongodb,
                "memory" | "in-memory" => StorageBackend::Memory,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "BOOKING_STORAGE",
                        value: storage.to_string(),
                        message: "expected 'mongodb' or 'memory'".to_string(),
                    });
                }
            };
        }
        if let Some(uri) = get("MONGO_CONNECTION_STRING") {
            self.mongo.connection_string = Some(uri.to_string());
        }
        if let Some(db) = get("MONGO_DB_NAME") {
            self.mongo.database = db.to_string();
        }
        if let Some(url) = get("LIVEKIT_URL") {
            self.livekit.url = Some(url.to_string());
        }
        if let Some(key) = get("LIVEKIT_API_KEY") {
            self.livekit.api_key = Some(key.to_string());
        }
        if let Some(secret) = get("LIVEKIT_API_SECRET") {
            self.livekit.api_secret = Some(secret.to_string());
        }
        if let Some(seed) = get("BOOKING_SEED_DEMO") {
            self.seed_demo = matches!(seed.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Reject configurations the server cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage == StorageBackend::Mongodb {
            if !cfg!(feature = "mongodb_backend") {
                return Err(ConfigError::InvalidValue {
                    field: "BOOKING_STORAGE",
                    value: "mongodb".to_string(),
                    message: "built without the mongodb_backend feature".to_string(),
                });
            }
            if self.mongo.connection_string.is_none() {
                return Err(ConfigError::MissingField("MONGO_CONNECTION_STRING"));
            }
        }
        Ok(())
    }

    /// Address to bind, e.g. `0.0.0.0:3000`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
