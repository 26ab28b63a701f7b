use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

/// Default knobs for the query surface; callers can override per call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub default_limit: i64,
    pub topic_limit: i64,
    pub min_mentions: i64,
    pub active_days: i64,
    pub dormant_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "store/messages.db".to_string(),
                max_connections: 10,
                connection_timeout_secs: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
            query: QueryConfig {
                default_limit: 100,
                topic_limit: 50,
                min_mentions: 2,
                active_days: 30,
                dormant_days: 90,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        // Start with default values
        for (key, value) in AppConfig::default() {
            builder = builder
                .set_default(key.as_str(), value)
                .map_err(|e| anyhow::anyhow!("Failed to set default configuration: {e}"))?;
        }

        let config = builder
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("config").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("WA_DIRECTORY").separator("__"))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {e}"))?;

        // Validate configuration
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate database config
        if self.database.url.trim().is_empty() {
            return Err(anyhow::anyhow!("database url cannot be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!("max_connections must be greater than 0"));
        }
        if self.database.connection_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "connection_timeout_secs must be greater than 0"
            ));
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        // Validate query config
        if self.query.default_limit <= 0 {
            return Err(anyhow::anyhow!("default_limit must be greater than 0"));
        }
        if self.query.topic_limit <= 0 {
            return Err(anyhow::anyhow!("topic_limit must be greater than 0"));
        }
        if self.query.min_mentions < 0 {
            return Err(anyhow::anyhow!("min_mentions cannot be negative"));
        }
        if self.query.active_days <= 0 || self.query.dormant_days <= 0 {
            return Err(anyhow::anyhow!("day thresholds must be greater than 0"));
        }

        Ok(())
    }

    /// Get database URL from environment or config
    #[must_use]
    pub fn get_database_url(&self) -> String {
        std::env::var("DATABASE_URL").unwrap_or_else(|_| self.database.url.clone())
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}

impl IntoIterator for AppConfig {
    type Item = (String, config::Value);
    type IntoIter = std::collections::hash_map::IntoIter<String, config::Value>;

    fn into_iter(self) -> Self::IntoIter {
        let mut map = std::collections::HashMap::new();

        // Flatten the configuration into key-value pairs
        map.insert(
            "database.url".to_string(),
            config::Value::from(self.database.url),
        );
        map.insert(
            "database.max_connections".to_string(),
            config::Value::from(self.database.max_connections),
        );
        map.insert(
            "database.connection_timeout_secs".to_string(),
            config::Value::from(self.database.connection_timeout_secs),
        );

        map.insert(
            "logging.level".to_string(),
            config::Value::from(self.logging.level),
        );
        if let Some(file_path) = self.logging.file_path {
            map.insert("logging.file_path".to_string(), config::Value::from(file_path));
        }
        map.insert(
            "logging.format".to_string(),
            config::Value::from(self.logging.format),
        );

        map.insert(
            "query.default_limit".to_string(),
            config::Value::from(self.query.default_limit),
        );
        map.insert(
            "query.topic_limit".to_string(),
            config::Value::from(self.query.topic_limit),
        );
        map.insert(
            "query.min_mentions".to_string(),
            config::Value::from(self.query.min_mentions),
        );
        map.insert(
            "query.active_days".to_string(),
            config::Value::from(self.query.active_days),
        );
        map.insert(
            "query.dormant_days".to_string(),
            config::Value::from(self.query.dormant_days),
        );

        map.into_iter()
    }
}
