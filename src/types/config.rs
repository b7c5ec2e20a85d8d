//! Service configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::{
    DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_BATCH_TEXTS, DEFAULT_MAX_BULK_BATCHES,
    DEFAULT_MAX_CONCURRENT_BATCHES, DEFAULT_MAX_TEXT_BYTES, DEFAULT_PORT, DEFAULT_TOP_WORDS,
};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "TEXTLYTICS";

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "TEXTLYTICS_CONFIG";

/// Global analytics service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum texts accepted in one batch
    pub max_batch_texts: usize,

    /// Maximum size of a single text in bytes
    pub max_text_bytes: usize,

    /// Maximum batches in one bulk request
    pub max_bulk_batches: usize,

    /// Number of reports kept in the query history
    pub history_capacity: usize,

    /// Number of ranked words returned to clients
    pub top_words: usize,

    /// Batches analyzed at once by the bulk processor
    pub max_concurrent_batches: usize,

    /// Stop words added on top of the built-in set
    pub extra_stop_words: Vec<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_batch_texts: DEFAULT_MAX_BATCH_TEXTS,
            max_text_bytes: DEFAULT_MAX_TEXT_BYTES,
            max_bulk_batches: DEFAULT_MAX_BULK_BATCHES,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            top_words: DEFAULT_TOP_WORDS,
            max_concurrent_batches: DEFAULT_MAX_CONCURRENT_BATCHES,
            extra_stop_words: Vec::new(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from the environment.
    ///
    /// Falls back to defaults if loading or validation fails.
    pub fn from_env() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Failed to load configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration in layers:
    /// 1. built-in defaults
    /// 2. the TOML file named by `TEXTLYTICS_CONFIG`, if set
    /// 3. `TEXTLYTICS_*` environment variables
    pub fn load() -> AnalyticsResult<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).ok();
        Self::load_from(path.as_deref().map(Path::new))
    }

    /// Load configuration with an explicit optional config file.
    pub fn load_from(path: Option<&Path>) -> AnalyticsResult<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("extra_stop_words"),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make the service unusable.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let limits = [
            ("max_batch_texts", self.max_batch_texts),
            ("max_text_bytes", self.max_text_bytes),
            ("max_bulk_batches", self.max_bulk_batches),
            ("history_capacity", self.history_capacity),
            ("top_words", self.top_words),
            ("max_concurrent_batches", self.max_concurrent_batches),
        ];

        for (name, value) in limits {
            if value == 0 {
                return Err(AnalyticsError::InvalidConfig(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
