//! API configuration

use std::time::Duration;

use serde::Deserialize;

use core_kernel::CoreError;
use domain_registration::adapters::notion::{DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION};
use domain_registration::{FixedDelayPacing, NotionConfig, RecordSchema, SchemaVersion};

/// Hosts allowed to embed the pages by default
pub const DEFAULT_FRAME_ANCESTORS: &str = "'self' https://*.softr.app https://*.softr.io";

/// Header value matching [`DEFAULT_FRAME_ANCESTORS`]
pub const DEFAULT_CONTENT_SECURITY_POLICY: &str =
    "frame-ancestors 'self' https://*.softr.app https://*.softr.io";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Notion integration secret
    pub notion_api_key: Option<String>,
    /// Database receiving participant pages
    pub notion_database_id: Option<String>,
    /// Notion API base URL
    pub notion_base_url: String,
    /// Value of the `Notion-Version` header
    pub notion_version: String,
    /// Timeout for Notion calls; transport default when unset
    pub request_timeout_secs: Option<u64>,
    /// Property layout of the database (`v1` or `v2`)
    pub schema_version: String,
    /// Batch size above which writes are paced
    pub pacing_threshold: usize,
    /// Pause between paced writes, in milliseconds
    pub pacing_delay_ms: u64,
    /// Sources allowed to frame the pages
    pub frame_ancestors: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            notion_api_key: None,
            notion_database_id: None,
            notion_base_url: DEFAULT_BASE_URL.to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            request_timeout_secs: None,
            schema_version: SchemaVersion::default().to_string(),
            pacing_threshold: domain_registration::pacing::DEFAULT_THRESHOLD,
            pacing_delay_ms: domain_registration::pacing::DEFAULT_DELAY.as_millis() as u64,
            frame_ancestors: DEFAULT_FRAME_ANCESTORS.to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    ///
    /// Reads `API_`-prefixed variables. The Notion credentials also fall back
    /// to the unprefixed `NOTION_API_KEY` and `NOTION_DATABASE_ID`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let mut config =
            Self::from_environment(config::Environment::with_prefix("API").try_parsing(true))?;

        if config.notion_api_key.is_none() {
            config.notion_api_key = std::env::var("NOTION_API_KEY").ok();
        }
        if config.notion_database_id.is_none() {
            config.notion_database_id = std::env::var("NOTION_DATABASE_ID").ok();
        }

        Ok(config)
    }

    /// Loads configuration from an environment source
    ///
    /// Unset keys keep their defaults; a value of the wrong type is an error.
    pub fn from_environment(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the Notion adapter configuration
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` when the API key or database id is
    /// missing, or the schema version is unknown.
    pub fn notion_config(&self) -> Result<NotionConfig, CoreError> {
        let api_key = required(&self.notion_api_key, "NOTION_API_KEY")?;
        let database_id = required(&self.notion_database_id, "NOTION_DATABASE_ID")?;
        let version: SchemaVersion = self.schema_version.parse()?;

        let mut notion = NotionConfig::new(api_key, database_id)
            .with_base_url(&self.notion_base_url)
            .with_schema(RecordSchema::for_version(version));
        notion.notion_version = self.notion_version.clone();
        if let Some(secs) = self.request_timeout_secs {
            notion = notion.with_timeout_secs(secs);
        }

        Ok(notion)
    }

    /// Pacing policy for submissions
    pub fn pacing(&self) -> FixedDelayPacing {
        FixedDelayPacing::new(self.pacing_threshold, Duration::from_millis(self.pacing_delay_ms))
    }

    /// Value of the `Content-Security-Policy` header
    pub fn content_security_policy(&self) -> String {
        format!("frame-ancestors {}", self.frame_ancestors.trim())
    }
}

fn required(value: &Option<String>, name: &str) -> Result<String, CoreError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::configuration(format!("{name} is not set")))
}
