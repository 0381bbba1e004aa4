//! Centralized configuration management for productsearch
//!
//! This crate provides a unified, type-safe configuration for every service in
//! the workspace with support for multiple sources (environment, TOML files).
//!
//! Configuration follows a simple hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. TOML file values
//! 3. Environment variable overrides
//! 4. Runtime validation

pub mod error;
pub mod source;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use source::{ConfigurationLoader, ConfigurationSource, EnvironmentSource, TomlFileSource};
pub use validation::Validate;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// SAFE DEFAULTS - Work for any environment (dev, staging, prod, test)
// =============================================================================

// Embedding Provider Configuration
const DEFAULT_EMBEDDING_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";
const DEFAULT_EMBEDDING_DIMENSIONS: usize = 1536; // ada-002 / reference index mapping
const DEFAULT_EMBEDDING_TIMEOUT_SECONDS: u64 = 10;

// Document Index Configuration
const DEFAULT_INDEX_URL: &str = "http://localhost:9200";
const DEFAULT_INDEX_NAME: &str = "products";
const DEFAULT_INDEX_TIMEOUT_SECONDS: u64 = 30;

// API Server Configuration
const DEFAULT_API_HOST: &str = "0.0.0.0";
const DEFAULT_API_PORT: u16 = 8080;

// Telemetry Configuration
const DEFAULT_TRACING_LEVEL: &str = "info";
const DEFAULT_JSON_LOGS: bool = false;
const DEFAULT_SERVICE_NAME: &str = "productsearch";

/// Conventional variable holding the embedding provider key
const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Core configuration for the entire productsearch application
///
/// Every section has safe defaults, so a partial TOML file only needs to name
/// the values it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Embedding provider configuration
    pub embedding: EmbeddingConfig,

    /// Document index (Elasticsearch) configuration
    pub document_index: DocumentIndexConfig,

    /// API server configuration
    pub api: ApiConfig,

    /// Logging configuration
    pub telemetry: TelemetryConfig,
}

/// Remote embedding provider settings (OpenAI-compatible `/embeddings` API)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of the embeddings API, without the `/embeddings` suffix
    pub base_url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Bearer token; when absent every embedding call reports unavailable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Expected vector length; must match the index's `dense_vector` mapping
    pub dimensions: usize,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EMBEDDING_BASE_URL.to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key: None,
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            timeout_seconds: DEFAULT_EMBEDDING_TIMEOUT_SECONDS,
        }
    }
}

impl EmbeddingConfig {
    /// Request timeout as a `Duration`
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup("PRODUCTSEARCH_EMBEDDING_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(model) = lookup("PRODUCTSEARCH_EMBEDDING_MODEL") {
            self.model = model;
        }
        if let Some(api_key) =
            lookup("PRODUCTSEARCH_EMBEDDING_API_KEY").or_else(|| lookup(OPENAI_API_KEY_VAR))
        {
            self.api_key = Some(api_key).filter(|key| !key.trim().is_empty());
        }
        if let Some(dimensions) = parse_var(lookup, "PRODUCTSEARCH_EMBEDDING_DIMENSIONS") {
            self.dimensions = dimensions;
        }
        if let Some(timeout) = parse_var(lookup, "PRODUCTSEARCH_EMBEDDING_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout;
        }
    }
}

impl Validate for EmbeddingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_url(&self.base_url, "embedding.base_url")?;
        validation::validate_non_empty(&self.model, "embedding.model")?;
        validation::validate_range(
            self.dimensions as u64,
            1,
            10_000,
            "embedding.dimensions",
        )?;
        validation::validate_range(self.timeout_seconds, 1, 300, "embedding.timeout_seconds")?;
        Ok(())
    }
}

/// Document index connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentIndexConfig {
    /// Cluster URL (e.g., "http://localhost:9200")
    pub url: String,

    /// Index queried by every search
    pub index_name: String,

    /// Basic auth username (requires `password`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Basic auth password (requires `username`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Encoded API key, sent as `Authorization: ApiKey <key>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DocumentIndexConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INDEX_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            username: None,
            password: None,
            api_key: None,
            timeout_seconds: DEFAULT_INDEX_TIMEOUT_SECONDS,
        }
    }
}

impl DocumentIndexConfig {
    /// Request timeout as a `Duration`
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PRODUCTSEARCH_INDEX_URL").or_else(|| lookup("ELASTICSEARCH_URL"))
        {
            self.url = url;
        }
        if let Some(index_name) = lookup("PRODUCTSEARCH_INDEX_NAME") {
            self.index_name = index_name;
        }
        if let Some(username) = lookup("PRODUCTSEARCH_INDEX_USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = lookup("PRODUCTSEARCH_INDEX_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(api_key) = lookup("PRODUCTSEARCH_INDEX_API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Some(timeout) = parse_var(lookup, "PRODUCTSEARCH_INDEX_TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout;
        }
    }

    /// Connection info for logging (no credentials)
    pub fn safe_connection_string(&self) -> String {
        let auth = match (&self.username, &self.api_key) {
            (Some(user), _) => format!("basic:{user}"),
            (None, Some(_)) => "api_key".to_string(),
            (None, None) => "none".to_string(),
        };
        format!("{}/{} (auth: {auth})", self.url, self.index_name)
    }
}

impl Validate for DocumentIndexConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_url(&self.url, "document_index.url")?;
        validation::validate_index_name(&self.index_name)?;
        validation::validate_range(
            self.timeout_seconds,
            1,
            3600,
            "document_index.timeout_seconds",
        )?;

        match (&self.username, &self.password) {
            (Some(_), None) => Err(ConfigError::MissingField {
                field: "document_index.password".to_string(),
            }),
            (None, Some(_)) => Err(ConfigError::MissingField {
                field: "document_index.username".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_API_HOST.to_string(),
            port: DEFAULT_API_PORT,
        }
    }
}

impl ApiConfig {
    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("PRODUCTSEARCH_API_HOST") {
            self.host = host;
        }
        if let Some(port) = parse_var(lookup, "PRODUCTSEARCH_API_PORT") {
            self.port = port;
        }
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_non_empty(&self.host, "api.host")?;
        validation::validate_port(self.port)?;
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Default filter when `RUST_LOG` is unset (trace, debug, info, warn, error)
    pub tracing_level: String,

    /// Emit JSON log lines instead of human-readable output
    pub json_logs: bool,

    /// Directory for daily-rotated log files; stderr only when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,

    /// Service name reported by the health endpoint
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            tracing_level: DEFAULT_TRACING_LEVEL.to_string(),
            json_logs: DEFAULT_JSON_LOGS,
            log_dir: None,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl TelemetryConfig {
    fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(level) = lookup("PRODUCTSEARCH_TELEMETRY_TRACING_LEVEL") {
            self.tracing_level = level;
        }
        if let Some(json_logs) = parse_var(lookup, "PRODUCTSEARCH_TELEMETRY_JSON_LOGS") {
            self.json_logs = json_logs;
        }
        if let Some(log_dir) = lookup("PRODUCTSEARCH_TELEMETRY_LOG_DIR") {
            self.log_dir = Some(log_dir);
        }
        if let Some(service_name) = lookup("PRODUCTSEARCH_TELEMETRY_SERVICE_NAME") {
            self.service_name = service_name;
        }
    }
}

impl Validate for TelemetryConfig {
    fn validate(&self) -> ConfigResult<()> {
        validation::validate_non_empty(&self.service_name, "telemetry.service_name")?;

        match self.tracing_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::Generic {
                message: format!("Invalid tracing level: {}", self.tracing_level),
            }),
        }
    }
}

impl ApplicationConfig {
    /// Load configuration from environment variables with safe defaults
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply process environment variables on top of this configuration
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// `from_env()` uses the process environment; tests pass a map so they
    /// never touch global state.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.embedding.apply_overrides(&lookup);
        self.document_index.apply_overrides(&lookup);
        self.api.apply_overrides(&lookup);
        self.telemetry.apply_overrides(&lookup);
        self
    }
}

impl Validate for ApplicationConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.embedding.validate()?;
        self.document_index.validate()?;
        self.api.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

/// Look up and parse a variable, ignoring unparsable values
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring unparsable value for {key}: '{raw}'");
            None
        }
    }
}
