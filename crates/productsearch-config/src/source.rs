//! Configuration source loading and composition

use crate::validation::Validate;
use crate::{ApplicationConfig, ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Trait for layering configuration from different sources
///
/// Each source receives the configuration assembled so far and returns it with
/// its own values applied, so a source only needs to know about the keys it sets.
pub trait ConfigurationSource {
    /// Apply this source on top of `config`
    ///
    /// # Errors
    /// Returns configuration loading errors
    fn apply(&self, config: ApplicationConfig) -> ConfigResult<ApplicationConfig>;

    /// Get the name of this configuration source
    fn name(&self) -> &str;

    /// Get the priority of this source (higher number = higher priority)
    fn priority(&self) -> u8;
}

/// Apply `PRODUCTSEARCH_*` environment variables
pub struct EnvironmentSource;

impl ConfigurationSource for EnvironmentSource {
    fn apply(&self, config: ApplicationConfig) -> ConfigResult<ApplicationConfig> {
        Ok(config.with_env_overrides())
    }

    fn name(&self) -> &'static str {
        "environment"
    }

    fn priority(&self) -> u8 {
        100 // env vars override everything
    }
}

/// Apply values from a TOML file
///
/// Tables in the file are merged key-by-key into the current configuration, so
/// a file holding only `[document_index] index_name = "catalog"` leaves every
/// other value untouched.
pub struct TomlFileSource {
    path: PathBuf,
}

impl TomlFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigurationSource for TomlFileSource {
    fn apply(&self, config: ApplicationConfig) -> ConfigResult<ApplicationConfig> {
        let content = std::fs::read_to_string(&self.path)?;
        let overlay: toml::Table = toml::from_str(&content)?;

        let mut base = toml::Table::try_from(&config).map_err(|e| ConfigError::Generic {
            message: format!("Failed to encode configuration: {e}"),
        })?;
        merge_tables(&mut base, overlay);

        Ok(toml::Value::Table(base).try_into()?)
    }

    fn name(&self) -> &'static str {
        "toml_file"
    }

    fn priority(&self) -> u8 {
        50 // below env vars, above defaults
    }
}

/// Deep-merge `overlay` into `base`, overlay values winning
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Type alias for configuration sources
type ConfigSources = Vec<Box<dyn ConfigurationSource>>;

/// Configuration loader that combines multiple sources
pub struct ConfigurationLoader {
    sources: ConfigSources,
}

impl ConfigurationLoader {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_source(mut self, source: Box<dyn ConfigurationSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Load configuration from all sources with priority ordering
    ///
    /// Starts from defaults and applies sources lowest priority first. A source
    /// that fails (unreadable file, bad TOML) aborts loading rather than being
    /// silently skipped.
    ///
    /// # Errors
    /// Returns configuration loading or validation errors
    pub fn load(&self) -> ConfigResult<ApplicationConfig> {
        let mut config = ApplicationConfig::default();

        let mut sorted_sources = self.sources.iter().collect::<Vec<_>>();
        sorted_sources.sort_by_key(|source| source.priority());

        for source in sorted_sources {
            config = source.apply(config).inspect_err(|e| {
                tracing::error!("Failed to load from source {}: {e}", source.name());
            })?;
            tracing::debug!("Loaded configuration from source: {}", source.name());
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigurationLoader {
    fn default() -> Self {
        Self::new()
    }
}
