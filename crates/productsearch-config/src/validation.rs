//! Configuration validation framework

use crate::{ConfigError, ConfigResult};
use regex::Regex;

/// Get URL validation regex - returns None if regex compilation fails
fn get_url_regex() -> Option<&'static Regex> {
    static URL_REGEX: std::sync::OnceLock<Option<Regex>> = std::sync::OnceLock::new();
    URL_REGEX
        .get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").ok())
        .as_ref()
}

/// Characters Elasticsearch refuses in index names
const FORBIDDEN_INDEX_CHARS: &[char] = &[
    '\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':',
];

/// Trait for validating configuration values
pub trait Validate {
    /// Validate this configuration object
    ///
    /// # Errors
    /// Returns validation errors if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Validate a URL string
///
/// # Errors
/// Returns `ConfigError::InvalidUrl` if the URL format is invalid
pub fn validate_url(url: &str, field_name: &str) -> ConfigResult<()> {
    let valid = get_url_regex().map_or_else(
        || url.starts_with("http://") || url.starts_with("https://"),
        |regex| regex.is_match(url),
    );

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            field: field_name.to_string(),
            url: url.to_string(),
        })
    }
}

/// Validate a port number
///
/// # Errors
/// Returns `ConfigError::InvalidPort` if port is 0
pub const fn validate_port(port: u16) -> ConfigResult<()> {
    if port == 0 {
        Err(ConfigError::InvalidPort { port })
    } else {
        Ok(())
    }
}

/// Validate a value is within a range
///
/// # Errors
/// Returns `ConfigError::OutOfRange` if value is outside the specified range
pub fn validate_range(value: u64, min: u64, max: u64, field_name: &str) -> ConfigResult<()> {
    if value < min || value > max {
        Err(ConfigError::OutOfRange {
            field: field_name.to_string(),
            value,
            min,
            max,
        })
    } else {
        Ok(())
    }
}

/// Validate a string is not empty
///
/// # Errors
/// Returns `ConfigError::MissingField` if the string is empty or whitespace-only
pub fn validate_non_empty(value: &str, field_name: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        Err(ConfigError::MissingField {
            field: field_name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Validate a document index name
///
/// Index names must be lowercase, must not start with `-`, `_` or `+`, and must
/// not contain any of the reserved path/wildcard characters.
///
/// # Errors
/// Returns `ConfigError::InvalidIndexName` describing the first rule violated
pub fn validate_index_name(name: &str) -> ConfigResult<()> {
    let reject = |reason: &str| {
        Err(ConfigError::InvalidIndexName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("must not be empty");
    }
    if name == "." || name == ".." {
        return reject("must not be '.' or '..'");
    }
    if name.starts_with(['-', '_', '+']) {
        return reject("must not start with '-', '_' or '+'");
    }
    if name.chars().any(char::is_uppercase) {
        return reject("must be lowercase");
    }
    if let Some(bad) = name.chars().find(|c| FORBIDDEN_INDEX_CHARS.contains(c)) {
        return reject(&format!("contains forbidden character '{bad}'"));
    }
    if name.len() > 255 {
        return reject("must be at most 255 bytes");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://localhost:9200", "url").is_ok());
        assert!(validate_url("https://api.openai.com/v1", "url").is_ok());
        assert!(validate_url("localhost:9200", "url").is_err());
        assert!(validate_url("", "url").is_err());
    }

    #[test]
    fn test_validate_index_name() {
        assert!(validate_index_name("products").is_ok());
        assert!(validate_index_name("products-v2").is_ok());
        assert!(validate_index_name("Products").is_err());
        assert!(validate_index_name("_products").is_err());
        assert!(validate_index_name("prod ucts").is_err());
        assert!(validate_index_name("prod*").is_err());
        assert!(validate_index_name("").is_err());
    }

    #[test]
    fn test_validate_range_bounds_are_inclusive() {
        assert!(validate_range(1, 1, 10, "x").is_ok());
        assert!(validate_range(10, 1, 10, "x").is_ok());
        assert!(validate_range(11, 1, 10, "x").is_err());
    }
}
