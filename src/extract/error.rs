//! Error types for extraction setup
//!
//! Extraction itself never fails: missing substructure degrades to a smaller record. Only the
//! setup steps (loading settings, reading tag tables, compiling the tag splitter) can.

use config::ConfigError;
use std::fmt;

/// Errors raised while preparing an [ExtractContext](super::context::ExtractContext).
#[derive(Debug)]
pub enum ExtractError {
    /// Settings could not be loaded or deserialized
    Config(ConfigError),
    /// A tag table file was malformed
    TagTable(String),
    /// The configured separators do not form a usable pattern
    Pattern(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Config(err) => write!(f, "Configuration error: {}", err),
            ExtractError::TagTable(msg) => write!(f, "Invalid tag table: {}", msg),
            ExtractError::Pattern(msg) => write!(f, "Invalid separator pattern: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for ExtractError {
    fn from(err: ConfigError) -> Self {
        ExtractError::Config(err)
    }
}

impl From<serde_yaml::Error> for ExtractError {
    fn from(err: serde_yaml::Error) -> Self {
        ExtractError::TagTable(err.to_string())
    }
}

impl From<regex::Error> for ExtractError {
    fn from(err: regex::Error) -> Self {
        ExtractError::Pattern(err.to_string())
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failing_step() {
        let err = ExtractError::TagTable("expected a mapping".to_string());
        assert_eq!(err.to_string(), "Invalid tag table: expected a mapping");

        let err: ExtractError = ConfigError::Message("boom".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
