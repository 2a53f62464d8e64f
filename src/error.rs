//! Error types for Neurosim
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Neurosim operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, command execution, and interactions with the
/// external surfaces (sandbox, file saving, notifications).
#[derive(Error, Debug)]
pub enum NeurosimError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Preset catalog errors (invalid creation input)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Sandbox launch errors (the playable-game surface could not open)
    #[error("Sandbox error: {0}")]
    Sandbox(String),

    /// File-save surface errors
    #[error("Save error: {0}")]
    Save(String),

    /// Interactive session errors (readline failures, unknown references)
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Neurosim operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = NeurosimError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_catalog_error_display() {
        let error = NeurosimError::Catalog("empty preset name".to_string());
        assert_eq!(error.to_string(), "Catalog error: empty preset name");
    }

    #[test]
    fn test_sandbox_error_display() {
        let error = NeurosimError::Sandbox("no browser opener found".to_string());
        assert_eq!(error.to_string(), "Sandbox error: no browser opener found");
    }

    #[test]
    fn test_save_error_display() {
        let error = NeurosimError::Save("directory not writable".to_string());
        assert_eq!(error.to_string(), "Save error: directory not writable");
    }

    #[test]
    fn test_session_error_display() {
        let error = NeurosimError::Session("no such message".to_string());
        assert_eq!(error.to_string(), "Session error: no such message");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: NeurosimError = io_error.into();
        assert!(matches!(error, NeurosimError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: NeurosimError = json_error.into();
        assert!(matches!(error, NeurosimError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: NeurosimError = yaml_error.into();
        assert!(matches!(error, NeurosimError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NeurosimError>();
    }
}
