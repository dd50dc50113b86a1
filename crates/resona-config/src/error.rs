//! Error types for configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading settings or converting presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Preset names a parameter the table does not declare
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Preset sets a parameter that only the processor writes
    #[error("parameter '{0}' is read-only")]
    ReadOnlyParameter(String),

    /// Parameter id rejected by the state
    #[error(transparent)]
    Param(#[from] resona_core::ParamError),

    /// Preset value outside the parameter's domain
    #[error("invalid value {value} for parameter '{param}': expected [{min}, {max}]")]
    InvalidValue {
        /// String id of the parameter.
        param: String,
        /// Value found in the preset.
        value: f64,
        /// Domain minimum.
        min: f64,
        /// Domain maximum.
        max: f64,
    },

    /// Setting value that cannot be used
    #[error("invalid setting '{field}': {reason}")]
    InvalidSetting {
        /// Field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
        assert!(err.source().is_some(), "ReadFile must expose I/O source");
    }

    #[test]
    fn write_file_display() {
        let err = ConfigError::write_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to write file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
    }

    #[test]
    fn create_dir_display() {
        let err = ConfigError::create_dir("/a/b", mock_io_err());
        assert!(err.to_string().contains("failed to create directory"));
        assert!(err.source().is_some());
    }

    #[test]
    fn unknown_parameter_display() {
        let err = ConfigError::UnknownParameter("res_warp".to_string());
        assert_eq!(err.to_string(), "unknown parameter 'res_warp'");
        assert!(err.source().is_none());
    }

    #[test]
    fn read_only_parameter_display() {
        let err = ConfigError::ReadOnlyParameter("vu_ppm".to_string());
        assert_eq!(err.to_string(), "parameter 'vu_ppm' is read-only");
    }

    #[test]
    fn invalid_value_display() {
        let err = ConfigError::InvalidValue {
            param: "mix".to_string(),
            value: 140.0,
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid value 140 for parameter 'mix': expected [0, 100]"
        );
    }

    #[test]
    fn invalid_setting_display() {
        let err = ConfigError::InvalidSetting {
            field: "smoothing_ms",
            reason: "must be finite and >= 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid setting 'smoothing_ms': must be finite and >= 0"
        );
    }
}
