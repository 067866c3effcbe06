//! Error types for julia-particles.
//!
//! Only construction can fail. Once a [`ParticleField`](crate::ParticleField)
//! exists, every per-frame operation is total.

use std::fmt;

/// Errors that can occur while building a field or loading its configuration.
#[derive(Debug)]
pub enum FieldError {
    /// A configuration value cannot produce a valid field.
    InvalidConfiguration(String),
    /// Failed to read or write a configuration file.
    Io(std::io::Error),
    /// Configuration file is not valid JSON for [`FieldConfig`](crate::FieldConfig).
    Json(serde_json::Error),
}

impl FieldError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        FieldError::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidConfiguration(msg) => write!(f, "Invalid field configuration: {}", msg),
            FieldError::Io(e) => write!(f, "Failed to access config file: {}", e),
            FieldError::Json(e) => write!(f, "Failed to parse config JSON: {}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::InvalidConfiguration(_) => None,
            FieldError::Io(e) => Some(e),
            FieldError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for FieldError {
    fn from(e: std::io::Error) -> Self {
        FieldError::Io(e)
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(e: serde_json::Error) -> Self {
        FieldError::Json(e)
    }
}
