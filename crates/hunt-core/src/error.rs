//! Error types for City Chamber Hunt

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HuntError {
    // Network errors
    #[error("Request to {service} failed: {reason}")]
    Network { service: String, reason: String },

    #[error("{service} responded with HTTP {status}")]
    HttpStatus { service: String, status: u16 },

    #[error("{service} is unavailable: {reason}. Try: {remediation}")]
    ServiceUnavailable {
        service: String,
        reason: String,
        remediation: String,
    },

    // Payload errors
    #[error("Failed to decode {what}: {reason}")]
    Decode { what: String, reason: String },

    #[error("Image error: {0}")]
    Image(String),

    // Storage errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Report generation failed: {0}")]
    Report(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HuntError {
    /// Build a network error for the named service
    pub fn network(service: impl Into<String>, reason: impl ToString) -> Self {
        HuntError::Network {
            service: service.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a decode error for the named payload
    pub fn decode(what: impl Into<String>, reason: impl ToString) -> Self {
        HuntError::Decode {
            what: what.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HuntError>;
