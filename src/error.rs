//! Error types for the persist state store.

use crate::shape::Shape;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by store construction, saving, and option loading
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read state file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode state file {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("State file {path:?} holds a {found} but the bound value is a {expected}")]
    ShapeMismatch {
        path: PathBuf,
        expected: Shape,
        found: Shape,
    },

    #[error("Failed to encode bound value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write state to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename {from:?} to {to:?}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// True for errors raised while interpreting persisted content.
    pub fn is_decode(&self) -> bool {
        matches!(self, StoreError::Decode { .. } | StoreError::ShapeMismatch { .. })
    }
}

impl From<config::ConfigError> for StoreError {
    fn from(err: config::ConfigError) -> Self {
        StoreError::Config(err.to_string())
    }
}
