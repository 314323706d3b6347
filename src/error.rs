//! Error types for the organize pipeline
//!
//! Classification failures are absorbed at the generator boundary (records get
//! empty name fields), planner failures are per-record, and executor failures
//! are per-operation. These variants cover everything that still propagates.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can escape the organize pipeline
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The inference endpoint could not be reached or returned a bad status
    #[error("inference request failed: {0}")]
    Inference(String),

    /// The model responded, but the payload could not be decoded
    #[error("failed to decode model response: {0}")]
    Decode(String),

    /// Collision suffix allocation gave up for one source file
    #[error("exhausted {attempts} collision suffixes for '{}'", path.display())]
    CollisionExhausted { path: PathBuf, attempts: u32 },

    /// Filesystem error with the path it happened on
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl OrganizeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, OrganizeError>;
