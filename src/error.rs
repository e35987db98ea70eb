//! Error types for loading and ingesting the lexical dataset.
//!
//! Loader and ingestion code returns [`IngestError`]; command code wraps it
//! with `anyhow` context.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A relation line that does not have exactly three tab-separated fields.
    #[error("{path:?}:{line}: expected 3 tab-separated fields, found {found}")]
    MalformedRelation {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    /// A line that is not valid UTF-8.
    #[error("{path:?}:{line}: line is not valid UTF-8")]
    InvalidEncoding { path: PathBuf, line: usize },

    /// A sense mapping line that could not be split into `raw_id,sense_id`.
    #[error("{path:?}:{line}: {message}")]
    MalformedSense {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A definitions line that is not a valid definition record.
    #[error("{path:?}:{line}: invalid definition record: {source}")]
    MalformedDefinition {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
