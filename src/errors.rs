//! Per-file errors recovered at the worker boundary.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to open '{path}': {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode '{path}': {message}")]
    DecodeFailed { path: PathBuf, message: String },

    #[error("histogram length mismatch: {left} vs {right} bins")]
    LengthMismatch { left: usize, right: usize },
}

impl HistogramError {
    pub fn decode(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        HistogramError::DecodeFailed {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    /// Short reason for diagnostics, without the path (the caller already prints it).
    pub fn reason(&self) -> String {
        match self {
            HistogramError::OpenFailed { source, .. } => source.to_string(),
            HistogramError::DecodeFailed { message, .. } => message.clone(),
            HistogramError::LengthMismatch { .. } => self.to_string(),
        }
    }
}

pub type HistogramResult<T> = std::result::Result<T, HistogramError>;
