//! Error types for reading statistics and writing the generated header.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatError {
    #[error("cannot read statistics file {path}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record in {path}, row {row}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("cannot write header {path}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid conventions file {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl StatError {
    pub fn malformed(path: impl Into<PathBuf>, row: usize, reason: impl Into<String>) -> Self {
        StatError::MalformedRecord {
            path: path.into(),
            row,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StatError>;
