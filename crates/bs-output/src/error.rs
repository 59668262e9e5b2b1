//! Trace-writer errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening or appending to the trace files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A trace file could not be created.
    #[error("cannot create trace file {}: {source}", path.display())]
    Create {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("trace I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace CSV row rejected: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("trace database: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "parquet")]
    #[error("trace record batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[cfg(feature = "parquet")]
    #[error("trace Parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

impl OutputError {
    pub(crate) fn create(path: PathBuf) -> impl FnOnce(std::io::Error) -> Self {
        move |source| OutputError::Create { path, source }
    }
}

pub type OutputResult<T> = Result<T, OutputError>;
