//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::RouteId;

/// The base error type shared by the `bs-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("route {0} not found")]
    UnknownRoute(RouteId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `bs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
