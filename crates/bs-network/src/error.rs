//! Network-subsystem error type.

use thiserror::Error;

use bs_core::{CoreError, RouteId};

/// Errors produced by `bs-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("route {route} has {stops} stop(s); at least 2 are needed to place a bus")]
    TooFewStops { route: RouteId, stops: usize },

    #[error("route {0} defined more than once")]
    DuplicateRoute(RouteId),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
