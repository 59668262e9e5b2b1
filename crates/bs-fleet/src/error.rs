use bs_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type FleetResult<T> = Result<T, FleetError>;
