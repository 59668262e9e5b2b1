use bs_core::{BusId, CoreError, RouteId};
use bs_fleet::FleetError;
use bs_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// A bus cannot run on its route.  Only raised by strict builds; lenient
    /// builds log the problem and skip the bus every tick.
    #[error("bus {bus} cannot run on route {route}: {reason}")]
    Configuration {
        bus:    BusId,
        route:  RouteId,
        reason: String,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("fleet error: {0}")]
    Fleet(#[from] FleetError),
}

pub type SimResult<T> = Result<T, SimError>;
