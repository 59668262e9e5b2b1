//! `bs-fleet` — buses and everything that moves them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`bus`]       | `Bus`, `Direction`, `Driver`                                 |
//! | [`motion`]    | `MotionEngine` — per-tick progress, reflection, heading, …   |
//! | [`arrivals`]  | `ArrivalEstimator`, `Arrival`                                |
//! | [`telemetry`] | `TelemetrySnapshot` — synthetic diagnostics on demand        |
//! | [`loader`]    | CSV fleet loading                                            |
//! | [`error`]     | `FleetError`, `FleetResult<T>`                               |
//!
//! # Movement model (reflecting shuttle)
//!
//! Every bus holds a real-valued `progress` into its route's path and a
//! `direction`.  Each tick:
//!
//! 1. `progress += 0.5 × speed × direction`.
//! 2. Reaching either end clamps progress to the end and reverses direction,
//!    so buses shuttle back and forth and never loop past the terminus.
//! 3. Position, heading and next stop are re-derived from the new progress.
//! 4. Occupancy drifts one step round its ring with small probability.
//!
//! Buses whose route is missing or has an empty path are skipped, never
//! removed.

pub mod arrivals;
pub mod bus;
pub mod error;
pub mod loader;
pub mod motion;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use arrivals::{Arrival, ArrivalEstimator};
pub use bus::{Bus, Direction, Driver};
pub use error::{FleetError, FleetResult};
pub use loader::{load_fleet_csv, load_fleet_reader};
pub use motion::{MotionEngine, TickReport};
pub use telemetry::{DoorStatus, TelemetrySnapshot};
