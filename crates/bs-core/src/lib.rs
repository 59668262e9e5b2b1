//! `bs-core` — foundational types for the `bus_sim` transit simulator.
//!
//! This crate is a dependency of every other `bs-*` crate.  It has no `bs-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `StopId`, `RouteId`, `BusId`, `DriverId`                |
//! | [`geo`]       | `GeoPoint`, lerp, planar bearing, haversine distance    |
//! | [`time`]      | `Tick`, `TickClock`, `SimConfig`, `PathConfig`          |
//! | [`rng`]       | `RandomSource` trait, `SimRng`                          |
//! | [`occupancy`] | `Occupancy` ring (Low → Medium → High → Low)            |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod occupancy;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{BusId, DriverId, RouteId, StopId};
pub use occupancy::Occupancy;
pub use rng::{RandomSource, SimRng};
pub use time::{PathConfig, SimConfig, Tick, TickClock};
