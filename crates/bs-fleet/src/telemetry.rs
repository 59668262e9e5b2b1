//! Synthetic diagnostic telemetry.
//!
//! Nothing here feeds back into motion.  A snapshot is generated on demand
//! from the bus's current state plus a handful of random draws, and is not
//! stored anywhere.

use bs_core::{BusId, GeoPoint, Occupancy, RandomSource, RouteId};

use crate::Bus;

/// Door state reported in telemetry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorStatus {
    Open,
    Closed,
}

/// Probability that a snapshot reports the doors open.
pub const DOOR_OPEN_P: f64 = 0.1;

/// One synthetic telemetry record.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetrySnapshot {
    pub bus_id:        BusId,
    pub route_id:      RouteId,
    /// Unix milliseconds.
    pub timestamp_ms:  i64,
    pub pos:           GeoPoint,
    pub heading:       f64,
    /// km/h, in `[25, 40)`.
    pub speed_kmh:     f64,
    pub occupancy:     Occupancy,
    pub next_stop:     Option<String>,
    /// Percent, in `[65, 95)`.
    pub fuel_pct:      f64,
    /// °C, in `[85, 95)`.
    pub engine_temp_c: f64,
    pub door:          DoorStatus,
}

impl TelemetrySnapshot {
    /// Sample a snapshot for `bus` stamped `timestamp_ms`.
    ///
    /// Draws four values from `rng`, in order: speed, fuel, engine
    /// temperature, door.
    pub fn sample<R: RandomSource>(bus: &Bus, timestamp_ms: i64, rng: &mut R) -> Self {
        let speed_kmh     = rng.range_f64(25.0, 40.0);
        let fuel_pct      = rng.range_f64(65.0, 95.0);
        let engine_temp_c = rng.range_f64(85.0, 95.0);
        let door = if rng.chance(DOOR_OPEN_P) { DoorStatus::Open } else { DoorStatus::Closed };

        Self {
            bus_id:    bus.id.clone(),
            route_id:  bus.route_id.clone(),
            timestamp_ms,
            pos:       bus.pos,
            heading:   bus.heading,
            speed_kmh,
            occupancy: bus.occupancy,
            next_stop: bus.next_stop.clone(),
            fuel_pct,
            engine_temp_c,
            door,
        }
    }
}
