//! Plain data row types written by output backends.

use bs_core::Tick;
use bs_fleet::Bus;

/// One bus's observable state after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct BusSnapshotRow {
    pub bus_id:    String,
    pub route_id:  String,
    pub tick:      u64,
    pub lat:       f64,
    pub lng:       f64,
    pub heading:   f64,
    pub progress:  f64,
    /// `+1` forward, `−1` backward.
    pub direction: i8,
    /// `Low`, `Medium` or `High`.
    pub occupancy: &'static str,
    pub next_stop: Option<String>,
}

impl BusSnapshotRow {
    pub fn from_bus(tick: Tick, bus: &Bus) -> Self {
        Self {
            bus_id:    bus.id.to_string(),
            route_id:  bus.route_id.to_string(),
            tick:      tick.0,
            lat:       bus.pos.lat,
            lng:       bus.pos.lng,
            heading:   bus.heading,
            progress:  bus.progress,
            direction: bus.direction.sign() as i8,
            occupancy: bus.occupancy.as_str(),
            next_stop: bus.next_stop.clone(),
        }
    }
}

/// Summary of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub unix_time_ms:   i64,
    pub advanced_buses: u64,
    /// Buses skipped because their route is unknown or has no path.
    pub skipped_buses:  u64,
}
