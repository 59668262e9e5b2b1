//! Next-arrival estimates for a stop.
//!
//! The estimate is deliberately simple: the path distance from a bus to the
//! first path vertex belonging to the target stop, divided by the nominal
//! speed of `0.5` path units per tick.
//!
//! Distance is `target_index − progress`, plus one full path length when that
//! is negative.  The same rule is used whichever way the bus is travelling,
//! so a bus about to reverse can be reported up to one path length early or
//! late.  The speed multiplier is not applied either: ETAs are quoted at 1×.

use bs_core::{BusId, Occupancy, RouteId, StopId, time::ticks_per_minute};
use bs_network::RouteNetwork;

use crate::Bus;
use crate::motion::BASE_STEP;

/// Most arrivals reported per stop.
pub const MAX_ARRIVALS: usize = 3;

/// Estimates at or beyond this many minutes are dropped.
pub const MAX_ETA_MINUTES: f64 = 60.0;

/// One upcoming arrival at a stop.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrival {
    pub bus_id:      BusId,
    pub route_id:    RouteId,
    /// Whole minutes, always in `1..60`.
    pub eta_minutes: u32,
    pub occupancy:   Occupancy,
}

/// Converts path distances to minutes for a given timer period.
#[derive(Copy, Clone, Debug)]
pub struct ArrivalEstimator {
    ticks_per_minute: f64,
}

impl ArrivalEstimator {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self { ticks_per_minute: ticks_per_minute(tick_interval_ms.max(1)) }
    }

    /// Path units between `progress` and `target_index`, wrapping once when
    /// the target lies behind.
    #[inline]
    pub fn path_distance(progress: f64, target_index: usize, path_len: usize) -> f64 {
        let raw = target_index as f64 - progress;
        if raw < 0.0 { raw + path_len as f64 } else { raw }
    }

    /// Minutes to cover `distance` path units at the nominal speed.
    #[inline]
    pub fn minutes_for(&self, distance: f64) -> f64 {
        distance / (BASE_STEP * self.ticks_per_minute)
    }

    /// Unrounded, unfiltered ETA of `bus` at `stop`.  `None` when the bus's
    /// route is unknown, does not serve `stop`, or has an empty path.
    pub fn raw_eta(&self, bus: &Bus, stop: &StopId, network: &RouteNetwork) -> Option<f64> {
        let (route, path) = network.route_with_path(&bus.route_id)?;
        if !route.serves(stop) {
            return None;
        }
        let target = path.iter().position(|p| &p.nearest_stop == stop)?;
        Some(self.minutes_for(Self::path_distance(bus.progress, target, path.len())))
    }

    /// Up to [`MAX_ARRIVALS`] arrivals at `stop`, soonest first.
    ///
    /// Estimates outside `(0, 60)` minutes, and those that round to 0, are
    /// discarded.  Ties keep fleet order.  An unknown stop yields an empty
    /// list.
    pub fn arrivals_for(&self, stop: &StopId, buses: &[Bus], network: &RouteNetwork) -> Vec<Arrival> {
        let mut arrivals: Vec<Arrival> = buses
            .iter()
            .filter_map(|bus| {
                let eta = self.raw_eta(bus, stop, network)?;
                if eta <= 0.0 || eta >= MAX_ETA_MINUTES {
                    return None;
                }
                let minutes = eta.round() as u32;
                (minutes > 0).then(|| Arrival {
                    bus_id:      bus.id.clone(),
                    route_id:    bus.route_id.clone(),
                    eta_minutes: minutes,
                    occupancy:   bus.occupancy,
                })
            })
            .collect();

        arrivals.sort_by_key(|a| a.eta_minutes);
        arrivals.truncate(MAX_ARRIVALS);
        arrivals
    }
}
