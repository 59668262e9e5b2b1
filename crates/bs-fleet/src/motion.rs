//! The motion engine: advances every bus by one tick.

use tracing::trace;

use bs_core::{Occupancy, RandomSource};
use bs_network::{PathPoint, Route, RouteNetwork, position_at};

use crate::{Bus, Direction};

/// Path units moved per tick at 1× speed.
pub const BASE_STEP: f64 = 0.5;

/// Speed multiplier bounds.
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 5.0;

/// Probability that occupancy steps up (then, in the next slice, down) on a
/// given tick.
pub const OCCUPANCY_STEP_P: f64 = 0.02;

/// Clamp a requested multiplier to `[MIN_SPEED, MAX_SPEED]`.  `None` for NaN.
#[inline]
pub fn clamp_speed(multiplier: f64) -> Option<f64> {
    (!multiplier.is_nan()).then(|| multiplier.clamp(MIN_SPEED, MAX_SPEED))
}

/// Counts returned by [`MotionEngine::tick`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub advanced: usize,
    /// Buses whose route is unknown or has an empty path.
    pub skipped:  usize,
}

/// Per-tick bus advancement at a fixed speed multiplier.
///
/// The engine is stateless apart from the multiplier: progress and direction
/// live on each [`Bus`].
#[derive(Copy, Clone, Debug)]
pub struct MotionEngine {
    speed_multiplier: f64,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self { speed_multiplier: 1.0 }
    }
}

impl MotionEngine {
    /// An engine at `speed_multiplier`, clamped to `[0.1, 5]` (NaN → 1×).
    pub fn new(speed_multiplier: f64) -> Self {
        Self { speed_multiplier: clamp_speed(speed_multiplier).unwrap_or(1.0) }
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    /// Path units per tick: `0.5 × speed`.
    #[inline]
    pub fn step(&self) -> f64 {
        BASE_STEP * self.speed_multiplier
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Spread each route's buses evenly along its path and resolve their
    /// positions.  The `i`-th of `n` buses on a route starts at
    /// `i / n × path_len` (capped at the last vertex), heading forward.
    ///
    /// Buses on unknown or empty routes are left untouched.
    pub fn distribute(buses: &mut [Bus], network: &RouteNetwork) {
        for route in network.routes() {
            let Some(path) = network.path(&route.id) else { continue };
            if path.is_empty() {
                continue;
            }
            let n = buses.iter().filter(|b| b.route_id == route.id).count();
            let last = (path.len() - 1) as f64;

            for (i, bus) in buses
                .iter_mut()
                .filter(|b| b.route_id == route.id)
                .enumerate()
            {
                bus.progress = (i as f64 / n as f64 * path.len() as f64).min(last);
                bus.direction = Direction::Forward;
                Self::place(bus, path);
            }
        }
    }

    /// Clamp a bus's progress into the path and resolve its coordinate
    /// without moving it.
    pub fn place(bus: &mut Bus, path: &[PathPoint]) {
        if path.is_empty() {
            return;
        }
        let last = (path.len() - 1) as f64;
        bus.progress = if bus.progress.is_finite() { bus.progress.clamp(0.0, last) } else { 0.0 };
        bus.pos = position_at(path, bus.progress).pos;
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every bus by one tick, sequentially and in slice order.
    pub fn tick<R: RandomSource>(
        &self,
        buses:   &mut [Bus],
        network: &RouteNetwork,
        rng:     &mut R,
    ) -> TickReport {
        let mut report = TickReport::default();
        for bus in buses.iter_mut() {
            match network.route_with_path(&bus.route_id) {
                Some((route, path)) if !path.is_empty() => {
                    self.advance(bus, route, path, rng);
                    report.advanced += 1;
                }
                _ => {
                    trace!(bus = %bus.id, route = %bus.route_id, "no traversable route; skipped");
                    report.skipped += 1;
                }
            }
        }
        report
    }

    /// Advance one bus along a non-empty `path` of `route`.
    pub fn advance<R: RandomSource>(
        &self,
        bus:   &mut Bus,
        route: &Route,
        path:  &[PathPoint],
        rng:   &mut R,
    ) {
        debug_assert!(!path.is_empty());

        let moved = bus.progress + self.step() * bus.direction.sign();
        let (progress, direction) = reflect(moved, bus.direction, path.len());
        bus.progress = progress;
        bus.direction = direction;

        let sample = position_at(path, progress);
        bus.pos = sample.pos;

        if let Some(heading) = heading_at(path, progress, direction) {
            bus.heading = heading;
        }

        if let Some(idx) = sample
            .nearest_stop
            .as_ref()
            .and_then(|id| route.stop_index(id))
        {
            let next = next_stop_index(idx, route.stops.len(), direction);
            bus.next_stop = Some(route.stops[next].name.clone());
        }

        bus.occupancy = drift_occupancy(bus.occupancy, rng.next_f64());
    }
}

// ── Step helpers ──────────────────────────────────────────────────────────────

/// Boundary reflection.  At or past the last vertex: clamp and head
/// backward.  At or before 0: clamp and head forward.
#[inline]
pub fn reflect(progress: f64, direction: Direction, path_len: usize) -> (f64, Direction) {
    let last = path_len.saturating_sub(1) as f64;
    if progress >= last {
        (last, Direction::Backward)
    } else if progress <= 0.0 {
        (0.0, Direction::Forward)
    } else {
        (progress, direction)
    }
}

/// Heading in `[0, 360)` from vertex `floor(progress)` towards the next
/// vertex, flipped by 180° when travelling backward.  `None` at the last
/// vertex, where there is no segment to measure.
pub fn heading_at(path: &[PathPoint], progress: f64, direction: Direction) -> Option<f64> {
    let last = path.len().checked_sub(1)?;
    let current = (progress.floor() as usize).min(last);
    let next = (current + 1).min(last);
    if current == next {
        return None;
    }
    let bearing = path[current].pos.bearing_deg(path[next].pos);
    Some(match direction {
        Direction::Forward  => bearing.rem_euclid(360.0),
        Direction::Backward => (bearing + 180.0).rem_euclid(360.0),
    })
}

/// The stop after `current` in travel order, wrapping at both ends.
#[inline]
pub fn next_stop_index(current: usize, stop_count: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => (current + 1) % stop_count,
        Direction::Backward if current == 0 => stop_count - 1,
        Direction::Backward => current - 1,
    }
}

/// Apply one uniform draw `u ∈ [0, 1)` to the occupancy ring:
/// `u < 0.02` steps up, `0.02 ≤ u < 0.04` steps down, otherwise unchanged.
#[inline]
pub fn drift_occupancy(current: Occupancy, u: f64) -> Occupancy {
    if u < OCCUPANCY_STEP_P {
        current.step_up()
    } else if u < 2.0 * OCCUPANCY_STEP_P {
        current.step_down()
    } else {
        current
    }
}
