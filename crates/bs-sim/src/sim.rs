//! The `Sim` struct: state, clock, and the per-tick sequence.

use tracing::{debug, info, warn};

use bs_core::{BusId, GeoPoint, RandomSource, RouteId, SimConfig, SimRng, StopId, Tick};
use bs_fleet::{Arrival, ArrivalEstimator, Bus, TelemetrySnapshot, TickReport};
use bs_network::{Route, RouteNetwork, StopHit};

use crate::{
    ClockControl, ClockStatus, PositionsObserver, PositionsUpdate, SimulationClock,
    SimulationState,
};

/// The simulation runner.
///
/// `Sim` owns everything a run needs and nothing is global: the route
/// network and fleet ([`SimulationState`]), the run-state machine and tick
/// counter ([`SimulationClock`]), and two random streams.  The motion stream
/// `R` drives occupancy drift and is injectable for tests; telemetry has its
/// own stream so that sampling diagnostics never perturbs motion.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: RandomSource = SimRng> {
    pub config: SimConfig,
    pub clock:  SimulationClock,
    pub state:  SimulationState,

    pub(crate) estimator:     ArrivalEstimator,
    pub(crate) rng:           R,
    pub(crate) telemetry_rng: SimRng,
}

impl<R: RandomSource> Sim<R> {
    // ── Clock control ─────────────────────────────────────────────────────

    #[inline]
    pub fn status(&self) -> ClockStatus {
        self.clock.status()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Ticks completed so far.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick()
    }

    /// Begin ticking.  No-op while already running.
    pub fn start(&mut self) -> bool {
        let changed = self.clock.start();
        if changed {
            info!(tick = %self.current_tick(), speed = self.speed_multiplier(), "simulation started");
        }
        changed
    }

    /// Stop ticking without touching bus state.  Idempotent.
    pub fn pause(&mut self) -> bool {
        let changed = self.clock.pause();
        if changed {
            info!(tick = %self.current_tick(), "simulation paused");
        }
        changed
    }

    /// Same as [`start`](Self::start).
    pub fn resume(&mut self) -> bool {
        let changed = self.clock.resume();
        if changed {
            info!(tick = %self.current_tick(), "simulation resumed");
        }
        changed
    }

    pub fn stop(&mut self) -> bool {
        let changed = self.clock.stop();
        if changed {
            info!(tick = %self.current_tick(), "simulation stopped");
        }
        changed
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f64 {
        self.state.speed_multiplier()
    }

    /// Set the speed multiplier, clamped to `[0.1, 5]`.  Takes effect from
    /// the next tick.  NaN is ignored.  Returns the multiplier in effect.
    pub fn set_speed(&mut self, multiplier: f64) -> f64 {
        if multiplier.is_nan() {
            warn!("ignoring NaN speed multiplier");
            return self.speed_multiplier();
        }
        let applied = self.state.set_speed(multiplier);
        info!("Simulation speed set to {}x", applied);
        applied
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// One timer firing: advances and publishes only while running.
    pub fn fire<O: PositionsObserver + ?Sized>(&mut self, observer: &mut O) -> Option<TickReport> {
        if !self.is_running() {
            return None;
        }
        Some(self.advance(observer).0)
    }

    /// Advance exactly one tick regardless of the clock state, then
    /// publish.  Pause/stop requests from observers are still applied.
    pub fn step<O: PositionsObserver + ?Sized>(&mut self, observer: &mut O) -> TickReport {
        self.advance(observer).0
    }

    /// Step up to `n` ticks, returning early when an observer asks to pause
    /// or stop.  Returns the number of ticks taken.
    pub fn run_ticks<O: PositionsObserver + ?Sized>(&mut self, n: u64, observer: &mut O) -> u64 {
        for done in 1..=n {
            let (_, control) = self.advance(observer);
            if control.halts() {
                return done;
            }
        }
        n
    }

    fn advance<O: PositionsObserver + ?Sized>(&mut self, observer: &mut O) -> (TickReport, ClockControl) {
        let report = self.state.tick(&mut self.rng);
        self.clock.ticks.advance();

        let tick = self.clock.current_tick();
        debug!(tick = %tick, advanced = report.advanced, skipped = report.skipped, "tick complete");

        let update = PositionsUpdate {
            tick,
            unix_ms: self.clock.ticks.current_unix_ms(),
            buses:   self.state.buses(),
            report,
        };
        let mut control = ClockControl::default();
        observer.on_positions_updated(&update, &mut control);

        if control.stop_requested() {
            self.stop();
        } else if control.pause_requested() {
            self.pause();
        }
        (report, control)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn network(&self) -> &RouteNetwork {
        &self.state.network
    }

    #[inline]
    pub fn buses(&self) -> &[Bus] {
        self.state.buses()
    }

    pub fn bus(&self, id: &BusId) -> Option<&Bus> {
        self.state.bus(id)
    }

    pub fn buses_on_route<'a>(&'a self, route: &RouteId) -> impl Iterator<Item = &'a Bus> + use<'a, R> {
        self.state.buses_on_route(route)
    }

    /// Buses within `radius_m` metres of `center`, nearest first.
    pub fn buses_within(&self, center: GeoPoint, radius_m: f64) -> Vec<(&Bus, f64)> {
        self.state.buses_within(center, radius_m)
    }

    /// Up to three upcoming arrivals at `stop`, soonest first.
    pub fn arrivals_for(&self, stop: &StopId) -> Vec<Arrival> {
        self.estimator.arrivals_for(stop, self.state.buses(), &self.state.network)
    }

    /// The `k` stops nearest to `pos` across all routes.
    pub fn nearest_stops(&self, pos: GeoPoint, k: usize) -> Vec<StopHit> {
        self.state.network.nearest_stops(pos, k)
    }

    pub fn routes_serving<'a>(&'a self, stop: &StopId) -> impl Iterator<Item = &'a Route> + use<'a, R> {
        self.state.network.routes_serving(stop)
    }

    /// A fresh synthetic telemetry record for `id`, stamped with the current
    /// tick's wall-clock time.  Not stored.
    pub fn telemetry(&mut self, id: &BusId) -> Option<TelemetrySnapshot> {
        let now = self.clock.ticks.current_unix_ms();
        let bus = self.state.bus(id)?;
        Some(TelemetrySnapshot::sample(bus, now, &mut self.telemetry_rng))
    }
}
