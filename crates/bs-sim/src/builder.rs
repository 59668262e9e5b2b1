//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};

use bs_core::{BusId, RandomSource, SimConfig, SimRng};
use bs_fleet::{ArrivalEstimator, Bus, MotionEngine, load_fleet_csv};
use bs_network::{Route, RouteNetwork, RouteNetworkBuilder, load_routes_csv};

use crate::{Sim, SimError, SimResult, SimulationClock, SimulationState};

/// Seed offset of the telemetry stream relative to the motion stream.
const TELEMETRY_STREAM: u64 = 1;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick period, initial speed, seed, path geometry
/// - the route network (or the routes to build it from)
/// - the initial fleet
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                        |
/// |--------------------|------------------------------------------------|
/// | `.distribute(b)`   | `true`: buses spread evenly along their route  |
/// | `.strict(b)`       | `false`: bad buses are logged and skipped      |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::from_routes(config, routes, buses)?
///     .strict(true)
///     .build()?;
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    network:    RouteNetwork,
    buses:      Vec<Bus>,
    distribute: bool,
    strict:     bool,
}

impl SimBuilder {
    /// Create a builder over an already built network.
    pub fn new(config: SimConfig, network: RouteNetwork, buses: Vec<Bus>) -> Self {
        Self {
            config,
            network,
            buses,
            distribute: true,
            strict:     false,
        }
    }

    /// Build the network from `routes` using `config.path` geometry.
    pub fn from_routes(config: SimConfig, routes: Vec<Route>, buses: Vec<Bus>) -> SimResult<Self> {
        let mut b = RouteNetworkBuilder::new(config.path.clone());
        for route in routes {
            b.add_route(route)?;
        }
        Ok(Self::new(config, b.build(), buses))
    }

    /// Load routes and fleet from the two CSV formats.
    pub fn from_csv(config: SimConfig, routes_csv: &Path, fleet_csv: &Path) -> SimResult<Self> {
        let routes = load_routes_csv(routes_csv)?;
        let buses = load_fleet_csv(fleet_csv)?;
        Self::from_routes(config, routes, buses)
    }

    /// Whether to spread each route's buses evenly along its path.  When
    /// off, each bus keeps the progress it was created with (clamped to its
    /// path).
    pub fn distribute(mut self, on: bool) -> Self {
        self.distribute = on;
        self
    }

    /// Fail on buses that reference an unknown route or a route with fewer
    /// than two stops, and on duplicate bus ids, instead of logging them.
    pub fn strict(mut self, on: bool) -> Self {
        self.strict = on;
        self
    }

    /// Validate inputs and return a stopped [`Sim`] seeded from
    /// `config.seed`.
    pub fn build(self) -> SimResult<Sim<SimRng>> {
        let mut master = SimRng::new(self.config.seed);
        let motion = master.child(0);
        let telemetry = master.child(TELEMETRY_STREAM);
        self.finish(motion, telemetry)
    }

    /// Like [`build`](Self::build) but with a caller-supplied motion random
    /// source.
    pub fn build_with_rng<R: RandomSource>(self, rng: R) -> SimResult<Sim<R>> {
        let telemetry = SimRng::new(self.config.seed).child(TELEMETRY_STREAM);
        self.finish(rng, telemetry)
    }

    fn finish<R: RandomSource>(self, rng: R, telemetry_rng: SimRng) -> SimResult<Sim<R>> {
        self.config.validate()?;
        self.check_fleet()?;

        let mut buses = self.buses;
        if self.distribute {
            MotionEngine::distribute(&mut buses, &self.network);
        } else {
            for bus in &mut buses {
                if let Some(path) = self.network.path(&bus.route_id) {
                    MotionEngine::place(bus, path);
                }
            }
        }

        info!(
            routes = self.network.route_count(),
            buses = buses.len(),
            tick_interval_ms = self.config.tick_interval_ms,
            "simulation built"
        );

        Ok(Sim {
            clock:     SimulationClock::new(self.config.make_clock()),
            estimator: ArrivalEstimator::new(self.config.tick_interval_ms),
            state:     SimulationState::new(self.network, buses, self.config.speed_multiplier),
            config:    self.config,
            rng,
            telemetry_rng,
        })
    }

    /// Report (strict) or log (lenient) every bus that cannot run.
    fn check_fleet(&self) -> SimResult<()> {
        let mut seen: HashSet<&BusId> = HashSet::new();
        for bus in &self.buses {
            let duplicate = !seen.insert(&bus.id);
            let (reason, skipped) = match self.network.route(&bus.route_id) {
                None => ("route is not defined".to_owned(), true),
                Some(route) if !route.is_traversable() => (
                    format!("route has {} stop(s); at least 2 are needed", route.stops.len()),
                    true,
                ),
                Some(_) if duplicate => ("bus id is used more than once".to_owned(), false),
                Some(_) => continue,
            };

            if self.strict {
                return Err(SimError::Configuration {
                    bus:   bus.id.clone(),
                    route: bus.route_id.clone(),
                    reason,
                });
            }
            if skipped {
                warn!(bus = %bus.id, route = %bus.route_id, "{reason}; bus will be skipped every tick");
            } else {
                warn!(bus = %bus.id, route = %bus.route_id, "{reason}; lookups by id return the first");
            }
        }
        Ok(())
    }
}
