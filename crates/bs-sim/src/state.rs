//! The explicitly owned simulation state.

use bs_core::{BusId, GeoPoint, RandomSource, RouteId};
use bs_fleet::{Bus, MotionEngine, TickReport};
use bs_network::RouteNetwork;

#[cfg(feature = "fx-hash")]
type BusIndex = rustc_hash::FxHashMap<BusId, usize>;
#[cfg(not(feature = "fx-hash"))]
type BusIndex = std::collections::HashMap<BusId, usize>;

/// Routes with their paths, the live fleet, and the speed setting.
///
/// Buses are never added or removed after construction, so the id → slot
/// table built here stays valid for the whole run.
pub struct SimulationState {
    pub network: RouteNetwork,
    buses:       Vec<Bus>,
    bus_index:   BusIndex,
    engine:      MotionEngine,
}

impl SimulationState {
    /// When two buses share an id, lookups by id return the first.
    pub fn new(network: RouteNetwork, buses: Vec<Bus>, speed_multiplier: f64) -> Self {
        let mut bus_index = BusIndex::default();
        for (i, bus) in buses.iter().enumerate() {
            bus_index.entry(bus.id.clone()).or_insert(i);
        }
        Self {
            network,
            buses,
            bus_index,
            engine: MotionEngine::new(speed_multiplier),
        }
    }

    // ── Motion ────────────────────────────────────────────────────────────

    /// Advance every bus by one tick.
    pub fn tick<R: RandomSource>(&mut self, rng: &mut R) -> TickReport {
        self.engine.tick(&mut self.buses, &self.network, rng)
    }

    #[inline]
    pub fn speed_multiplier(&self) -> f64 {
        self.engine.speed_multiplier()
    }

    /// Replace the engine with one at `multiplier` (clamped).  Returns the
    /// multiplier actually in effect.
    pub fn set_speed(&mut self, multiplier: f64) -> f64 {
        self.engine = MotionEngine::new(multiplier);
        self.engine.speed_multiplier()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    pub fn bus(&self, id: &BusId) -> Option<&Bus> {
        self.bus_index.get(id).map(|&i| &self.buses[i])
    }

    pub fn buses_on_route<'a>(&'a self, route: &RouteId) -> impl Iterator<Item = &'a Bus> + use<'a> {
        let route = route.clone();
        self.buses.iter().filter(move |b| b.route_id == route)
    }

    /// Buses within `radius_m` metres of `center`, nearest first, with their
    /// distances.
    ///
    /// A bounding box wide enough for the radius at `center`'s latitude
    /// rejects far buses before the haversine test.
    pub fn buses_within(&self, center: GeoPoint, radius_m: f64) -> Vec<(&Bus, f64)> {
        let half_deg = bbox_half_deg(center, radius_m);
        let mut hits: Vec<(&Bus, f64)> = self
            .buses
            .iter()
            .filter(|b| b.pos.within_bbox(center, half_deg))
            .map(|b| (b, center.distance_m(b.pos)))
            .filter(|&(_, d)| d <= radius_m)
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1));
        hits
    }
}

/// Ground length of one degree of latitude, metres.
const METRES_PER_DEGREE: f64 = 111_195.0;

/// Half-width in degrees of a box that contains every point within
/// `radius_m` of `center`.  Sized for longitude, the shorter degree.
fn bbox_half_deg(center: GeoPoint, radius_m: f64) -> f64 {
    let lng_scale = center.lat.to_radians().cos().abs().max(1e-6);
    // Small margin over the spherical approximation in `METRES_PER_DEGREE`.
    radius_m / (METRES_PER_DEGREE * lng_scale) * 1.01
}
