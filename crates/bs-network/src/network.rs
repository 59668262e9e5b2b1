//! The route network: routes, their precomputed paths, and a stop index.
//!
//! # Data layout
//!
//! Routes are stored in insertion order.  `paths[i]` is the path of
//! `routes[i]`, built once by [`PathBuilder`] when the network is built and
//! never mutated afterwards.  A `RouteId → index` map gives O(1) lookup for
//! the per-tick motion loop.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps stops to entries keyed on
//! `[lat, lng · cos(lat)]`, so that a degree east counts for as much ground
//! as it covers at that latitude.  A stop that is served by several routes
//! appears once per route; queries that are not restricted to a route
//! de-duplicate by `StopId`.
//!
//! The projected distance only picks candidates.  Results are re-ranked by
//! haversine distance, which is the `distance_m` they report.

use std::collections::{HashMap, HashSet};

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tracing::warn;

use bs_core::{CoreError, GeoPoint, PathConfig, RouteId, StopId};

use crate::{NetworkError, NetworkResult, PathBuilder, PathPoint, Route};

// ── R-tree stop entry ─────────────────────────────────────────────────────────

/// Extra candidates pulled from the R-tree before re-ranking by haversine.
const CANDIDATE_SLACK: usize = 8;

/// Equirectangular projection used as the R-tree key.
#[inline]
fn project(pos: GeoPoint) -> [f64; 2] {
    [pos.lat, pos.lng * pos.lat.to_radians().cos()]
}

/// Entry stored in the R-tree: the projected stop position plus the position
/// of the stop in `routes[route].stops[stop]`.
#[derive(Clone)]
struct StopEntry {
    point: [f64; 2],
    route: usize,
    stop:  usize,
}

impl RTreeObject for StopEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StopEntry {
    /// Squared Euclidean distance in projected space.  Candidate selection
    /// only; the reported distance is haversine.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlng = self.point[1] - point[1];
        dlat * dlat + dlng * dlng
    }
}

/// One result of a nearby-stop query.
#[derive(Clone, Debug, PartialEq)]
pub struct StopHit {
    pub stop_id:    StopId,
    pub route_id:   RouteId,
    pub name:       String,
    pub pos:        GeoPoint,
    pub distance_m: f64,
}

// ── RouteNetwork ──────────────────────────────────────────────────────────────

/// Immutable set of routes and their paths.  Build with
/// [`RouteNetworkBuilder`].
pub struct RouteNetwork {
    routes:      Vec<Route>,
    paths:       Vec<Vec<PathPoint>>,
    route_index: HashMap<RouteId, usize>,
    stop_idx:    RTree<StopEntry>,
}

impl RouteNetwork {
    /// A network with no routes.  Every bus placed against it is skipped.
    pub fn empty() -> Self {
        RouteNetworkBuilder::new(PathConfig::default()).build()
    }

    /// Build a network from routes with the default path geometry.
    pub fn from_routes(routes: Vec<Route>) -> NetworkResult<Self> {
        let mut b = RouteNetworkBuilder::new(PathConfig::default());
        for route in routes {
            b.add_route(route)?;
        }
        Ok(b.build())
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    // ── Route / path lookup ───────────────────────────────────────────────

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[inline]
    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.route_index.get(id).map(|&i| &self.routes[i])
    }

    /// The path of `id`, possibly empty for a route with < 2 stops.
    #[inline]
    pub fn path(&self, id: &RouteId) -> Option<&[PathPoint]> {
        self.route_index.get(id).map(|&i| self.paths[i].as_slice())
    }

    /// Route and path together — what the motion loop needs per bus.
    #[inline]
    pub fn route_with_path(&self, id: &RouteId) -> Option<(&Route, &[PathPoint])> {
        self.route_index
            .get(id)
            .map(|&i| (&self.routes[i], self.paths[i].as_slice()))
    }

    /// Like [`path`](Self::path) but fails for unknown routes and for routes
    /// too short to carry a bus.
    pub fn traversable_path(&self, id: &RouteId) -> NetworkResult<&[PathPoint]> {
        let (route, path) = self
            .route_with_path(id)
            .ok_or_else(|| NetworkError::Core(CoreError::UnknownRoute(id.clone())))?;
        if path.is_empty() {
            return Err(NetworkError::TooFewStops {
                route: id.clone(),
                stops: route.stops.len(),
            });
        }
        Ok(path)
    }

    /// Index of the first path vertex whose nearest stop is `stop`.
    pub fn first_path_index(&self, route: &RouteId, stop: &StopId) -> Option<usize> {
        self.path(route)?
            .iter()
            .position(|p| &p.nearest_stop == stop)
    }

    // ── Stop lookup ───────────────────────────────────────────────────────

    /// All routes that call at `stop`, in insertion order.
    pub fn routes_serving<'a>(&'a self, stop: &StopId) -> impl Iterator<Item = &'a Route> + use<'a> {
        let stop = stop.clone();
        self.routes.iter().filter(move |r| r.serves(&stop))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Up to `k` distinct stops nearest to `pos`, sorted by ascending
    /// `distance_m`.  A stop served by several routes is reported once, with
    /// the first route found.
    pub fn nearest_stops(&self, pos: GeoPoint, k: usize) -> Vec<StopHit> {
        let mut seen: HashSet<&StopId> = HashSet::new();
        let candidates = self
            .stop_idx
            .nearest_neighbor_iter(&project(pos))
            .filter(|e| seen.insert(&self.routes[e.route].stops[e.stop].id));
        self.ranked(candidates, pos, k)
    }

    /// Up to `k` stops of `route` nearest to `pos`, sorted by ascending
    /// `distance_m`.
    pub fn nearest_stops_on_route(&self, pos: GeoPoint, route: &RouteId, k: usize) -> Vec<StopHit> {
        let Some(&ri) = self.route_index.get(route) else {
            return vec![];
        };
        let candidates = self
            .stop_idx
            .nearest_neighbor_iter(&project(pos))
            .filter(|e| e.route == ri);
        self.ranked(candidates, pos, k)
    }

    fn ranked<'a>(
        &self,
        candidates: impl Iterator<Item = &'a StopEntry>,
        pos: GeoPoint,
        k: usize,
    ) -> Vec<StopHit> {
        let mut hits: Vec<StopHit> = candidates
            .take(k.saturating_add(CANDIDATE_SLACK))
            .map(|e| self.hit(e, pos))
            .collect();
        hits.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        hits.truncate(k);
        hits
    }

    fn hit(&self, entry: &StopEntry, from: GeoPoint) -> StopHit {
        let route = &self.routes[entry.route];
        let stop = &route.stops[entry.stop];
        StopHit {
            stop_id:    stop.id.clone(),
            route_id:   route.id.clone(),
            name:       stop.name.clone(),
            pos:        stop.pos,
            distance_m: from.distance_m(stop.pos),
        }
    }
}

// ── RouteNetworkBuilder ───────────────────────────────────────────────────────

/// Collect routes, then call [`build`](Self::build) to generate every path
/// and bulk-load the stop index.
///
/// # Example
///
/// ```
/// use bs_core::PathConfig;
/// use bs_network::{Route, RouteNetworkBuilder, Stop};
///
/// let mut b = RouteNetworkBuilder::new(PathConfig::default());
/// b.add_route(Route::new("R1", "Line 1", "#FF6B35", vec![
///     Stop::new("A", "Alpha", 0.0, 0.0),
///     Stop::new("B", "Beta",  0.0, 1.0),
/// ])).unwrap();
/// let net = b.build();
/// assert_eq!(net.path(&"R1".into()).unwrap().len(), 21);
/// ```
pub struct RouteNetworkBuilder {
    routes:  Vec<Route>,
    builder: PathBuilder,
}

impl RouteNetworkBuilder {
    pub fn new(config: PathConfig) -> Self {
        Self { routes: Vec::new(), builder: PathBuilder::new(&config) }
    }

    /// Add a route.  Route ids must be unique.
    pub fn add_route(&mut self, route: Route) -> NetworkResult<()> {
        if self.routes.iter().any(|r| r.id == route.id) {
            return Err(NetworkError::DuplicateRoute(route.id));
        }
        self.routes.push(route);
        Ok(())
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Consume the builder and produce a [`RouteNetwork`].
    pub fn build(self) -> RouteNetwork {
        let paths: Vec<Vec<PathPoint>> = self
            .routes
            .iter()
            .map(|route| {
                if !route.is_traversable() {
                    warn!(
                        route = %route.id,
                        stops = route.stops.len(),
                        "route has fewer than 2 stops; its path is empty"
                    );
                }
                self.builder.build(&route.stops)
            })
            .collect();

        let route_index = self
            .routes
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        let entries: Vec<StopEntry> = self
            .routes
            .iter()
            .enumerate()
            .flat_map(|(ri, r)| {
                r.stops.iter().enumerate().map(move |(si, s)| StopEntry {
                    point: project(s.pos),
                    route: ri,
                    stop:  si,
                })
            })
            .collect();
        let stop_idx = RTree::bulk_load(entries);

        RouteNetwork {
            routes: self.routes,
            paths,
            route_index,
            stop_idx,
        }
    }
}
