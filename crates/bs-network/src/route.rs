//! Stops and routes as loaded from the feed.  Both are immutable once built.

use bs_core::{GeoPoint, RouteId, StopId};

/// A place where buses call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub id:   StopId,
    pub name: String,
    pub pos:  GeoPoint,
}

impl Stop {
    pub fn new(id: impl Into<StopId>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id:   id.into(),
            name: name.into(),
            pos:  GeoPoint::new(lat, lng),
        }
    }
}

/// An ordered sequence of stops served by the same buses.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub id:    RouteId,
    pub name:  String,
    /// Display colour, e.g. `"#FF6B35"`.  Opaque to the simulator.
    pub color: String,
    pub stops: Vec<Stop>,
}

impl Route {
    pub fn new(
        id:    impl Into<RouteId>,
        name:  impl Into<String>,
        color: impl Into<String>,
        stops: Vec<Stop>,
    ) -> Self {
        Self {
            id:    id.into(),
            name:  name.into(),
            color: color.into(),
            stops,
        }
    }

    /// Position of `stop` in traversal order, if the route calls there.
    #[inline]
    pub fn stop_index(&self, stop: &StopId) -> Option<usize> {
        self.stops.iter().position(|s| &s.id == stop)
    }

    #[inline]
    pub fn serves(&self, stop: &StopId) -> bool {
        self.stop_index(stop).is_some()
    }

    /// A bus can only be placed on a route with at least one leg.
    #[inline]
    pub fn is_traversable(&self) -> bool {
        self.stops.len() >= 2
    }
}
