//! Per-bus state.

use bs_core::{BusId, DriverId, GeoPoint, Occupancy, RouteId};

/// Travel direction along the route path.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Towards the last stop (`+1`).
    #[default]
    Forward,
    /// Towards the first stop (`−1`).
    Backward,
}

impl Direction {
    /// `+1.0` or `−1.0`.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward  => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward  => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is driving.  Carried for detail panels; the simulator never reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    pub id:    DriverId,
    pub name:  String,
    pub phone: String,
}

/// A simulated bus.
///
/// `route_id` is fixed at construction.  Everything below it is rewritten by
/// the motion engine on every tick the bus is advanced.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bus {
    pub id:       BusId,
    pub route_id: RouteId,
    pub driver:   Option<Driver>,

    pub pos: GeoPoint,

    /// Degrees clockwise from north, in `[0, 360)`.
    pub heading: f64,

    pub occupancy: Occupancy,

    /// Display name of the stop the bus is heading for.  `None` until the
    /// first tick derives it (unless supplied by the feed).
    pub next_stop: Option<String>,

    /// Real-valued index into the route path, within `[0, path_len − 1]`
    /// between ticks.
    pub progress: f64,

    pub direction: Direction,
}

impl Bus {
    /// A bus at the start of its route, heading forward, with no driver.
    pub fn new(id: impl Into<BusId>, route_id: impl Into<RouteId>, occupancy: Occupancy) -> Self {
        Self {
            id:        id.into(),
            route_id:  route_id.into(),
            driver:    None,
            pos:       GeoPoint::ZERO,
            heading:   0.0,
            occupancy,
            next_stop: None,
            progress:  0.0,
            direction: Direction::Forward,
        }
    }

    pub fn with_driver(mut self, driver: Driver) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Override the initial progress and direction.  Positions are resolved
    /// on the next tick, or by [`MotionEngine::place`][crate::MotionEngine::place].
    pub fn at(mut self, progress: f64, direction: Direction) -> Self {
        self.progress = progress;
        self.direction = direction;
        self
    }
}
