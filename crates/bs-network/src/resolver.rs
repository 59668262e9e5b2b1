//! Progress → coordinate resolution.
//!
//! `progress` is a real-valued index into a path: its integer part selects a
//! vertex, its fractional part blends towards the following one.  Indices wrap
//! cyclically.  The motion engine never lets progress leave `[0, len - 1]`,
//! but the wrap keeps the resolver total for any non-negative input.

use bs_core::{GeoPoint, StopId};

use crate::PathPoint;

/// A resolved position along a path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSample {
    pub pos: GeoPoint,
    /// Nearest stop of the vertex at `floor(progress)` — never blended.
    /// `None` only for the empty-path sentinel.
    pub nearest_stop: Option<StopId>,
}

impl PathSample {
    /// The sample returned for an empty path.
    pub fn empty() -> Self {
        Self { pos: GeoPoint::ZERO, nearest_stop: None }
    }
}

/// Sample `path` at `progress`.
///
/// Returns [`PathSample::empty`] (lat 0, lng 0, no stop) for an empty path so
/// callers never need to special-case it.  Negative or non-finite progress is
/// treated as 0.
pub fn position_at(path: &[PathPoint], progress: f64) -> PathSample {
    if path.is_empty() {
        return PathSample::empty();
    }
    let progress = if progress.is_finite() { progress.max(0.0) } else { 0.0 };

    let len   = path.len();
    let whole = progress.floor();
    let index = (whole as usize) % len;
    let next  = (index + 1) % len;
    let frac  = progress - whole;

    let current = &path[index];
    PathSample {
        pos:          current.pos.lerp(path[next].pos, frac),
        nearest_stop: Some(current.nearest_stop.clone()),
    }
}
