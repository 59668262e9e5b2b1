//! Route path generation.
//!
//! A route's path is the motion substrate for every bus on it: a dense,
//! ordered polyline built leg by leg from the stop list.  Each leg from stop
//! `i` to stop `i + 1` contributes `K + 1` points (both endpoints included),
//! so consecutive legs repeat their shared stop and the total length is
//! `(stop_count - 1) * (K + 1)`.
//!
//! Straight legs are bowed by `sin(r·π) · amplitude` (latitude) and half that
//! on longitude, purely so that rendered paths do not look ruler-drawn.  This
//! is not a road-shape model.

use std::f64::consts::PI;

use bs_core::{GeoPoint, PathConfig, StopId};

use crate::Stop;

/// One vertex of a route path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    pub pos: GeoPoint,
    /// The leg's start stop for the first half of the leg, its end stop for
    /// the second half.
    pub nearest_stop: StopId,
}

/// Builds route paths with a fixed leg resolution and curvature.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    segments_per_leg: usize,
    curve_amplitude:  f64,
}

impl PathBuilder {
    pub fn new(config: &PathConfig) -> Self {
        Self {
            segments_per_leg: config.segments_per_leg.max(1),
            curve_amplitude:  config.curve_amplitude_deg,
        }
    }

    /// Points produced per leg (`K + 1`).
    #[inline]
    pub fn points_per_leg(&self) -> usize {
        self.segments_per_leg + 1
    }

    /// Expected path length for a route with `stop_count` stops.
    #[inline]
    pub fn path_len(&self, stop_count: usize) -> usize {
        stop_count.saturating_sub(1) * self.points_per_leg()
    }

    /// Convert an ordered stop list into a path.
    ///
    /// Fewer than two stops yields an empty path; no bus can move on it.
    pub fn build(&self, stops: &[Stop]) -> Vec<PathPoint> {
        let mut path = Vec::with_capacity(self.path_len(stops.len()));
        for leg in stops.windows(2) {
            self.push_leg(&leg[0], &leg[1], &mut path);
        }
        path
    }

    fn push_leg(&self, start: &Stop, end: &Stop, out: &mut Vec<PathPoint>) {
        let k = self.segments_per_leg;
        for j in 0..=k {
            let r = j as f64 / k as f64;
            let base = start.pos.lerp(end.pos, r);
            let curve = (r * PI).sin() * self.curve_amplitude;

            // `2j < k` is `r < 0.5` without the float comparison.
            let nearest = if 2 * j < k { &start.id } else { &end.id };

            out.push(PathPoint {
                pos: GeoPoint::new(base.lat + curve, base.lng + curve * 0.5),
                nearest_stop: nearest.clone(),
            });
        }
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new(&PathConfig::default())
    }
}
