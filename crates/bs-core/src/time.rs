//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one firing
//! of the simulation timer; the mapping to wall-clock time is held in
//! `TickClock`:
//!
//!   wall_time_ms = start_unix_ms + tick * tick_interval_ms
//!
//! Speed scaling does not change the tick period — it changes how far a bus
//! moves per tick — so the mapping stays exact.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickClock {
    /// Unix timestamp (milliseconds since epoch) of tick 0.
    pub start_unix_ms: i64,
    /// Timer period in milliseconds.  Default: 2000.
    pub tick_interval_ms: u64,
    /// The current tick — advanced by `TickClock::advance()` after each
    /// completed tick.
    pub current_tick: Tick,
}

impl TickClock {
    pub fn new(start_unix_ms: i64, tick_interval_ms: u64) -> Self {
        Self {
            start_unix_ms,
            tick_interval_ms,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_interval_ms as i64
    }

    /// Unix timestamp in milliseconds corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_ms(&self) -> i64 {
        self.start_unix_ms + self.elapsed_ms()
    }

    /// Unix timestamp in milliseconds of an arbitrary tick.
    #[inline]
    pub fn unix_ms_at(&self, tick: Tick) -> i64 {
        self.start_unix_ms + tick.0 as i64 * self.tick_interval_ms as i64
    }

    /// Timer firings per wall-clock minute (`60000 / tick_interval_ms`).
    #[inline]
    pub fn ticks_per_minute(&self) -> f64 {
        ticks_per_minute(self.tick_interval_ms)
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_ms().max(0) / 1000;
        write!(f, "{} (+{:02}:{:02})", self.current_tick, secs / 60, secs % 60)
    }
}

/// Timer firings per minute for a given period.
#[inline]
pub fn ticks_per_minute(tick_interval_ms: u64) -> f64 {
    60_000.0 / tick_interval_ms as f64
}

// ── PathConfig ────────────────────────────────────────────────────────────────

/// Geometry knobs for route-path generation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathConfig {
    /// Interpolation steps per leg.  Each leg yields `segments_per_leg + 1`
    /// points.  Default: 20.
    pub segments_per_leg: usize,

    /// Peak lateral bow added to the middle of every leg, in degrees of
    /// latitude (half of it is added to longitude).  Default: 0.0005.
    pub curve_amplitude_deg: f64,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            segments_per_leg:    20,
            curve_amplitude_deg: 0.0005,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built by the application crate (defaults plus command-line
/// overrides) and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Unix timestamp (ms) for tick 0.  Only used to stamp telemetry and
    /// output rows.
    pub start_unix_ms: i64,

    /// Timer period in milliseconds.  Default: 2000.
    pub tick_interval_ms: u64,

    /// Initial speed multiplier, clamped to `[0.1, 5]` by the clock.
    pub speed_multiplier: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub path: PathConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_ms:    0,
            tick_interval_ms: 2_000,
            speed_multiplier: 1.0,
            seed:             42,
            path:             PathConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject values that would make tick or path arithmetic meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(CoreError::Config("tick_interval_ms must be positive".into()));
        }
        if self.path.segments_per_leg == 0 {
            return Err(CoreError::Config("path.segments_per_leg must be positive".into()));
        }
        if !self.speed_multiplier.is_finite() {
            return Err(CoreError::Config(format!(
                "speed_multiplier must be finite, got {}",
                self.speed_multiplier
            )));
        }
        Ok(())
    }

    /// Construct a `TickClock` pre-configured for this run.
    pub fn make_clock(&self) -> TickClock {
        TickClock::new(self.start_unix_ms, self.tick_interval_ms)
    }
}
