//! Run-state machine of the simulation timer.
//!
//! ```text
//!            start / resume            pause
//!  Stopped ─────────────────▶ Running ───────▶ Paused
//!     ▲                         │  ▲              │
//!     │          stop           │  └──────────────┘
//!     └─────────────────────────┘   start / resume
//!     ▲                                           │
//!     └───────────────────── stop ────────────────┘
//! ```
//!
//! The clock only records the state and the tick counter.  Whoever owns the
//! timer (the [`driver`][crate::driver] or a test) asks
//! [`is_running`](SimulationClock::is_running) before firing a tick.

use std::fmt;

use bs_core::{Tick, TickClock};

/// Timer state.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum ClockStatus {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl ClockStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ClockStatus::Stopped => "stopped",
            ClockStatus::Running => "running",
            ClockStatus::Paused  => "paused",
        }
    }
}

impl fmt::Display for ClockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timer state plus the tick counter.  Transitions return `true` when the
/// state actually changed.
#[derive(Clone, Debug)]
pub struct SimulationClock {
    status:    ClockStatus,
    pub ticks: TickClock,
}

impl SimulationClock {
    pub fn new(ticks: TickClock) -> Self {
        Self { status: ClockStatus::Stopped, ticks }
    }

    #[inline]
    pub fn status(&self) -> ClockStatus {
        self.status
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == ClockStatus::Running
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.ticks.current_tick
    }

    /// No-op while running; otherwise begins ticking.
    pub fn start(&mut self) -> bool {
        self.transition(ClockStatus::Running)
    }

    /// Same as [`start`](Self::start).
    pub fn resume(&mut self) -> bool {
        self.start()
    }

    /// Running → Paused.  A paused or stopped clock is left alone, so
    /// calling this twice is the same as calling it once.
    pub fn pause(&mut self) -> bool {
        if self.status != ClockStatus::Running {
            return false;
        }
        self.transition(ClockStatus::Paused)
    }

    pub fn stop(&mut self) -> bool {
        self.transition(ClockStatus::Stopped)
    }

    fn transition(&mut self, to: ClockStatus) -> bool {
        let changed = self.status != to;
        self.status = to;
        changed
    }
}
