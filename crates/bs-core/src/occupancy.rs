//! Passenger-load level shared by the fleet, telemetry and output crates.
//!
//! The three levels form a ring rather than a scale: stepping up from `High`
//! lands on `Low` and stepping down from `Low` lands on `High`.  Occupancy
//! drift relies on this to stay noisy instead of saturating at either end.

use std::str::FromStr;

use crate::CoreError;

/// How full a bus currently is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupancy {
    #[default]
    Low,
    Medium,
    High,
}

impl Occupancy {
    /// Next level round the ring: Low → Medium → High → Low.
    #[inline]
    pub fn step_up(self) -> Self {
        match self {
            Occupancy::Low    => Occupancy::Medium,
            Occupancy::Medium => Occupancy::High,
            Occupancy::High   => Occupancy::Low,
        }
    }

    /// Previous level round the ring: Low → High → Medium → Low.
    #[inline]
    pub fn step_down(self) -> Self {
        match self {
            Occupancy::Low    => Occupancy::High,
            Occupancy::Medium => Occupancy::Low,
            Occupancy::High   => Occupancy::Medium,
        }
    }

    /// Label used in CSV/Parquet columns and UI payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Occupancy::Low    => "Low",
            Occupancy::Medium => "Medium",
            Occupancy::High   => "High",
        }
    }
}

impl std::fmt::Display for Occupancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Occupancy {
    type Err = CoreError;

    /// Case-insensitive parse of `low` / `medium` / `high`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low"    => Ok(Occupancy::Low),
            "medium" => Ok(Occupancy::Medium),
            "high"   => Ok(Occupancy::High),
            other => Err(CoreError::Parse(format!(
                "invalid occupancy {other:?}: expected \"low\", \"medium\", or \"high\""
            ))),
        }
    }
}
