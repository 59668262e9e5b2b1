//! `bs-sim` — the running simulation.
//!
//! # Tick
//!
//! ```text
//! on every timer firing while Running:
//!   ① Motion   — MotionEngine advances every bus, in fleet order.
//!   ② Clock    — the tick counter advances.
//!   ③ Publish  — observers receive the full bus list.
//!   ④ Control  — pause/stop requested by observers is applied.
//! ```
//!
//! Observers run strictly after all buses have moved, and a pause they
//! request takes effect before the next firing, so no tick can slip in
//! between.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `tokio`   | [`driver`]: fixed-period timer with a command channel.      |
//! | `fx-hash` | FxHash instead of SipHash for the bus-id lookup table.      |
//! | `serde`   | Forwards to the `serde` feature of the lower crates.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bs_core::SimConfig;
//! use bs_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::from_routes(SimConfig::default(), routes, buses)?
//!     .strict(true)
//!     .build()?;
//! sim.run_ticks(30, &mut NoopObserver);
//! let next = sim.arrivals_for(&"S002".into());
//! ```

pub mod builder;
pub mod clock;
#[cfg(feature = "tokio")]
pub mod driver;
pub mod error;
pub mod observer;
pub mod sim;
pub mod state;


pub use builder::SimBuilder;
pub use clock::{ClockStatus, SimulationClock};
#[cfg(feature = "tokio")]
pub use driver::{ClockCommand, ClockHandle, drive};
pub use error::{SimError, SimResult};
pub use observer::{
    ChannelObserver, ClockControl, NoopObserver, ObserverSet, PositionsObserver,
    PositionsUpdate, PositionsUpdated,
};
pub use sim::Sim;
pub use state::SimulationState;
