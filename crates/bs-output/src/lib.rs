//! `bs-output` — trace export for the bus_sim transit simulator.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                         |
//! |-----------|-------------|-------------------------------------------------------|
//! | *(none)*  | CSV         | `bus_snapshots.csv`, `tick_summaries.csv`             |
//! | `sqlite`  | SQLite      | `trace.db`                                            |
//! | `parquet` | Parquet     | `bus_snapshots.parquet`, `tick_summaries.parquet`     |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `bs_sim::PositionsObserver`.
//!
//! The files are an observation log.  Nothing here is ever read back into a
//! simulation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run_ticks(100, &mut obs);
//! obs.finish();
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{BusSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
