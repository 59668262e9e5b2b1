//! The `OutputWriter` trait implemented by all backend writers.

use crate::{BusSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV, SQLite, and Parquet writers.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write the positions of every bus at one tick.
    fn write_snapshots(&mut self, rows: &[BusSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
