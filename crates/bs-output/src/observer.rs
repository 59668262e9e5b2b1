//! `SimOutputObserver<W>` — bridges `PositionsObserver` to an `OutputWriter`.

use tracing::warn;

use bs_core::Tick;
use bs_sim::{ClockControl, PositionsObserver, PositionsUpdate};

use crate::row::{BusSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`PositionsObserver`] that writes bus snapshots and tick summaries to
/// any [`OutputWriter`] backend (CSV, SQLite, Parquet).
///
/// Errors from the writer are stored internally because observer callbacks
/// have no return value; check with [`take_error`][Self::take_error] after
/// the run.  A write error never pauses or stops the clock.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:         W,
    snapshot_every: u64,
    last_error:     Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Write a summary every tick and a snapshot every tick.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            snapshot_every: 1,
            last_error:     None,
        }
    }

    /// Write bus snapshots only on ticks divisible by `n` (0 disables them).
    /// Tick summaries are always written.
    pub fn snapshot_every(mut self, n: u64) -> Self {
        self.snapshot_every = n;
        self
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  Also done by `on_stopped` at the end of a driven
    /// run.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "trace write failed; further errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> PositionsObserver for SimOutputObserver<W> {
    fn on_positions_updated(&mut self, update: &PositionsUpdate<'_>, _control: &mut ClockControl) {
        let row = TickSummaryRow {
            tick:           update.tick.0,
            unix_time_ms:   update.unix_ms,
            advanced_buses: update.report.advanced as u64,
            skipped_buses:  update.report.skipped as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);

        if self.snapshot_every == 0 || update.tick.0 % self.snapshot_every != 0 {
            return;
        }
        let rows: Vec<BusSnapshotRow> = update
            .buses
            .iter()
            .map(|bus| BusSnapshotRow::from_bus(update.tick, bus))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_stopped(&mut self, _final_tick: Tick) {
        self.finish();
    }
}
