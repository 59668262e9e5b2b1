//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `trace.db` file in the configured output directory with
//! two tables: `bus_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{BusSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

/// Writes the trace to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `trace.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("trace.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS bus_snapshots (
                 bus_id    TEXT    NOT NULL,
                 route_id  TEXT    NOT NULL,
                 tick      INTEGER NOT NULL,
                 lat       REAL    NOT NULL,
                 lng       REAL    NOT NULL,
                 heading   REAL    NOT NULL,
                 progress  REAL    NOT NULL,
                 direction INTEGER NOT NULL,
                 occupancy TEXT    NOT NULL,
                 next_stop TEXT
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick           INTEGER PRIMARY KEY,
                 unix_time_ms   INTEGER NOT NULL,
                 advanced_buses INTEGER NOT NULL,
                 skipped_buses  INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[BusSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO bus_snapshots \
                 (bus_id, route_id, tick, lat, lng, heading, progress, direction, occupancy, next_stop) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.bus_id,
                    row.route_id,
                    row.tick,
                    row.lat,
                    row.lng,
                    row.heading,
                    row.progress,
                    row.direction,
                    row.occupancy,
                    row.next_stop,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, unix_time_ms, advanced_buses, skipped_buses) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.tick, row.unix_time_ms, row.advanced_buses, row.skipped_buses],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
