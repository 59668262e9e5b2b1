//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `bus_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{BusSnapshotRow, OutputError, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub const SNAPSHOT_HEADER: [&str; 10] = [
    "bus_id", "route_id", "tick", "lat", "lng", "heading", "progress", "direction", "occupancy",
    "next_stop",
];

pub const SUMMARY_HEADER: [&str; 4] = ["tick", "unix_time_ms", "advanced_buses", "skipped_buses"];

fn open(dir: &Path, name: &str) -> OutputResult<Writer<File>> {
    let path = dir.join(name);
    let file = File::create(&path).map_err(OutputError::create(path))?;
    Ok(Writer::from_writer(file))
}

/// Writes the trace to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = open(dir, "bus_snapshots.csv")?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = open(dir, "tick_summaries.csv")?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[BusSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.bus_id.clone(),
                row.route_id.clone(),
                row.tick.to_string(),
                row.lat.to_string(),
                row.lng.to_string(),
                format!("{:.2}", row.heading),
                row.progress.to_string(),
                row.direction.to_string(),
                row.occupancy.to_owned(),
                row.next_stop.clone().unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unix_time_ms.to_string(),
            row.advanced_buses.to_string(),
            row.skipped_buses.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
