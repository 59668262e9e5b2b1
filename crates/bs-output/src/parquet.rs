//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `bus_snapshots.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Builder, Int8Builder, Int64Builder, StringBuilder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::writer::OutputWriter;
use crate::{BusSnapshotRow, OutputError, OutputResult, TickSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("bus_id",    DataType::Utf8,    false),
        Field::new("route_id",  DataType::Utf8,    false),
        Field::new("tick",      DataType::UInt64,  false),
        Field::new("lat",       DataType::Float64, false),
        Field::new("lng",       DataType::Float64, false),
        Field::new("heading",   DataType::Float64, false),
        Field::new("progress",  DataType::Float64, false),
        Field::new("direction", DataType::Int8,    false),
        Field::new("occupancy", DataType::Utf8,    false),
        Field::new("next_stop", DataType::Utf8,    true),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("tick",           DataType::UInt64, false),
        Field::new("unix_time_ms",   DataType::Int64,  false),
        Field::new("advanced_buses", DataType::UInt64, false),
        Field::new("skipped_buses",  DataType::UInt64, false),
    ]))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes the trace to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_path = dir.join("bus_snapshots.parquet");
        let snap_file = File::create(&snap_path).map_err(OutputError::create(snap_path))?;
        let snapshots = ArrowWriter::try_new(snap_file, Arc::clone(&snap_schema), Some(snappy_props()))?;

        let summ_path = dir.join("tick_summaries.parquet");
        let summ_file = File::create(&summ_path).map_err(OutputError::create(summ_path))?;
        let summaries = ArrowWriter::try_new(summ_file, Arc::clone(&summ_schema), Some(snappy_props()))?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[BusSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut bus_ids    = StringBuilder::new();
        let mut route_ids  = StringBuilder::new();
        let mut ticks      = UInt64Builder::new();
        let mut lats       = Float64Builder::new();
        let mut lngs       = Float64Builder::new();
        let mut headings   = Float64Builder::new();
        let mut progresses = Float64Builder::new();
        let mut directions = Int8Builder::new();
        let mut occupancy  = StringBuilder::new();
        let mut next_stops = StringBuilder::new();

        for row in rows {
            bus_ids.append_value(&row.bus_id);
            route_ids.append_value(&row.route_id);
            ticks.append_value(row.tick);
            lats.append_value(row.lat);
            lngs.append_value(row.lng);
            headings.append_value(row.heading);
            progresses.append_value(row.progress);
            directions.append_value(row.direction);
            occupancy.append_value(row.occupancy);
            next_stops.append_option(row.next_stop.as_deref());
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(bus_ids.finish()),
                Arc::new(route_ids.finish()),
                Arc::new(ticks.finish()),
                Arc::new(lats.finish()),
                Arc::new(lngs.finish()),
                Arc::new(headings.finish()),
                Arc::new(progresses.finish()),
                Arc::new(directions.finish()),
                Arc::new(occupancy.finish()),
                Arc::new(next_stops.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let mut ticks      = UInt64Builder::new();
        let mut unix_times = Int64Builder::new();
        let mut advanced   = UInt64Builder::new();
        let mut skipped    = UInt64Builder::new();

        ticks.append_value(row.tick);
        unix_times.append_value(row.unix_time_ms);
        advanced.append_value(row.advanced_buses);
        skipped.append_value(row.skipped_buses);

        let batch = RecordBatch::try_new(
            Arc::clone(&self.summ_schema),
            vec![
                Arc::new(ticks.finish()),
                Arc::new(unix_times.finish()),
                Arc::new(advanced.finish()),
                Arc::new(skipped.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
