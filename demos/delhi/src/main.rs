//! delhi — three bus routes across Delhi on the real-time clock.
//!
//! Loads three routes (nine stops) and one bus per route, runs the
//! fixed-period timer for a number of ticks, then prints the next arrivals
//! at every stop, the stops nearest Connaught Place, and one telemetry
//! record as JSON.
//!
//! Run with:
//!   cargo run -p delhi -- --ticks 20 --interval-ms 250 --speed 2 --output ./trace

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bs_core::{BusId, GeoPoint, SimConfig, Tick};
use bs_fleet::load_fleet_reader;
use bs_network::load_routes_reader;
use bs_output::{CsvWriter, SimOutputObserver};
use bs_sim::driver::{self, drive};
use bs_sim::{ClockControl, ObserverSet, PositionsObserver, PositionsUpdate, SimBuilder};

// ── Feed ──────────────────────────────────────────────────────────────────────

const ROUTES_CSV: &str = "\
route_id,route_name,color,stop_id,stop_name,lat,lng\n\
R001,City Center - Airport,#FF6B35,S001,City Center Bus Station,28.6139,77.2090\n\
R001,City Center - Airport,#FF6B35,S002,Connaught Place,28.6289,77.2065\n\
R001,City Center - Airport,#FF6B35,S003,Rajiv Gandhi Terminal,28.5665,77.1031\n\
R002,Mall Circuit,#4ECDC4,S004,Select City Walk,28.4985,77.0917\n\
R002,Mall Circuit,#4ECDC4,S005,DLF Mall of India,28.6169,77.0704\n\
R002,Mall Circuit,#4ECDC4,S006,Ambience Mall,28.4668,77.0818\n\
R003,Heritage Route,#FFE66D,S007,Red Fort,28.6562,77.2410\n\
R003,Heritage Route,#FFE66D,S008,India Gate,28.6129,77.2295\n\
R003,Heritage Route,#FFE66D,S009,Humayun Tomb,28.5933,77.2507\n\
";

const FLEET_CSV: &str = "\
bus_id,route_id,occupancy,driver_id,driver_name,driver_phone\n\
DL1PC1234,R001,Medium,D001,Rajesh Kumar,+91-9876543210\n\
DL1PC5678,R002,High,D002,Amit Singh,+91-9876543211\n\
DL1PC9012,R003,Low,D003,Suresh Yadav,+91-9876543212\n\
";

const CONNAUGHT_PLACE: GeoPoint = GeoPoint { lat: 28.6289, lng: 77.2065 };

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Run the Delhi bus simulation on the real-time clock")]
struct Args {
    /// Ticks to run before stopping.
    #[arg(long, default_value_t = 15)]
    ticks: u64,

    /// Timer period in milliseconds.
    #[arg(long, default_value_t = 2_000)]
    interval_ms: u64,

    /// Speed multiplier, clamped to [0.1, 5].
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory for the CSV trace.  No trace is written when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

// ── Observers ─────────────────────────────────────────────────────────────────

/// Logs every bus each tick and stops the clock after `limit` ticks.
struct ProgressPrinter {
    limit: u64,
}

impl PositionsObserver for ProgressPrinter {
    fn on_positions_updated(&mut self, update: &PositionsUpdate<'_>, control: &mut ClockControl) {
        for bus in update.buses {
            info!(
                tick = update.tick.0,
                bus = %bus.id,
                lat = format_args!("{:.5}", bus.pos.lat),
                lng = format_args!("{:.5}", bus.pos.lng),
                heading = format_args!("{:.0}", bus.heading),
                next_stop = bus.next_stop.as_deref().unwrap_or("-"),
                occupancy = %bus.occupancy,
            );
        }
        if update.tick.0 >= self.limit {
            control.stop();
        }
    }

    fn on_stopped(&mut self, final_tick: Tick) {
        info!(tick = %final_tick, "clock stopped");
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let t0 = Instant::now();

    let config = SimConfig {
        tick_interval_ms: args.interval_ms,
        seed:             args.seed,
        ..SimConfig::default()
    };

    let routes = load_routes_reader(Cursor::new(ROUTES_CSV)).context("loading routes")?;
    let buses = load_fleet_reader(Cursor::new(FLEET_CSV)).context("loading fleet")?;
    let mut sim = SimBuilder::from_routes(config, routes, buses)?
        .strict(true)
        .build()?;

    let mut observers = ObserverSet::new().with(ProgressPrinter { limit: args.ticks });
    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        observers.push(SimOutputObserver::new(CsvWriter::new(dir)?));
    }

    let (handle, commands) = driver::channel();
    handle.set_speed(args.speed);

    let fired = drive(&mut sim, &mut observers, commands).await;
    drop(handle);
    info!(fired, elapsed_ms = t0.elapsed().as_millis() as u64, "run complete");

    // ── Report ────────────────────────────────────────────────────────────

    println!("\nNext arrivals (tick {}):", sim.current_tick().0);
    for route in sim.network().routes() {
        for stop in &route.stops {
            let arrivals = sim.arrivals_for(&stop.id);
            let summary: Vec<String> = arrivals
                .iter()
                .map(|a| format!("{} in {} min ({})", a.bus_id, a.eta_minutes, a.occupancy))
                .collect();
            let summary = if summary.is_empty() { "none within the hour".to_owned() } else { summary.join(", ") };
            println!("  {:<4} {:<26} {summary}", route.id, stop.name);
        }
    }

    println!("\nStops nearest Connaught Place:");
    for hit in sim.nearest_stops(CONNAUGHT_PLACE, 3) {
        println!("  {:<26} {:>7.0} m  ({})", hit.name, hit.distance_m, hit.route_id);
    }

    let nearby = sim.buses_within(CONNAUGHT_PLACE, 5_000.0);
    println!("\nBuses within 5 km of Connaught Place: {}", nearby.len());

    let id = BusId::from("DL1PC1234");
    if let Some(snapshot) = sim.telemetry(&id) {
        println!("\nTelemetry for {id}:\n{}", serde_json::to_string_pretty(&snapshot)?);
    }

    Ok(())
}
