//! CSV fleet loader.
//!
//! # CSV format
//!
//! One row per bus.  Driver columns may be left empty.
//!
//! ```csv
//! bus_id,route_id,occupancy,driver_id,driver_name,driver_phone
//! DL1PC1234,R001,Medium,D001,Rajesh Kumar,+91-9876543210
//! DL1PC5678,R002,High,,,
//! ```
//!
//! `occupancy` is `low` / `medium` / `high`, case-insensitive.  Route ids are
//! not checked here; the simulation builder decides what to do with buses on
//! unknown routes.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bs_core::{DriverId, Occupancy};

use crate::{Bus, Driver, FleetResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct BusRecord {
    bus_id:       String,
    route_id:     String,
    occupancy:    String,
    driver_id:    Option<String>,
    driver_name:  Option<String>,
    driver_phone: Option<String>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the fleet from a CSV file.
pub fn load_fleet_csv(path: &Path) -> FleetResult<Vec<Bus>> {
    let file = std::fs::File::open(path)?;
    load_fleet_reader(file)
}

/// Like [`load_fleet_csv`] but accepts any `Read` source.
pub fn load_fleet_reader<R: Read>(reader: R) -> FleetResult<Vec<Bus>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut fleet = Vec::new();

    for result in csv_reader.deserialize::<BusRecord>() {
        let row = result?;
        let occupancy: Occupancy = row.occupancy.parse()?;
        let mut bus = Bus::new(row.bus_id.trim(), row.route_id.trim(), occupancy);
        bus.driver = parse_driver(row.driver_id, row.driver_name, row.driver_phone);
        fleet.push(bus);
    }

    Ok(fleet)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A driver needs at least an id; name and phone default to empty.
fn parse_driver(
    id:    Option<String>,
    name:  Option<String>,
    phone: Option<String>,
) -> Option<Driver> {
    let id = id.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())?;
    Some(Driver {
        id:    DriverId::from(id),
        name:  name.unwrap_or_default().trim().to_owned(),
        phone: phone.unwrap_or_default().trim().to_owned(),
    })
}
