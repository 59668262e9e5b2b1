//! CSV route loader.
//!
//! # CSV format
//!
//! One row per stop, in traversal order.  Route-level columns are repeated on
//! every row; the first row of a route supplies its name and colour.
//!
//! ```csv
//! route_id,route_name,color,stop_id,stop_name,lat,lng
//! R001,City Center - Airport,#FF6B35,S001,City Center Bus Station,28.6139,77.2090
//! R001,City Center - Airport,#FF6B35,S002,Connaught Place,28.6289,77.2065
//! R002,Mall Circuit,#4ECDC4,S004,Select City Walk,28.4985,77.0917
//! ```
//!
//! Routes are returned in order of first appearance.  Rows of one route do
//! not need to be contiguous, but their relative order is the stop order.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bs_core::RouteId;

use crate::{NetworkResult, Route, Stop};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RouteStopRecord {
    route_id:   String,
    route_name: String,
    color:      String,
    stop_id:    String,
    stop_name:  String,
    lat:        f64,
    lng:        f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load routes from a CSV file.
pub fn load_routes_csv(path: &Path) -> NetworkResult<Vec<Route>> {
    let file = std::fs::File::open(path)?;
    load_routes_reader(file)
}

/// Like [`load_routes_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for feeds embedded in a
/// binary.
pub fn load_routes_reader<R: Read>(reader: R) -> NetworkResult<Vec<Route>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut routes: Vec<Route> = Vec::new();
    let mut by_id: HashMap<RouteId, usize> = HashMap::new();

    for result in csv_reader.deserialize::<RouteStopRecord>() {
        let row = result?;
        let route_id = RouteId::from(row.route_id.trim());

        let idx = *by_id.entry(route_id.clone()).or_insert_with(|| {
            routes.push(Route::new(route_id, row.route_name.trim(), row.color.trim(), Vec::new()));
            routes.len() - 1
        });

        routes[idx]
            .stops
            .push(Stop::new(row.stop_id.trim(), row.stop_name.trim(), row.lat, row.lng));
    }

    Ok(routes)
}
