//! Unit tests for bs-fleet.

use bs_core::{Occupancy, RandomSource, RouteId, SimRng, StopId};
use bs_network::{Route, RouteNetwork, Stop};

use crate::{Bus, Direction, MotionEngine};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Replays a fixed list of draws, cycling when exhausted.
struct Scripted {
    values: Vec<f64>,
    next:   usize,
}

impl Scripted {
    fn new(values: &[f64]) -> Self {
        Self { values: values.to_vec(), next: 0 }
    }

    /// A source that never triggers occupancy drift.
    fn calm() -> Self {
        Self::new(&[0.5])
    }
}

impl RandomSource for Scripted {
    fn next_f64(&mut self) -> f64 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}

/// Route "R": A(0, 0) → B(0, 1).  Path length 21.
fn ab_network() -> RouteNetwork {
    RouteNetwork::from_routes(vec![Route::new("R", "A-B", "#000", vec![
        Stop::new("A", "Alpha", 0.0, 0.0),
        Stop::new("B", "Beta",  0.0, 1.0),
    ])])
    .unwrap()
}

/// Route "R001": three Delhi stops.  Path length 42.
fn airport_network() -> RouteNetwork {
    RouteNetwork::from_routes(vec![Route::new("R001", "City Center - Airport", "#FF6B35", vec![
        Stop::new("S001", "City Center Bus Station", 28.6139, 77.2090),
        Stop::new("S002", "Connaught Place",         28.6289, 77.2065),
        Stop::new("S003", "Rajiv Gandhi Terminal",   28.5665, 77.1031),
    ])])
    .unwrap()
}

fn tick_n(engine: &MotionEngine, buses: &mut [Bus], net: &RouteNetwork, n: usize) {
    let mut rng = Scripted::calm();
    for _ in 0..n {
        engine.tick(buses, net, &mut rng);
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod motion {
    use super::*;
    use crate::motion::{drift_occupancy, heading_at, next_stop_index, reflect};

    #[test]
    fn first_tick_moves_half_a_unit_towards_b() {
        let net = ab_network();
        let mut buses = vec![Bus::new("B1", "R", Occupancy::Low)];
        tick_n(&MotionEngine::new(1.0), &mut buses, &net, 1);

        let bus = &buses[0];
        assert_eq!(bus.progress, 0.5);
        assert_eq!(bus.direction, Direction::Forward);
        assert!(bus.pos.lng > 0.0 && bus.pos.lng < 1.0, "lng {}", bus.pos.lng);
        assert!(bus.pos.lat.abs() < 0.001);
        assert_eq!(bus.next_stop.as_deref(), Some("Beta"));
    }

    #[test]
    fn reaching_the_end_reverses_direction() {
        let net = ab_network();
        let engine = MotionEngine::new(1.0);
        let mut buses = vec![Bus::new("B1", "R", Occupancy::Low)];

        tick_n(&engine, &mut buses, &net, 39);
        assert_eq!(buses[0].progress, 19.5);
        assert_eq!(buses[0].direction, Direction::Forward);

        tick_n(&engine, &mut buses, &net, 1);
        assert_eq!(buses[0].progress, 20.0);
        assert_eq!(buses[0].direction, Direction::Backward);

        tick_n(&engine, &mut buses, &net, 1);
        assert_eq!(buses[0].progress, 19.5);
        assert_eq!(buses[0].direction, Direction::Backward);
    }

    #[test]
    fn reaching_the_start_turns_forward_again() {
        let net = ab_network();
        let engine = MotionEngine::new(1.0);
        let mut buses = vec![Bus::new("B1", "R", Occupancy::Low).at(20.0, Direction::Backward)];
        tick_n(&engine, &mut buses, &net, 40);
        assert_eq!(buses[0].progress, 0.0);
        assert_eq!(buses[0].direction, Direction::Forward);
        tick_n(&engine, &mut buses, &net, 1);
        assert_eq!(buses[0].progress, 0.5);
    }

    #[test]
    fn progress_never_leaves_the_path() {
        let net = airport_network();
        let last = 41.0;
        for speed in [0.1, 0.7, 1.0, 3.3, 5.0] {
            let engine = MotionEngine::new(speed);
            let mut buses = vec![Bus::new("X", "R001", Occupancy::Low)];
            let mut rng = SimRng::new(7);
            let mut prev_dir = buses[0].direction;
            for _ in 0..2_000 {
                engine.tick(&mut buses, &net, &mut rng);
                let b = &buses[0];
                assert!((0.0..=last).contains(&b.progress), "speed {speed}: {}", b.progress);
                if b.direction != prev_dir {
                    assert!(b.progress == 0.0 || b.progress == last, "flip away from boundary at {}", b.progress);
                }
                prev_dir = b.direction;
            }
        }
    }

    #[test]
    fn speed_is_clamped() {
        assert_eq!(MotionEngine::new(0.0).speed_multiplier(), 0.1);
        assert_eq!(MotionEngine::new(12.0).speed_multiplier(), 5.0);
        assert_eq!(MotionEngine::new(f64::NAN).speed_multiplier(), 1.0);
        assert_eq!(MotionEngine::new(2.0).step(), 1.0);
    }

    #[test]
    fn reflect_rules() {
        assert_eq!(reflect(20.3, Direction::Forward, 21), (20.0, Direction::Backward));
        assert_eq!(reflect(-0.2, Direction::Backward, 21), (0.0, Direction::Forward));
        assert_eq!(reflect(7.0, Direction::Backward, 21), (7.0, Direction::Backward));
    }

    #[test]
    fn heading_east_then_west() {
        let net = ab_network();
        let path = net.path(&RouteId::from("R")).unwrap();
        let fwd = heading_at(path, 0.5, Direction::Forward).unwrap();
        let back = heading_at(path, 0.5, Direction::Backward).unwrap();
        assert!((fwd - 90.0).abs() < 0.5, "forward heading {fwd}");
        assert!((back - 270.0).abs() < 0.5, "backward heading {back}");
        assert!((0.0..360.0).contains(&fwd) && (0.0..360.0).contains(&back));
    }

    #[test]
    fn heading_unchanged_at_last_vertex() {
        let net = ab_network();
        let path = net.path(&RouteId::from("R")).unwrap();
        assert!(heading_at(path, 20.0, Direction::Backward).is_none());

        let mut buses = vec![Bus::new("B1", "R", Occupancy::Low).at(19.5, Direction::Forward)];
        buses[0].heading = 123.0;
        tick_n(&MotionEngine::new(1.0), &mut buses, &net, 1);
        assert_eq!(buses[0].progress, 20.0);
        assert_eq!(buses[0].heading, 123.0);
    }

    #[test]
    fn next_stop_wraps_both_ways() {
        assert_eq!(next_stop_index(0, 3, Direction::Forward), 1);
        assert_eq!(next_stop_index(2, 3, Direction::Forward), 0);
        assert_eq!(next_stop_index(2, 3, Direction::Backward), 1);
        assert_eq!(next_stop_index(0, 3, Direction::Backward), 2);
    }

    #[test]
    fn backward_bus_at_first_stop_targets_last_stop() {
        let net = airport_network();
        // Progress 1.0 backward → 0.5; vertex 0 belongs to S001.
        let mut buses = vec![Bus::new("X", "R001", Occupancy::Low).at(1.0, Direction::Backward)];
        tick_n(&MotionEngine::new(1.0), &mut buses, &net, 1);
        assert_eq!(buses[0].progress, 0.5);
        assert_eq!(buses[0].next_stop.as_deref(), Some("Rajiv Gandhi Terminal"));
    }

    #[test]
    fn occupancy_drift_slices() {
        assert_eq!(drift_occupancy(Occupancy::Low, 0.0), Occupancy::Medium);
        assert_eq!(drift_occupancy(Occupancy::High, 0.019), Occupancy::Low);
        assert_eq!(drift_occupancy(Occupancy::Medium, 0.02), Occupancy::Low);
        assert_eq!(drift_occupancy(Occupancy::Low, 0.039), Occupancy::High);
        assert_eq!(drift_occupancy(Occupancy::Low, 0.04), Occupancy::Low);
        assert_eq!(drift_occupancy(Occupancy::High, 0.99), Occupancy::High);
    }

    #[test]
    fn one_draw_per_bus_per_tick() {
        let net = ab_network();
        let mut buses = vec![
            Bus::new("B1", "R", Occupancy::Low),
            Bus::new("B2", "R", Occupancy::Low),
            Bus::new("B3", "R", Occupancy::Low),
        ];
        // B1 up, B2 down, B3 unchanged.
        let mut rng = Scripted::new(&[0.01, 0.03, 0.5]);
        MotionEngine::new(1.0).tick(&mut buses, &net, &mut rng);
        assert_eq!(rng.next, 3);
        assert_eq!(buses[0].occupancy, Occupancy::Medium);
        assert_eq!(buses[1].occupancy, Occupancy::High);
        assert_eq!(buses[2].occupancy, Occupancy::Low);
    }

    #[test]
    fn bus_on_unknown_route_is_skipped() {
        let net = ab_network();
        let ghost = Bus::new("G", "NOPE", Occupancy::High).at(3.0, Direction::Forward);
        let mut buses = vec![ghost.clone(), Bus::new("B1", "R", Occupancy::Low)];
        let mut rng = Scripted::new(&[0.0]);

        let report = MotionEngine::new(1.0).tick(&mut buses, &net, &mut rng);
        assert_eq!(report.advanced, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(buses[0], ghost, "skipped bus must be untouched");
        assert_eq!(rng.next, 1, "skipped bus must not consume a draw");
    }

    #[test]
    fn bus_on_empty_route_is_skipped() {
        let net = RouteNetwork::from_routes(vec![
            Route::new("STUB", "stub", "#fff", vec![Stop::new("Z", "Zed", 1.0, 1.0)]),
        ])
        .unwrap();
        let mut buses = vec![Bus::new("S", "STUB", Occupancy::Low)];
        let report = MotionEngine::new(1.0).tick(&mut buses, &net, &mut Scripted::calm());
        assert_eq!(report.skipped, 1);
        assert_eq!(buses[0].progress, 0.0);
    }

    #[test]
    fn distribute_spreads_buses_evenly() {
        let net = airport_network();
        let mut buses = vec![
            Bus::new("X1", "R001", Occupancy::Low),
            Bus::new("OTHER", "NOPE", Occupancy::Low).at(9.0, Direction::Backward),
            Bus::new("X2", "R001", Occupancy::Low),
            Bus::new("X3", "R001", Occupancy::Low),
        ];
        MotionEngine::distribute(&mut buses, &net);
        assert_eq!(buses[0].progress, 0.0);
        assert_eq!(buses[2].progress, 14.0);
        assert_eq!(buses[3].progress, 28.0);
        assert_eq!(buses[1].progress, 9.0);
        assert_eq!(buses[1].direction, Direction::Backward);
        let path = net.path(&RouteId::from("R001")).unwrap();
        assert_eq!(buses[2].pos, path[14].pos);
    }

    #[test]
    fn distribute_caps_at_last_vertex() {
        let net = ab_network();
        let mut buses: Vec<Bus> = (0..30)
            .map(|i| Bus::new(format!("B{i}"), "R", Occupancy::Low))
            .collect();
        MotionEngine::distribute(&mut buses, &net);
        assert!(buses.iter().all(|b| (0.0..=20.0).contains(&b.progress)));
        assert_eq!(buses[29].progress, 20.0);
    }
}

// ── Arrivals ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrivals {
    use super::*;
    use crate::ArrivalEstimator;

    fn estimator() -> ArrivalEstimator {
        ArrivalEstimator::new(2_000)
    }

    #[test]
    fn five_units_away_rounds_to_zero_and_is_dropped() {
        let net = ab_network();
        // First vertex of B is index 10.
        let buses = vec![Bus::new("B1", "R", Occupancy::Low).at(5.0, Direction::Forward)];
        let eta = estimator().raw_eta(&buses[0], &StopId::from("B"), &net).unwrap();
        assert!((eta - 5.0 / 15.0).abs() < 1e-12);
        assert!(estimator().arrivals_for(&StopId::from("B"), &buses, &net).is_empty());
    }

    #[test]
    fn ten_units_away_is_one_minute() {
        let net = ab_network();
        let buses = vec![Bus::new("B1", "R", Occupancy::Medium)];
        let arrivals = estimator().arrivals_for(&StopId::from("B"), &buses, &net);
        assert_eq!(arrivals.len(), 1);
        assert_eq!(arrivals[0].eta_minutes, 1);
        assert_eq!(arrivals[0].bus_id, "B1");
        assert_eq!(arrivals[0].route_id, "R");
        assert_eq!(arrivals[0].occupancy, Occupancy::Medium);
    }

    #[test]
    fn eta_strictly_decreases_while_approaching() {
        let net = airport_network();
        let target = StopId::from("S003"); // first vertex 31
        let engine = MotionEngine::new(1.0);
        let mut buses = vec![Bus::new("X", "R001", Occupancy::Low)];

        let mut prev = estimator().raw_eta(&buses[0], &target, &net).unwrap();
        while buses[0].progress < 30.5 {
            tick_n(&engine, &mut buses, &net, 1);
            let eta = estimator().raw_eta(&buses[0], &target, &net).unwrap();
            assert!(eta < prev, "eta {eta} did not drop below {prev}");
            assert!(eta > 0.0);
            prev = eta;
        }
        assert!(prev < 0.1, "just before the stop the eta is small, got {prev}");
    }

    #[test]
    fn target_behind_wraps_by_path_length_regardless_of_direction() {
        let net = airport_network();
        let target = StopId::from("S002"); // first vertex 10
        let fwd = Bus::new("F", "R001", Occupancy::Low).at(35.0, Direction::Forward);
        let back = Bus::new("B", "R001", Occupancy::Low).at(35.0, Direction::Backward);

        let e = estimator();
        let expected = (10.0 - 35.0 + 42.0) / 15.0;
        assert!((e.raw_eta(&fwd, &target, &net).unwrap() - expected).abs() < 1e-12);
        assert!((e.raw_eta(&back, &target, &net).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn at_most_three_sorted_ascending() {
        let net = airport_network();
        let buses: Vec<Bus> = [30.0, 0.0, 20.0, 10.0, 25.0, 4.0]
            .iter()
            .enumerate()
            .map(|(i, &p)| Bus::new(format!("X{i}"), "R001", Occupancy::Low).at(p, Direction::Forward))
            .collect();
        // Target S003 at vertex 31: distances 1, 31, 11, 21, 6, 27 → minutes 0, 2, 1, 1, 0, 2.
        let arrivals = estimator().arrivals_for(&StopId::from("S003"), &buses, &net);
        let got: Vec<(&str, u32)> = arrivals.iter().map(|a| (a.bus_id.as_str(), a.eta_minutes)).collect();
        assert_eq!(got, [("X2", 1), ("X3", 1), ("X1", 2)]);
    }

    #[test]
    fn sixty_minutes_or_more_is_dropped() {
        let net = airport_network();
        let buses = vec![Bus::new("X", "R001", Occupancy::Low)];
        // 10-minute period: 0.1 ticks/min → 31 units take 620 minutes.
        let slow = ArrivalEstimator::new(600_000);
        assert!(slow.arrivals_for(&StopId::from("S003"), &buses, &net).is_empty());
    }

    #[test]
    fn bus_at_the_stop_is_not_arriving() {
        let net = ab_network();
        let buses = vec![Bus::new("B1", "R", Occupancy::Low).at(10.0, Direction::Forward)];
        assert!(estimator().arrivals_for(&StopId::from("B"), &buses, &net).is_empty());
    }

    #[test]
    fn unknown_stop_is_empty_not_error() {
        let net = airport_network();
        let buses = vec![Bus::new("X", "R001", Occupancy::Low)];
        assert!(estimator().arrivals_for(&StopId::from("S999"), &buses, &net).is_empty());
    }

    #[test]
    fn buses_on_other_routes_ignored() {
        let net = airport_network();
        let buses = vec![Bus::new("X", "R002", Occupancy::Low)];
        assert!(estimator().raw_eta(&buses[0], &StopId::from("S003"), &net).is_none());
    }
}

// ── Telemetry ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod telemetry {
    use super::*;
    use crate::{DoorStatus, TelemetrySnapshot};

    #[test]
    fn values_in_documented_ranges() {
        let bus = Bus::new("B1", "R", Occupancy::High);
        let mut rng = SimRng::new(99);
        for i in 0..500 {
            let t = TelemetrySnapshot::sample(&bus, i, &mut rng);
            assert!((25.0..40.0).contains(&t.speed_kmh));
            assert!((65.0..95.0).contains(&t.fuel_pct));
            assert!((85.0..95.0).contains(&t.engine_temp_c));
            assert_eq!(t.timestamp_ms, i);
        }
    }

    #[test]
    fn copies_bus_state() {
        let mut bus = Bus::new("B1", "R", Occupancy::Medium);
        bus.heading = 45.0;
        bus.next_stop = Some("Beta".into());
        let t = TelemetrySnapshot::sample(&bus, 1_700_000_000_000, &mut Scripted::calm());
        assert_eq!(t.bus_id, "B1");
        assert_eq!(t.route_id, "R");
        assert_eq!(t.heading, 45.0);
        assert_eq!(t.occupancy, Occupancy::Medium);
        assert_eq!(t.next_stop.as_deref(), Some("Beta"));
    }

    #[test]
    fn door_open_on_low_draw() {
        let bus = Bus::new("B1", "R", Occupancy::Low);
        // speed, fuel, temp, door
        let open = TelemetrySnapshot::sample(&bus, 0, &mut Scripted::new(&[0.0, 0.0, 0.0, 0.05]));
        assert_eq!(open.door, DoorStatus::Open);
        assert_eq!(open.speed_kmh, 25.0);
        let closed = TelemetrySnapshot::sample(&bus, 0, &mut Scripted::new(&[0.5, 0.5, 0.5, 0.1]));
        assert_eq!(closed.door, DoorStatus::Closed);
        assert_eq!(closed.engine_temp_c, 90.0);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use super::*;
    use crate::{FleetError, load_fleet_reader};

    #[test]
    fn loads_buses_and_optional_drivers() {
        let csv = "\
bus_id,route_id,occupancy,driver_id,driver_name,driver_phone\n\
DL1PC1234,R001,Medium,D001,Rajesh Kumar,+91-9876543210\n\
DL1PC5678,R002,high,,,\n\
";
        let fleet = load_fleet_reader(Cursor::new(csv)).unwrap();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0].id, "DL1PC1234");
        assert_eq!(fleet[0].occupancy, Occupancy::Medium);
        let driver = fleet[0].driver.as_ref().unwrap();
        assert_eq!(driver.name, "Rajesh Kumar");
        assert_eq!(driver.phone, "+91-9876543210");
        assert_eq!(fleet[1].route_id, "R002");
        assert_eq!(fleet[1].occupancy, Occupancy::High);
        assert!(fleet[1].driver.is_none());
    }

    #[test]
    fn bad_occupancy_is_an_error() {
        let csv = "bus_id,route_id,occupancy,driver_id,driver_name,driver_phone\nX,R,packed,,,\n";
        let err = load_fleet_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, FleetError::Core(_)));
    }
}
