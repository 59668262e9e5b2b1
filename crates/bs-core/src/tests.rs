//! Unit tests for bs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BusId, RouteId, StopId};

    #[test]
    fn display_is_raw_string() {
        assert_eq!(RouteId::from("R001").to_string(), "R001");
        assert_eq!(BusId::new("DL1PC1234").to_string(), "DL1PC1234");
    }

    #[test]
    fn compares_against_str() {
        let id = StopId::from("S004");
        assert_eq!(id, "S004");
        assert_eq!(id.as_str(), "S004");
    }

    #[test]
    fn default_is_empty() {
        assert!(StopId::default().is_empty());
        assert!(!StopId::from("S1").is_empty());
    }

    #[test]
    fn borrow_allows_str_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(RouteId::from("R002"), 7);
        assert_eq!(map.get("R002"), Some(&7));
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(28.6139, 77.2090);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        let a = GeoPoint::new(28.0, 77.0);
        let b = GeoPoint::new(29.0, 77.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(2.0, 4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), GeoPoint::new(1.0, 2.0));
    }

    #[test]
    fn bearing_cardinal_directions() {
        let o = GeoPoint::ZERO;
        assert!((o.bearing_deg(GeoPoint::new(1.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(0.0, 1.0)) - 90.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(-1.0, 0.0)) - 180.0).abs() < 1e-9);
        assert!((o.bearing_deg(GeoPoint::new(0.0, -1.0)) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn bbox_check() {
        let center = GeoPoint::new(28.6139, 77.2090);
        let nearby = GeoPoint::new(28.62, 77.21);
        let far = GeoPoint::new(28.4668, 77.0818);
        assert!(nearby.within_bbox(center, 0.1));
        assert!(!far.within_bbox(center, 0.1));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimConfig, Tick, TickClock};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = TickClock::new(1_000, 2_000);
        assert_eq!(clock.elapsed_ms(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_ms(), 4_000);
        assert_eq!(clock.current_unix_ms(), 5_000);
        assert_eq!(clock.unix_ms_at(Tick(10)), 21_000);
    }

    #[test]
    fn ticks_per_minute_default_period() {
        let clock = TickClock::new(0, 2_000);
        assert_eq!(clock.ticks_per_minute(), 30.0);
    }

    #[test]
    fn default_config_matches_reference_constants() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.tick_interval_ms, 2_000);
        assert_eq!(cfg.speed_multiplier, 1.0);
        assert_eq!(cfg.path.segments_per_leg, 20);
        assert_eq!(cfg.path.curve_amplitude_deg, 0.0005);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_interval_and_segments() {
        let mut cfg = SimConfig::default();
        cfg.tick_interval_ms = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.path.segments_per_leg = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.speed_multiplier = f64::NAN;
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{RandomSource, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.next_f64(), r2.next_f64());
        }
    }

    #[test]
    fn children_diverge_by_offset() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(1);
        let mut c0 = a.child(0);
        let mut c1 = b.child(1);
        assert_ne!(c0.next_f64(), c1.next_f64());
    }

    #[test]
    fn range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.range_f64(25.0, 40.0);
            assert!((25.0..40.0).contains(&v));
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
    }
}

#[cfg(test)]
mod occupancy {
    use crate::Occupancy;

    #[test]
    fn ring_up_and_down() {
        assert_eq!(Occupancy::Low.step_up(), Occupancy::Medium);
        assert_eq!(Occupancy::High.step_up(), Occupancy::Low);
        assert_eq!(Occupancy::Low.step_down(), Occupancy::High);
        assert_eq!(Occupancy::Medium.step_down(), Occupancy::Low);
        for o in [Occupancy::Low, Occupancy::Medium, Occupancy::High] {
            assert_eq!(o.step_up().step_down(), o);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Medium".parse::<Occupancy>().unwrap(), Occupancy::Medium);
        assert_eq!(" high ".parse::<Occupancy>().unwrap(), Occupancy::High);
        assert!("full".parse::<Occupancy>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Occupancy::Low.to_string(), "Low");
    }
}
