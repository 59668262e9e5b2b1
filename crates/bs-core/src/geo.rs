//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Route paths bow their straight
//! legs by a few ten-thousandths of a degree, which is below what `f32` can
//! resolve at city-scale magnitudes (~77°), so single precision is not enough
//! here.

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// The `(0, 0)` sentinel returned for samples on an empty path.
    pub const ZERO: GeoPoint = GeoPoint { lat: 0.0, lng: 0.0 };

    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is
    /// `other`.  `t` is not clamped.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * t,
            lng: self.lng + (other.lng - self.lng) * t,
        }
    }

    /// Planar bearing from `self` to `other` in degrees,
    /// `atan2(Δlng, Δlat)`.  0° is north, 90° east; the raw result lies in
    /// `(-180, 180]` and is not normalised.
    ///
    /// Treats degrees of latitude and longitude as equal lengths, which is
    /// good enough for orienting a map marker.
    #[inline]
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        (other.lng - self.lng).atan2(other.lat - self.lat).to_degrees()
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// Approximate bounding-box check — much cheaper than `distance_m` for
    /// quick rejection before a geofence test.
    #[inline]
    pub fn within_bbox(self, center: GeoPoint, half_deg: f64) -> bool {
        (self.lat - center.lat).abs() <= half_deg
            && (self.lng - center.lng).abs() <= half_deg
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
