// Geographic value objects

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
            && self.lat.is_finite()
            && self.lng.is_finite()
    }

    /// Haversine great-circle distance in meters.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_between_identical_points_is_zero() {
        let p = GeoPoint::new(52.52, 13.405);
        assert!(p.distance_meters(&p) < f64::EPSILON);
    }

    #[test]
    fn distance_matches_known_separation() {
        // ~0.001 deg of latitude is ~111m anywhere on the globe.
        let a = GeoPoint::new(52.520, 13.405);
        let b = GeoPoint::new(52.521, 13.405);
        let d = a.distance_meters(&b);
        assert!((d - 111.0).abs() < 2.0, "got {}", d);
    }

    #[test]
    fn validity_rejects_out_of_range_coordinates() {
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
        assert!(GeoPoint::new(-52.1, 170.9).is_valid());
    }
}
