//! # Geofence
//!
//! Checks whether a visitor is close enough to a facility. This is a separate
//! collaborator: the collection transaction never calls it, the scan flow
//! does so only when location checks are switched on.

use crate::catalog::Facility;
use crate::types::GeoPoint;
use crate::DEFAULT_VALIDATION_RADIUS_M;

/// Mean earth radius (IUGG), meters.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Great-circle distance between two points (haversine), in meters.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// The facility's geofence center, if it has coordinates.
pub fn facility_center(facility: &Facility) -> Option<GeoPoint> {
    Some(GeoPoint {
        latitude: facility.latitude?,
        longitude: facility.longitude?,
    })
}

/// Returns `true` when `current` lies within the facility's radius.
///
/// No current location, or a facility without coordinates, is never inside.
/// The radius defaults to [`DEFAULT_VALIDATION_RADIUS_M`].
pub fn is_within_facility(current: Option<GeoPoint>, facility: &Facility) -> bool {
    is_within_facility_or(current, facility, DEFAULT_VALIDATION_RADIUS_M)
}

/// Same as [`is_within_facility`] with a caller-chosen fallback radius.
pub fn is_within_facility_or(
    current: Option<GeoPoint>,
    facility: &Facility,
    fallback_radius_m: f64,
) -> bool {
    let (Some(current), Some(center)) = (current, facility_center(facility)) else {
        return false;
    };
    let radius = facility.validation_radius.unwrap_or(fallback_radius_m);
    distance_meters(current, center) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_distance_zero() {
        let p = point(35.0, 139.0);
        assert!(distance_meters(p, p).abs() < 1e-6);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        // One degree of latitude is roughly 111.2 km
        let d = distance_meters(point(0.0, 0.0), point(1.0, 0.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {}", d);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = point(35.6812, 139.7671);
        let b = point(34.7025, 135.4959);
        assert!((distance_meters(a, b) - distance_meters(b, a)).abs() < 1e-6);
    }

    #[test]
    fn test_within_facility_radius() {
        let data = sample();
        let north = data.facility("F001").unwrap(); // 35.0, 139.0, radius 500 m

        assert!(is_within_facility(Some(point(35.0, 139.0)), north));
        // ~333 m north
        assert!(is_within_facility(Some(point(35.003, 139.0)), north));
        // ~1.1 km north
        assert!(!is_within_facility(Some(point(35.01, 139.0)), north));
    }

    #[test]
    fn test_within_facility_missing_data() {
        let data = sample();
        let north = data.facility("F001").unwrap();
        let aquarium = data.facility("F002").unwrap(); // no coordinates

        assert!(!is_within_facility(None, north));
        assert!(!is_within_facility(Some(point(35.0, 139.0)), aquarium));
    }

    #[test]
    fn test_fallback_radius() {
        let data = sample();
        let mut north = data.facility("F001").unwrap().clone();
        north.validation_radius = None;

        // ~333 m away: outside the 200 m default, inside a 400 m fallback
        let p = Some(point(35.003, 139.0));
        assert!(!is_within_facility(p, &north));
        assert!(is_within_facility_or(p, &north, 400.0));
    }
}
