//! Spherical-earth geodesy: great-circle distance, bearing and bounds
//!
//! All functions use a sphere with the mean Earth radius. Over the few
//! kilometers an AR overlay cares about, the error against the WGS84
//! ellipsoid is far below what a compass or GPS fix can resolve.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Bearing: degrees clockwise from true north (0 to 360)
//! - Distance: meters

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, Result};
use crate::math::normalize_degrees;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_009.0;

/// Geographic position in degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Construct without validation
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct, rejecting non-finite or out-of-range values
    ///
    /// # Example
    /// ```
    /// use geo_overlay::GeoCoordinate;
    ///
    /// assert!(GeoCoordinate::try_new(56.11, -3.15).is_ok());
    /// assert!(GeoCoordinate::try_new(91.0, 0.0).is_err());
    /// assert!(GeoCoordinate::try_new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if valid {
            Ok(Self::new(latitude, longitude))
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance to `other` in meters
    pub fn distance_to(&self, other: &GeoCoordinate) -> f64 {
        great_circle_distance(self, other)
    }

    /// Initial bearing towards `other` in degrees
    pub fn bearing_to(&self, other: &GeoCoordinate) -> f64 {
        initial_bearing(self, other)
    }

    /// Point reached travelling `distance_m` along the great circle that
    /// leaves this point at `bearing_deg`
    pub fn destination(&self, bearing_deg: f64, distance_m: f64) -> GeoCoordinate {
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();
        let bearing = bearing_deg.to_radians();
        let angular = distance_m / EARTH_RADIUS_M;

        let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * lat2.sin());

        let mut longitude = lon2.to_degrees();
        if longitude > 180.0 {
            longitude -= 360.0;
        } else if longitude < -180.0 {
            longitude += 360.0;
        }
        GeoCoordinate::new(lat2.to_degrees(), longitude)
    }
}

impl From<(f64, f64)> for GeoCoordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Haversine distance between two points, in meters.
///
/// Symmetric, never negative, and exactly zero for identical points.
///
/// NaN when either coordinate is not finite.
///
/// # Example
/// ```
/// use geo_overlay::{GeoCoordinate, great_circle_distance};
///
/// let here = GeoCoordinate::new(56.111773, -3.154543);
/// let north = GeoCoordinate::new(56.156773, -3.154543);
/// let d = great_circle_distance(&here, &north);
/// assert!((d - 5003.8).abs() < 1.0);
/// ```
pub fn great_circle_distance(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let half_dlat = (lat2 - lat1) / 2.0;
    let half_dlon = (b.longitude - a.longitude).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat1.cos() * lat2.cos() * half_dlon.sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Initial compass bearing from `a` towards `b` along the great circle,
/// in degrees `[0, 360)`.
///
/// Returns `0.0` when the points coincide and NaN when either coordinate is
/// not finite.
pub fn initial_bearing(a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
    if !(a.is_finite() && b.is_finite()) {
        return f64::NAN;
    }
    if a == b {
        return 0.0;
    }
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Latitude/longitude box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoCoordinate,
    pub north_east: GeoCoordinate,
}

impl GeoBounds {
    /// Box centred on `center` that contains every point in `points`.
    ///
    /// The half-extents are the largest absolute latitude and longitude
    /// differences between `center` and any point, so the observer stays in
    /// the middle of a map framed with these bounds. Returns `None` when
    /// `points` is empty.
    pub fn centered_on<'a, I>(center: &GeoCoordinate, points: I) -> Option<GeoBounds>
    where
        I: IntoIterator<Item = &'a GeoCoordinate>,
    {
        let mut points = points.into_iter().peekable();
        points.peek()?;

        let (max_dlat, max_dlon) = points.fold((0.0f64, 0.0f64), |(dlat, dlon), p| {
            (
                dlat.max((p.latitude - center.latitude).abs()),
                dlon.max((p.longitude - center.longitude).abs()),
            )
        });

        Some(GeoBounds {
            south_west: GeoCoordinate::new(center.latitude - max_dlat, center.longitude - max_dlon),
            north_east: GeoCoordinate::new(center.latitude + max_dlat, center.longitude + max_dlon),
        })
    }

    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }

    pub fn contains(&self, point: &GeoCoordinate) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::azimuth::Azimuth;
    use approx::assert_relative_eq;

    const OBSERVER: GeoCoordinate = GeoCoordinate::new(56.111773, -3.154543);

    #[test]
    fn test_distance_to_self_is_zero() {
        for p in [
            OBSERVER,
            GeoCoordinate::new(0.0, 0.0),
            GeoCoordinate::new(-89.9, 179.9),
            GeoCoordinate::new(90.0, 0.0),
        ] {
            assert_eq!(great_circle_distance(&p, &p), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let others = [
            GeoCoordinate::new(56.156773, -3.154543),
            GeoCoordinate::new(55.9661769, -3.1758515),
            GeoCoordinate::new(-33.86, 151.21),
            GeoCoordinate::new(0.0, 179.999),
        ];
        for other in others {
            let ab = great_circle_distance(&OBSERVER, &other);
            let ba = great_circle_distance(&other, &OBSERVER);
            assert_relative_eq!(ab, ba, max_relative = 1e-15);
            assert!(ab > 0.0);
        }
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = GeoCoordinate::new(0.0, 0.0);
        let b = GeoCoordinate::new(1.0, 0.0);
        // 2πR / 360
        assert_relative_eq!(great_circle_distance(&a, &b), 111_195.08, epsilon = 0.1);
    }

    #[test]
    fn test_antipodal_distance_is_half_circumference() {
        let a = GeoCoordinate::new(0.0, 0.0);
        let b = GeoCoordinate::new(0.0, 180.0);
        assert_relative_eq!(
            great_circle_distance(&a, &b),
            core::f64::consts::PI * EARTH_RADIUS_M,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_cardinal_bearings() {
        let north = GeoCoordinate::new(OBSERVER.latitude + 0.045, OBSERVER.longitude);
        let south = GeoCoordinate::new(OBSERVER.latitude - 0.045, OBSERVER.longitude);
        let east = GeoCoordinate::new(OBSERVER.latitude, OBSERVER.longitude + 0.055);
        let west = GeoCoordinate::new(OBSERVER.latitude, OBSERVER.longitude - 0.055);

        assert_relative_eq!(initial_bearing(&OBSERVER, &north), 0.0, epsilon = 1e-9);
        assert_relative_eq!(initial_bearing(&OBSERVER, &south), 180.0, epsilon = 1e-9);
        // Along a parallel the great circle starts slightly poleward
        assert_relative_eq!(initial_bearing(&OBSERVER, &east), 90.0, epsilon = 0.05);
        assert_relative_eq!(initial_bearing(&OBSERVER, &west), 270.0, epsilon = 0.05);
    }

    #[test]
    fn test_bearing_to_self_is_zero() {
        assert_eq!(initial_bearing(&OBSERVER, &OBSERVER), 0.0);
    }

    #[test]
    fn test_bearing_in_range() {
        let target = GeoCoordinate::new(56.0, -3.2);
        let b = initial_bearing(&OBSERVER, &target);
        assert!((0.0..360.0).contains(&b));
        assert!(b > 180.0 && b < 270.0, "south-west target, got {}", b);
    }

    #[test]
    fn test_destination_round_trip() {
        for bearing in [0.0, 45.0, 135.0, 200.0, 315.0] {
            let target = OBSERVER.destination(bearing, 2_500.0);
            assert_relative_eq!(OBSERVER.distance_to(&target), 2_500.0, epsilon = 1e-6);
            // 0° may come back as 359.999..., compare on the circle
            let error = Azimuth::from_degrees(bearing)
                .delta_to(Azimuth::from_degrees(OBSERVER.bearing_to(&target)))
                .abs();
            assert!(error < 1e-7, "bearing {} off by {} rad", bearing, error);
        }
    }

    #[test]
    fn test_non_finite_input_is_nan() {
        let bad = GeoCoordinate::new(f64::NAN, 0.0);
        assert!(initial_bearing(&OBSERVER, &bad).is_nan());
        assert!(initial_bearing(&bad, &OBSERVER).is_nan());
        assert!(great_circle_distance(&OBSERVER, &bad).is_nan());

        let far = GeoCoordinate::new(0.0, f64::INFINITY);
        assert!(initial_bearing(&OBSERVER, &far).is_nan());
    }

    #[test]
    fn test_try_new_bounds() {
        assert!(GeoCoordinate::try_new(-90.0, 180.0).is_ok());
        assert!(GeoCoordinate::try_new(0.0, -180.5).is_err());
        assert!(matches!(
            GeoCoordinate::try_new(0.0, f64::INFINITY),
            Err(GeoError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_bounds_centered_on_observer() {
        let points = [
            GeoCoordinate::new(56.2, -3.1),
            GeoCoordinate::new(56.05, -3.3),
        ];
        let bounds = GeoBounds::centered_on(&OBSERVER, points.iter()).unwrap();

        let center = bounds.center();
        assert_relative_eq!(center.latitude, OBSERVER.latitude, epsilon = 1e-12);
        assert_relative_eq!(center.longitude, OBSERVER.longitude, epsilon = 1e-12);
        assert!(bounds.contains(&OBSERVER));
        assert!(bounds.contains(&GeoCoordinate::new(56.19, -3.29)));
        assert!(!bounds.contains(&GeoCoordinate::new(56.3, -3.15)));
        assert_relative_eq!(
            bounds.north_east.latitude - OBSERVER.latitude,
            0.2 - 0.111773,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_bounds_empty() {
        let none: [GeoCoordinate; 0] = [];
        assert!(GeoBounds::centered_on(&OBSERVER, none.iter()).is_none());
    }
}
