//! Geodesic-to-AR-space projection
//!
//! Turns an (observer, target, reference azimuth) triple into the position
//! of a marker in a bounded scene around the observer. The horizontal
//! direction of the marker is the target's bearing relative to the way the
//! observer faced when the reference azimuth was captured; its distance from
//! the origin is a compressed function of the real distance so that both a
//! cafe across the street and a hill on the horizon fit in the view.

use core::fmt;

use nalgebra::Vector3;

use crate::azimuth::Azimuth;
use crate::error::Result;
use crate::geodesy::{GeoCoordinate, great_circle_distance, initial_bearing};
use crate::math::normalize_radians;
use crate::target::Target;
use crate::types::ProjectorSettings;

/// Radius used for every target within [`NEAR_DISTANCE_M`]
pub const NEAR_RADIUS: f64 = 4.0;
/// Radius reached at [`MID_DISTANCE_M`]
pub const MID_RADIUS: f64 = 6.0;
/// Radius used for every target at or beyond [`FAR_DISTANCE_M`]
pub const FAR_RADIUS: f64 = 10.0;

pub const NEAR_DISTANCE_M: f64 = 100.0;
pub const MID_DISTANCE_M: f64 = 500.0;
pub const FAR_DISTANCE_M: f64 = 4_500.0;

/// Meters per scene unit between the near and mid breakpoints
const NEAR_SLOPE_M: f64 = 200.0;
/// Meters per scene unit between the mid and far breakpoints
const MID_SLOPE_M: f64 = 1_000.0;

/// Map a real distance in meters to a radius in scene units.
///
/// | distance (m)        | radius                     |
/// |---------------------|----------------------------|
/// | d ≤ 100             | 4.0                        |
/// | 100 < d ≤ 500       | 4.0 + (d − 100) / 200      |
/// | 500 < d < 4500      | 6.0 + (d − 500) / 1000     |
/// | d ≥ 4500            | 10.0                       |
///
/// Continuous and non-decreasing. Negative or NaN distances are treated as
/// zero.
///
/// # Example
/// ```
/// use geo_overlay::radial_scale;
///
/// assert_eq!(radial_scale(50.0), 4.0);
/// assert_eq!(radial_scale(300.0), 5.0);
/// assert_eq!(radial_scale(2_500.0), 8.0);
/// assert_eq!(radial_scale(20_000.0), 10.0);
/// ```
pub fn radial_scale(distance_m: f64) -> f64 {
    if distance_m.is_nan() || distance_m <= NEAR_DISTANCE_M {
        NEAR_RADIUS
    } else if distance_m <= MID_DISTANCE_M {
        NEAR_RADIUS + (distance_m - NEAR_DISTANCE_M) / NEAR_SLOPE_M
    } else if distance_m < FAR_DISTANCE_M {
        MID_RADIUS + (distance_m - MID_DISTANCE_M) / MID_SLOPE_M
    } else {
        FAR_RADIUS
    }
}

/// Position of a marker in the scene.
///
/// X points right and negative Z points ahead of the observer's facing
/// direction at placement time; Y is height above the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacementVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PlacementVector {
    pub const ORIGIN: PlacementVector = PlacementVector {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance from the origin in the horizontal plane
    pub fn horizontal_radius(&self) -> f32 {
        self.x.hypot(self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<PlacementVector> for Vector3<f32> {
    fn from(p: PlacementVector) -> Self {
        p.to_vector()
    }
}

impl fmt::Display for PlacementVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// Intermediate quantities of a projection, useful for labels and filters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBearing {
    /// Great-circle distance in meters
    pub distance_m: f64,
    /// Initial compass bearing to the target, degrees `[0, 360)`
    pub heading_deg: f64,
    /// Bearing relative to the reference azimuth, radians `[0, 2π)`
    pub relative_rad: f64,
    /// Scene radius from [`radial_scale`]
    pub radius: f64,
}

impl TargetBearing {
    /// Every field NaN, reported for non-finite coordinates
    pub const UNDEFINED: TargetBearing = TargetBearing {
        distance_m: f64::NAN,
        heading_deg: f64::NAN,
        relative_rad: f64::NAN,
        radius: f64::NAN,
    };

    pub fn is_finite(&self) -> bool {
        self.distance_m.is_finite()
            && self.heading_deg.is_finite()
            && self.relative_rad.is_finite()
            && self.radius.is_finite()
    }
}

/// Projects targets into the scene around an observer
///
/// # Example
/// ```
/// use geo_overlay::{Azimuth, BearingProjector, GeoCoordinate};
///
/// let projector = BearingProjector::new();
/// let observer = GeoCoordinate::new(56.111773, -3.154543);
/// let north = GeoCoordinate::new(56.156773, -3.154543); // ~5 km
///
/// let p = projector.project(&observer, &north, Azimuth::ZERO);
/// assert!(p.x.abs() < 0.01);
/// assert!((p.z + 10.0).abs() < 0.01);
/// assert_eq!(p.y, 0.1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BearingProjector {
    settings: ProjectorSettings,
}

impl BearingProjector {
    pub fn new() -> Self {
        Self::with_settings(ProjectorSettings::default())
    }

    pub fn with_settings(settings: ProjectorSettings) -> Self {
        Self { settings }
    }

    /// Like [`BearingProjector::with_settings`], validating the settings first
    pub fn try_with_settings(settings: ProjectorSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::with_settings(settings))
    }

    pub fn settings(&self) -> &ProjectorSettings {
        &self.settings
    }

    /// Great-circle distance in meters
    pub fn great_circle_distance(&self, a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
        great_circle_distance(a, b)
    }

    /// Initial bearing in degrees `[0, 360)`, `0.0` when `a == b`, NaN for non-finite input
    pub fn initial_bearing(&self, a: &GeoCoordinate, b: &GeoCoordinate) -> f64 {
        initial_bearing(a, b)
    }

    /// Distance, bearing and scene radius of `target` seen from `observer`.
    ///
    /// [`TargetBearing::UNDEFINED`] when either coordinate is not finite.
    pub fn bearing_to(
        &self,
        observer: &GeoCoordinate,
        target: &GeoCoordinate,
        reference: Azimuth,
    ) -> TargetBearing {
        if !(observer.is_finite() && target.is_finite()) {
            return TargetBearing::UNDEFINED;
        }
        let heading_deg = initial_bearing(observer, target);
        let distance_m = great_circle_distance(observer, target);
        // The negated reference turns the scene with the device's real
        // facing direction
        let relative_rad = normalize_radians(-reference.radians() + heading_deg.to_radians());

        TargetBearing {
            distance_m,
            heading_deg,
            relative_rad,
            radius: radial_scale(distance_m),
        }
    }

    /// Place `target` relative to `observer` facing `reference`.
    ///
    /// Never returns a non-finite vector: a non-finite coordinate or any
    /// NaN or infinite component collapses the result to
    /// [`PlacementVector::ORIGIN`].
    pub fn project(
        &self,
        observer: &GeoCoordinate,
        target: &GeoCoordinate,
        reference: Azimuth,
    ) -> PlacementVector {
        if !(observer.is_finite() && target.is_finite()) {
            log::debug!(
                "non-finite coordinate from {:?} to {:?}, using origin",
                observer,
                target
            );
            return PlacementVector::ORIGIN;
        }
        self.place_bearing(&self.bearing_to(observer, target, reference))
    }

    /// Scene position for an already computed bearing
    pub fn place_bearing(&self, bearing: &TargetBearing) -> PlacementVector {
        if !bearing.is_finite() {
            return PlacementVector::ORIGIN;
        }
        let (sin, cos) = bearing.relative_rad.sin_cos();
        let placement = PlacementVector::new(
            (bearing.radius * sin) as f32,
            self.settings.elevation,
            (-bearing.radius * cos) as f32,
        );

        if placement.is_finite() {
            placement
        } else {
            log::debug!("non-finite placement for {:?}, using origin", bearing);
            PlacementVector::ORIGIN
        }
    }

    /// True when `target` is the observer's own reference marker
    pub fn is_home(&self, target: &Target) -> bool {
        target.id == self.settings.home_id
    }

    /// Place a [`Target`], pinning the home target to the origin
    pub fn project_target(
        &self,
        observer: &GeoCoordinate,
        target: &Target,
        reference: Azimuth,
    ) -> PlacementVector {
        if self.is_home(target) {
            return PlacementVector::ORIGIN;
        }
        self.project(observer, &target.coordinate, reference)
    }
}
