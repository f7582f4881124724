//! Conventions and settings for the heading estimator and the projector

use core::fmt;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::axes::DisplayRotation;
use crate::error::{GeoError, Result};

/// Device axes convention
///
/// Describes how the sensor axes are laid out relative to the device. The
/// accelerometer is assumed to report specific force, so a device at rest
/// reads a vector pointing away from the ground in every convention.
///
/// # Conventions
/// - **ENU**: X=right, Y=forward, Z=up (handheld screen frame)
/// - **NWU**: X=forward, Y=left, Z=up
/// - **NED**: X=forward, Y=right, Z=down
///
/// # Example
/// ```
/// use geo_overlay::{Convention, HeadingEstimator, HeadingSettings};
///
/// let settings = HeadingSettings {
///     convention: Convention::Ned,
///     ..Default::default()
/// };
/// let estimator = HeadingEstimator::with_settings(settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Convention {
    /// Screen frame: the heading follows the top edge of the device
    #[default]
    Enu,
    Nwu,
    Ned,
}

impl Convention {
    /// Index of the device axis whose compass heading is reported
    pub(crate) fn forward_axis(self) -> usize {
        match self {
            Convention::Enu => 1,
            Convention::Nwu | Convention::Ned => 0,
        }
    }
}

/// Raw sensor channel fed into the heading estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorType {
    /// Gravity/accelerometer, in m/s² (any consistent unit works)
    Accelerometer,
    /// Geomagnetic field, in µT or device-native units
    Magnetometer,
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorType::Accelerometer => write!(f, "accelerometer"),
            SensorType::Magnetometer => write!(f, "magnetometer"),
        }
    }
}

/// Hard and soft iron correction for the magnetometer
///
/// Applied as `soft_iron * (raw - hard_iron)` before fusion. The default is
/// the identity correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagneticCalibration {
    /// Row-major 3x3 soft iron matrix
    pub soft_iron: [[f32; 3]; 3],
    /// Hard iron offset subtracted from every reading
    pub hard_iron: [f32; 3],
}

impl Default for MagneticCalibration {
    fn default() -> Self {
        Self {
            soft_iron: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            hard_iron: [0.0; 3],
        }
    }
}

impl MagneticCalibration {
    /// Apply the correction to a raw reading
    pub fn apply(&self, raw: Vector3<f32>) -> Vector3<f32> {
        let [r0, r1, r2] = self.soft_iron;
        let soft_iron = Matrix3::new(
            r0[0], r0[1], r0[2], //
            r1[0], r1[1], r1[2], //
            r2[0], r2[1], r2[2],
        );
        soft_iron * (raw - Vector3::from(self.hard_iron))
    }
}

/// Heading estimator settings
///
/// # Example
/// ```
/// use geo_overlay::{HeadingSettings, DisplayRotation};
///
/// let settings = HeadingSettings {
///     display_rotation: DisplayRotation::Rotation90, // landscape
///     smoothing: 0.2,                                // heavy smoothing
///     ..Default::default()
/// };
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingSettings {
    /// Axes convention of the raw readings
    pub convention: Convention,
    /// Rotation of the displayed content relative to the sensor frame
    pub display_rotation: DisplayRotation,
    /// Readings with a magnitude at or below this are treated as missing
    pub min_magnitude: f32,
    /// Minimum sine of the angle between the magnetic field and the vertical.
    ///
    /// Below this the horizontal field component is too small to define
    /// north and the fusion is rejected.
    pub min_field_angle_sine: f32,
    /// Blend factor in `(0, 1]` for each new solution. `1.0` follows every
    /// solution without smoothing.
    pub smoothing: f32,
    /// Magnetometer correction applied before fusion
    pub calibration: MagneticCalibration,
}

impl Default for HeadingSettings {
    fn default() -> Self {
        Self {
            convention: Convention::default(),
            display_rotation: DisplayRotation::default(),
            min_magnitude: 1e-3,
            min_field_angle_sine: 0.05,
            smoothing: 1.0,
            calibration: MagneticCalibration::default(),
        }
    }
}

impl HeadingSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_magnitude.is_finite() && self.min_magnitude >= 0.0) {
            return Err(GeoError::InvalidSettings(format!(
                "min_magnitude must be a non-negative number, got {}",
                self.min_magnitude
            )));
        }
        if !(0.0..1.0).contains(&self.min_field_angle_sine) {
            return Err(GeoError::InvalidSettings(format!(
                "min_field_angle_sine must be in [0, 1), got {}",
                self.min_field_angle_sine
            )));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(GeoError::InvalidSettings(format!(
                "smoothing must be in (0, 1], got {}",
                self.smoothing
            )));
        }
        let calibration = &self.calibration;
        let finite = calibration.hard_iron.iter().all(|c| c.is_finite())
            && calibration.soft_iron.iter().flatten().all(|c| c.is_finite());
        if !finite {
            return Err(GeoError::InvalidSettings(
                "magnetic calibration contains a non-finite value".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bearing projector settings
///
/// # Example
/// ```
/// use geo_overlay::ProjectorSettings;
///
/// let settings = ProjectorSettings {
///     home_id: "base-camp".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(settings.elevation, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorSettings {
    /// Constant height of every marker above the ground plane
    pub elevation: f32,
    /// Id of the observer's own reference marker, always placed at the origin
    pub home_id: String,
    /// Targets closer than this many meters get no AR placement
    pub min_path_length: f64,
}

impl Default for ProjectorSettings {
    fn default() -> Self {
        Self {
            elevation: 0.1,
            home_id: "home".to_string(),
            min_path_length: 1.0,
        }
    }
}

impl ProjectorSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.elevation.is_finite() {
            return Err(GeoError::InvalidSettings(format!(
                "elevation must be finite, got {}",
                self.elevation
            )));
        }
        if !(self.min_path_length.is_finite() && self.min_path_length >= 0.0) {
            return Err(GeoError::InvalidSettings(format!(
                "min_path_length must be a non-negative number, got {}",
                self.min_path_length
            )));
        }
        if self.home_id.is_empty() {
            return Err(GeoError::InvalidSettings(
                "home_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
