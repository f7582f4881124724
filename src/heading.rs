//! Stateful heading estimator fed by raw sensor callbacks

use nalgebra::{Rotation3, Vector3};

use crate::azimuth::Azimuth;
use crate::compass;
use crate::error::{GeoError, Result};
use crate::math::Vector3Ext;
use crate::types::{HeadingSettings, SensorType};

/// Fuses the latest accelerometer and magnetometer readings into a compass
/// azimuth.
///
/// Each reading replaces the previous one for its channel. Once both
/// channels have a reading, every update attempts a fusion; a degenerate
/// pair (near-zero magnitude, field almost vertical) leaves the published
/// azimuth unchanged.
///
/// # Example
/// ```
/// use geo_overlay::{HeadingEstimator, SensorType};
///
/// let mut estimator = HeadingEstimator::new();
/// estimator.update(SensorType::Accelerometer, &[0.0, 0.0, 9.81])?;
/// estimator.update(SensorType::Magnetometer, &[-20.0, 0.0, -43.0])?;
///
/// assert!((estimator.current_azimuth().degrees() - 90.0).abs() < 1.0);
/// # Ok::<(), geo_overlay::GeoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HeadingEstimator {
    settings: HeadingSettings,
    /// Last accelerometer reading, display frame
    accelerometer: Option<Vector3<f32>>,
    /// Last calibrated magnetometer reading, display frame
    magnetometer: Option<Vector3<f32>>,
    azimuth: Azimuth,
    rotation: Option<Rotation3<f32>>,
    solutions: u64,
}

impl HeadingEstimator {
    pub fn new() -> Self {
        Self::with_settings(HeadingSettings::default())
    }

    pub fn with_settings(settings: HeadingSettings) -> Self {
        Self {
            settings,
            accelerometer: None,
            magnetometer: None,
            azimuth: Azimuth::ZERO,
            rotation: None,
            solutions: 0,
        }
    }

    /// Like [`HeadingEstimator::with_settings`], validating the settings first
    pub fn try_with_settings(settings: HeadingSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::with_settings(settings))
    }

    pub fn settings(&self) -> &HeadingSettings {
        &self.settings
    }

    /// Record a raw reading given as a slice of components.
    ///
    /// Rejects readings that do not have exactly three finite components;
    /// a rejected reading leaves the estimator untouched.
    pub fn update(&mut self, sensor: SensorType, values: &[f32]) -> Result<()> {
        let reading: [f32; 3] = values.try_into().map_err(|_| GeoError::InvalidDimension {
            sensor,
            len: values.len(),
        })?;
        self.update_vector(sensor, Vector3::from(reading))
    }

    /// Record a reading already held as a vector
    pub fn update_vector(&mut self, sensor: SensorType, reading: Vector3<f32>) -> Result<()> {
        if !reading.is_finite() {
            return Err(GeoError::NonFiniteReading { sensor });
        }

        match sensor {
            SensorType::Accelerometer => {
                self.accelerometer = Some(self.settings.display_rotation.remap(reading));
            }
            SensorType::Magnetometer => {
                let calibrated = self.settings.calibration.apply(reading);
                self.magnetometer = Some(self.settings.display_rotation.remap(calibrated));
            }
        }

        if let (Some(accelerometer), Some(magnetometer)) = (self.accelerometer, self.magnetometer) {
            self.fuse(accelerometer, magnetometer);
        }
        Ok(())
    }

    /// Last computed azimuth, or zero before the first solution
    pub fn current_azimuth(&self) -> Azimuth {
        self.azimuth
    }

    /// True once at least one reading pair produced a solution
    pub fn has_solution(&self) -> bool {
        self.solutions > 0
    }

    /// Number of successful fusions since construction or reset
    pub fn solutions(&self) -> u64 {
        self.solutions
    }

    /// Device-to-ENU rotation of the last successful fusion
    pub fn rotation(&self) -> Option<Rotation3<f32>> {
        self.rotation
    }

    /// Forget all readings and the published azimuth
    pub fn reset(&mut self) {
        self.accelerometer = None;
        self.magnetometer = None;
        self.azimuth = Azimuth::ZERO;
        self.rotation = None;
        self.solutions = 0;
    }

    fn fuse(&mut self, accelerometer: Vector3<f32>, magnetometer: Vector3<f32>) {
        let Some(rotation) = compass::rotation_matrix(
            accelerometer,
            magnetometer,
            self.settings.min_magnitude,
            self.settings.min_field_angle_sine,
        ) else {
            log::trace!("degenerate gravity/magnetic pair, keeping {}", self.azimuth);
            return;
        };

        let yaw = compass::yaw(&rotation, self.settings.convention);
        if !yaw.is_finite() {
            log::debug!("non-finite yaw from fusion, keeping {}", self.azimuth);
            return;
        }
        let measured = Azimuth::from_radians(f64::from(yaw));

        self.azimuth = if self.solutions == 0 {
            measured
        } else {
            let step = self.azimuth.delta_to(measured) * f64::from(self.settings.smoothing);
            Azimuth::from_radians(self.azimuth.radians() + step)
        };
        self.rotation = Some(rotation);
        self.solutions += 1;
    }
}

impl Default for HeadingEstimator {
    fn default() -> Self {
        Self::new()
    }
}
