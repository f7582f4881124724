//! Remapping of sensor axes for rotated displays
//!
//! Sensors report in the device's natural frame, but the heading the user
//! cares about follows the displayed content. When the display is rotated
//! about the device Z axis, both readings are remapped before fusion so the
//! forward axis of the convention matches the top of the displayed content.
//!
//! # Example
//! ```
//! use nalgebra::Vector3;
//! use geo_overlay::DisplayRotation;
//!
//! let sensor = Vector3::new(1.0, 2.0, 3.0);
//! let display = DisplayRotation::Rotation90.remap(sensor);
//!
//! assert_eq!(display, Vector3::new(2.0, -1.0, 3.0));
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Rotation of the displayed content about the device Z axis,
/// counter-clockwise in 90° steps.
///
/// Each variant maps the display axes onto sensor axes:
/// - `Rotation0`: +X +Y +Z (identity)
/// - `Rotation90`: +Y -X +Z
/// - `Rotation180`: -X -Y +Z
/// - `Rotation270`: -Y +X +Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayRotation {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

impl DisplayRotation {
    /// Build from a rotation in degrees. Only multiples of 90 are accepted.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(DisplayRotation::Rotation0),
            90 => Some(DisplayRotation::Rotation90),
            180 => Some(DisplayRotation::Rotation180),
            270 => Some(DisplayRotation::Rotation270),
            _ => None,
        }
    }

    /// Express a sensor-frame vector in the display frame
    #[inline]
    pub fn remap(self, sensor: Vector3<f32>) -> Vector3<f32> {
        match self {
            DisplayRotation::Rotation0 => sensor,
            DisplayRotation::Rotation90 => Vector3::new(sensor.y, -sensor.x, sensor.z),
            DisplayRotation::Rotation180 => Vector3::new(-sensor.x, -sensor.y, sensor.z),
            DisplayRotation::Rotation270 => Vector3::new(-sensor.y, sensor.x, sensor.z),
        }
    }
}
