//! Tilt-compensated compass from gravity and geomagnetic readings

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::math::{RAD_TO_DEG, Vector3Ext};
use crate::types::Convention;

/// Device-to-Earth rotation from a gravity and a geomagnetic reading.
///
/// Standard two-vector frame alignment: the accelerometer defines up, the
/// cross product of the magnetic field with up defines east, and up × east
/// completes north. The rows of the returned matrix are east, north and up
/// expressed in device coordinates, so `rotation * v` maps a device vector
/// into the local East-North-Up frame.
///
/// Returns `None` when either reading has a magnitude at or below
/// `min_magnitude`, or when the sine of the angle between the field and the
/// vertical is below `min_field_angle_sine` (the horizontal field component
/// is too weak to define north).
pub fn rotation_matrix(
    accelerometer: Vector3<f32>,
    magnetometer: Vector3<f32>,
    min_magnitude: f32,
    min_field_angle_sine: f32,
) -> Option<Rotation3<f32>> {
    let up = accelerometer.try_unit(min_magnitude)?;
    let field_magnitude = magnetometer.norm();
    if !(field_magnitude > min_magnitude) {
        return None;
    }

    let horizontal = magnetometer.cross(&up);
    if !(horizontal.norm() / field_magnitude >= min_field_angle_sine) {
        return None;
    }
    let east = horizontal.try_unit(0.0)?;
    let north = up.cross(&east);

    let matrix = Matrix3::from_rows(&[east.transpose(), north.transpose(), up.transpose()]);
    Some(Rotation3::from_matrix_unchecked(matrix))
}

/// Heading of the convention's forward axis in radians, `(-π, π]`,
/// clockwise from magnetic north.
pub fn yaw(rotation: &Rotation3<f32>, convention: Convention) -> f32 {
    let forward = convention.forward_axis();
    let m = rotation.matrix();
    m[(0, forward)].atan2(m[(1, forward)])
}

/// Calculate tilt-compensated magnetic heading
///
/// # Arguments
/// * `convention` - Device axes convention of both readings
/// * `accelerometer` - Accelerometer reading (specific force, up at rest)
/// * `magnetometer` - Calibrated magnetometer reading
///
/// # Returns
/// Heading in degrees (-180° to +180°, 0° = North, 90° = East), or `None`
/// for a degenerate reading pair.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use geo_overlay::{Convention, compass::calculate_heading};
///
/// let accel = Vector3::new(0.0, 0.0, 9.81);   // flat on a table
/// let mag = Vector3::new(0.0, 20.0, -43.0);   // top edge towards north
/// let heading = calculate_heading(Convention::Enu, accel, mag).unwrap();
/// assert!(heading.abs() < 1.0);
/// ```
pub fn calculate_heading(
    convention: Convention,
    accelerometer: Vector3<f32>,
    magnetometer: Vector3<f32>,
) -> Option<f32> {
    rotation_matrix(accelerometer, magnetometer, 0.0, 0.0)
        .map(|rotation| yaw(&rotation, convention) * RAD_TO_DEG)
}
