//! Angle helpers and nalgebra extensions

use core::f64::consts::TAU;

use nalgebra::Vector3;

pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Wrap an angle in radians into `[0, 2π)`.
///
/// Uses Euclidean remainder so negative angles and angles beyond one turn
/// land on the same point of the circle. Non-finite input yields `0.0`.
pub fn normalize_radians(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to TAU and keeps -0.0
    if wrapped >= TAU { 0.0 } else { wrapped + 0.0 }
}

/// Wrap an angle in degrees into `[0, 360)`. Non-finite input yields `0.0`.
pub fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped + 0.0 }
}

/// Extension trait for sensor vectors
pub trait Vector3Ext {
    /// Normalize the vector, returning `None` when its magnitude is at or
    /// below `min_magnitude`
    fn try_unit(&self, min_magnitude: f32) -> Option<Vector3<f32>>;

    /// True when every component is finite
    fn is_finite(&self) -> bool;
}

impl Vector3Ext for Vector3<f32> {
    fn try_unit(&self, min_magnitude: f32) -> Option<Vector3<f32>> {
        let magnitude = self.norm();
        if magnitude.is_finite() && magnitude > min_magnitude {
            Some(*self / magnitude)
        } else {
            None
        }
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|c| c.is_finite())
    }
}
