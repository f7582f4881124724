//! Normalized compass azimuth

use core::fmt;

use crate::math::{normalize_degrees, normalize_radians};

/// Heading clockwise from magnetic north, always finite and in `[0, 2π)`.
///
/// Non-finite input, such as a NaN produced by a degenerate sensor fusion,
/// becomes a zero azimuth instead of an error.
///
/// # Example
/// ```
/// use geo_overlay::Azimuth;
///
/// let west = Azimuth::from_degrees(-90.0);
/// assert!((west.degrees() - 270.0).abs() < 1e-9);
///
/// let unknown = Azimuth::from_radians(f64::NAN);
/// assert_eq!(unknown, Azimuth::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Azimuth(f64);

impl Azimuth {
    pub const ZERO: Azimuth = Azimuth(0.0);

    pub fn from_radians(radians: f64) -> Self {
        Self(normalize_radians(radians))
    }

    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::ZERO;
        }
        Self::from_radians(normalize_degrees(degrees).to_radians())
    }

    /// Angle in radians, `[0, 2π)`
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Angle in degrees, `[0, 360)`
    pub fn degrees(self) -> f64 {
        normalize_degrees(self.0.to_degrees())
    }

    /// A new azimuth rotated clockwise by `degrees` (negative turns
    /// counter-clockwise)
    pub fn offset_degrees(self, degrees: f64) -> Self {
        if !degrees.is_finite() {
            return self;
        }
        Self::from_radians(self.0 + degrees.to_radians())
    }

    /// Signed smallest rotation from `self` to `other`, in `(-π, π]`
    pub fn delta_to(self, other: Azimuth) -> f64 {
        let diff = normalize_radians(other.0 - self.0);
        if diff > core::f64::consts::PI {
            diff - core::f64::consts::TAU
        } else {
            diff
        }
    }
}

impl From<f64> for Azimuth {
    fn from(radians: f64) -> Self {
        Self::from_radians(radians)
    }
}

impl fmt::Display for Azimuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.degrees())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::{PI, TAU};

    #[test]
    fn test_always_in_range() {
        for raw in [-7.0 * PI, -PI, -0.1, 0.0, 1.0, TAU, 3.0 * TAU + 0.5, 1e6] {
            let a = Azimuth::from_radians(raw);
            assert!(
                (0.0..TAU).contains(&a.radians()),
                "{} normalized to {}",
                raw,
                a.radians()
            );
        }
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(Azimuth::from_radians(f64::NAN), Azimuth::ZERO);
        assert_eq!(Azimuth::from_radians(f64::INFINITY), Azimuth::ZERO);
        assert_eq!(Azimuth::from_degrees(f64::NEG_INFINITY), Azimuth::ZERO);
    }

    #[test]
    fn test_degrees_and_radians_agree() {
        let a = Azimuth::from_degrees(450.0);
        assert_relative_eq!(a.degrees(), 90.0, epsilon = 1e-9);
        assert_relative_eq!(a.radians(), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_offset_degrees() {
        let a = Azimuth::from_degrees(359.0).offset_degrees(2.0);
        assert_relative_eq!(a.degrees(), 1.0, epsilon = 1e-9);

        let b = Azimuth::from_degrees(1.0).offset_degrees(-2.0);
        assert_relative_eq!(b.degrees(), 359.0, epsilon = 1e-9);

        assert_eq!(a.offset_degrees(f64::NAN), a);
    }

    #[test]
    fn test_delta_to_takes_short_way() {
        let a = Azimuth::from_degrees(350.0);
        let b = Azimuth::from_degrees(10.0);
        assert_relative_eq!(a.delta_to(b).to_degrees(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(b.delta_to(a).to_degrees(), -20.0, epsilon = 1e-9);
    }
}
