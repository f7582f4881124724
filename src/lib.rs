//! Geo Overlay - Geographic points of interest projected into an augmented-reality scene
//!
//! This library turns latitude/longitude targets into positions around an
//! observer standing at the origin of an AR scene, and fuses accelerometer and
//! magnetometer readings into the compass azimuth the scene is anchored to.
//!
//! Distances are great-circle distances on a spherical Earth. Because real
//! distances span meters to tens of kilometers while the renderer needs markers
//! within a few scene units, the distance is compressed into a radius between
//! 4 and 10 units; only the direction is preserved exactly.
//!
//! # Features
//!
//! - Haversine distance and initial bearing between coordinates
//! - Piecewise-linear radial compression of distance into scene units
//! - Compass azimuth from gravity and geomagnetic readings, with tilt
//!   compensation and rejection of degenerate readings
//! - Device axes conventions (ENU, NWU, NED) and display rotation remapping
//! - Hard/soft iron magnetometer correction and optional smoothing
//! - Scene bookkeeping: id-keyed placements, manual azimuth correction, map
//!   bounds
//! - Background heading worker fed through a bounded channel
//! - TOML settings
//!
//! # Quick Start
//!
//! ```rust
//! use geo_overlay::{BearingProjector, GeoCoordinate, HeadingEstimator, SensorType, Target};
//!
//! let mut estimator = HeadingEstimator::new();
//!
//! // Device lying flat, top edge pointing east
//! estimator.update(SensorType::Accelerometer, &[0.0, 0.0, 9.81])?;
//! estimator.update(SensorType::Magnetometer, &[-20.0, 0.0, -43.0])?;
//! let azimuth = estimator.current_azimuth();
//!
//! let projector = BearingProjector::new();
//! let observer = GeoCoordinate::new(56.111773, -3.154543);
//! let peak = Target::new("peak", "Hill", GeoCoordinate::new(56.111773, -3.074543));
//!
//! // The target due east lands straight ahead, at the far radius
//! let position = projector.project_target(&observer, &peak, azimuth);
//! assert!(position.x.abs() < 0.2);
//! assert!((position.z + 10.0).abs() < 0.01);
//! # Ok::<(), geo_overlay::GeoError>(())
//! ```
//!
//! Scene coordinates are right-handed with Y up: the observer faces `-Z` and
//! `+X` is to the right.

mod axes;
mod azimuth;
pub mod compass;
mod config;
mod error;
mod geodesy;
mod heading;
mod math;
pub mod pipeline;
mod projector;
mod scene;
mod target;
mod types;

pub use axes::DisplayRotation;
pub use azimuth::Azimuth;
pub use compass::calculate_heading;
pub use config::Settings;
pub use error::{GeoError, Result};
pub use geodesy::{EARTH_RADIUS_M, GeoBounds, GeoCoordinate, great_circle_distance, initial_bearing};
pub use heading::HeadingEstimator;
pub use math::{DEG_TO_RAD, RAD_TO_DEG, Vector3Ext, normalize_degrees, normalize_radians};
pub use pipeline::{HeadingSnapshot, HeadingWorker, SensorReading, SensorSender, SharedHeading};
pub use projector::{BearingProjector, PlacementVector, TargetBearing, radial_scale};
pub use scene::{Placement, Scene};
pub use target::{Target, TargetKind};
pub use types::*;
