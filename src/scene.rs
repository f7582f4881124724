//! Placed markers keyed by target id
//!
//! The scene is the bookkeeping between the projector and the host's AR and
//! map views: which targets exist, which of them got an AR placement and
//! where, and which marker a tap refers to. Lookup is keyed by target id.

use std::collections::HashMap;

use crate::azimuth::Azimuth;
use crate::error::{GeoError, Result};
use crate::geodesy::{GeoBounds, GeoCoordinate};
use crate::projector::{BearingProjector, PlacementVector, TargetBearing};
use crate::target::Target;

/// A target together with its position in the scene
///
/// For the home target `position` is the origin while `bearing` still
/// reports its real distance and heading from the observer.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub target: Target,
    pub position: PlacementVector,
    pub bearing: TargetBearing,
}

/// Targets placed around one observer
///
/// # Example
/// ```
/// use geo_overlay::{Azimuth, BearingProjector, GeoCoordinate, Scene, Target};
///
/// let observer = GeoCoordinate::new(56.111773, -3.154543);
/// let targets = vec![
///     Target::new("north5", "North", GeoCoordinate::new(56.156773, -3.154543)),
///     Target::new("here", "Too close", observer),
/// ];
///
/// let mut scene = Scene::new(BearingProjector::new());
/// let placed = scene.place(observer, targets, Azimuth::ZERO)?;
/// assert_eq!(placed, 1);
/// assert!(scene.identify("north5").is_some());
/// assert!(scene.identify("here").is_none());
/// assert_eq!(scene.map_markers().len(), 2);
/// # Ok::<(), geo_overlay::GeoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scene {
    projector: BearingProjector,
    observer: Option<GeoCoordinate>,
    reference: Azimuth,
    /// Manual correction on top of `reference`, degrees clockwise
    adjustment_deg: f64,
    /// Every accepted target in insertion order, for the map view
    targets: Vec<Target>,
    /// Target id -> index into `targets`
    index: HashMap<String, usize>,
    placements: HashMap<String, Placement>,
}

impl Scene {
    pub fn new(projector: BearingProjector) -> Self {
        Self {
            projector,
            observer: None,
            reference: Azimuth::ZERO,
            adjustment_deg: 0.0,
            targets: Vec::new(),
            index: HashMap::new(),
            placements: HashMap::new(),
        }
    }

    pub fn projector(&self) -> &BearingProjector {
        &self.projector
    }

    /// Replace the scene contents with `targets` seen from `observer`.
    ///
    /// The reference azimuth is captured as the direction the observer
    /// faces and any previous manual adjustment is cleared. Duplicate ids
    /// keep the first occurrence; targets with non-finite coordinates are
    /// skipped. Targets within the projector's minimum path length are kept
    /// for the map but get no AR placement, except the home target which is
    /// always placed at the origin.
    ///
    /// Returns the number of AR placements.
    pub fn place<I>(
        &mut self,
        observer: GeoCoordinate,
        targets: I,
        reference: Azimuth,
    ) -> Result<usize>
    where
        I: IntoIterator<Item = Target>,
    {
        if !observer.is_finite() {
            return Err(GeoError::InvalidCoordinate {
                latitude: observer.latitude,
                longitude: observer.longitude,
            });
        }

        self.observer = Some(observer);
        self.reference = reference;
        self.adjustment_deg = 0.0;
        self.targets.clear();
        self.index.clear();
        self.placements.clear();

        for target in targets {
            if !target.coordinate.is_finite() {
                log::warn!("skipping target {:?} with non-finite coordinate", target.id);
                continue;
            }
            if self.index.contains_key(&target.id) {
                log::debug!("duplicate target id {:?} ignored", target.id);
                continue;
            }
            self.index.insert(target.id.clone(), self.targets.len());
            self.targets.push(target);
        }

        self.reproject();
        log::debug!(
            "placed {} of {} targets facing {}",
            self.placements.len(),
            self.targets.len(),
            reference
        );
        Ok(self.placements.len())
    }

    /// Rotate every placement by a manual correction of `delta_deg`,
    /// accumulated on top of earlier adjustments
    pub fn adjust_azimuth(&mut self, delta_deg: f64) {
        if !delta_deg.is_finite() {
            return;
        }
        self.adjustment_deg += delta_deg;
        self.reproject();
    }

    /// Total manual correction in degrees
    pub fn adjustment_degrees(&self) -> f64 {
        self.adjustment_deg
    }

    /// Reference azimuth including the manual correction
    pub fn effective_azimuth(&self) -> Azimuth {
        self.reference.offset_degrees(self.adjustment_deg)
    }

    /// The target placed under `id`, typically after a tap on its marker
    pub fn identify(&self, id: &str) -> Option<&Placement> {
        self.placements.get(id)
    }

    pub fn placement_for(&self, target: &Target) -> Option<&Placement> {
        self.identify(&target.id)
    }

    /// Map-side lookup of a target by id, placed in AR or not
    pub fn marker(&self, id: &str) -> Option<&Target> {
        self.index.get(id).and_then(|&i| self.targets.get(i))
    }

    /// All AR placements, in no particular order
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.placements.values()
    }

    /// Every target for the map view, in insertion order
    pub fn map_markers(&self) -> &[Target] {
        &self.targets
    }

    /// Map area centred on the observer that shows every target
    pub fn map_bounds(&self) -> Option<GeoBounds> {
        let observer = self.observer?;
        GeoBounds::centered_on(&observer, self.targets.iter().map(|t| &t.coordinate))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    fn reproject(&mut self) {
        let Some(observer) = self.observer else {
            return;
        };
        let azimuth = self.effective_azimuth();
        let min_path_length = self.projector.settings().min_path_length;

        self.placements.clear();
        for target in &self.targets {
            let bearing = self.projector.bearing_to(&observer, &target.coordinate, azimuth);
            let home = self.projector.is_home(target);
            if !home && !(bearing.distance_m > min_path_length) {
                log::trace!(
                    "{:?} is {:.1} m away, map only",
                    target.id,
                    bearing.distance_m
                );
                continue;
            }

            let position = if home {
                PlacementVector::ORIGIN
            } else {
                self.projector.place_bearing(&bearing)
            };
            self.placements.insert(
                target.id.clone(),
                Placement {
                    target: target.clone(),
                    position,
                    bearing,
                },
            );
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(BearingProjector::new())
    }
}
