//! Named points of interest

use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::geodesy::GeoCoordinate;

/// Source a target was retrieved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Business or landmark from a places lookup
    #[default]
    Place,
    /// Summit from a peaks lookup
    Peak,
}

/// A named point of interest.
///
/// Identity is the `id` alone: two targets with the same id are the same
/// entity whatever their name, kind or coordinate. AR markers and map
/// markers are correlated through this id.
///
/// # Example
/// ```
/// use geo_overlay::{GeoCoordinate, Target};
///
/// let a = Target::new("north5", "North", GeoCoordinate::new(56.15, -3.15));
/// let b = Target::new("north5", "Renamed", GeoCoordinate::new(0.0, 0.0));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub id: String,
    pub name: String,
    pub coordinate: GeoCoordinate,
    #[serde(default)]
    pub kind: TargetKind,
}

impl Target {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: GeoCoordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate,
            kind: TargetKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: TargetKind) -> Self {
        self.kind = kind;
        self
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Target {}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
