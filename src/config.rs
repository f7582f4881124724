//! TOML configuration for the whole overlay
//!
//! Every field is optional; anything missing falls back to the defaults of
//! [`HeadingSettings`] and [`ProjectorSettings`].
//!
//! ```toml
//! [heading]
//! convention = "enu"
//! display_rotation = "rotation90"
//! smoothing = 0.25
//!
//! [heading.calibration]
//! hard_iron = [12.0, -3.5, 40.0]
//!
//! [projector]
//! home_id = "base-camp"
//! min_path_length = 5.0
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GeoError, Result};
use crate::types::{HeadingSettings, ProjectorSettings};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub heading: HeadingSettings,
    pub projector: ProjectorSettings,
}

impl Settings {
    /// Parse and validate settings from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading settings from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| GeoError::InvalidSettings(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.heading.validate()?;
        self.projector.validate()
    }
}
