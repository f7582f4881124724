//! Error type shared by every component of the crate

use thiserror::Error;

use crate::types::SensorType;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("{sensor} reading must have 3 components, got {len}")]
    InvalidDimension { sensor: SensorType, len: usize },

    #[error("{sensor} reading contains a non-finite component")]
    NonFiniteReading { sensor: SensorType },

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to parse settings: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to read settings file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to start heading worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    #[error("Heading pipeline has shut down")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, GeoError>;
