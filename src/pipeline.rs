//! Sensor stream -> heading estimator on a worker thread
//!
//! Platform sensor callbacks push readings into a bounded channel; a single
//! worker thread owns the [`HeadingEstimator`] and publishes every result
//! through a [`SharedHeading`] that any number of readers can poll, for
//! example when the scene is (re)placed.
//!
//! ```text
//! sensor callback ──► SensorSender ──► bounded queue ──► worker thread
//!                                                           │
//!                 SharedHeading::azimuth() ◄── RwLock ◄─────┘
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use nalgebra::Vector3;
use parking_lot::RwLock;

use crate::azimuth::Azimuth;
use crate::error::{GeoError, Result};
use crate::heading::HeadingEstimator;
use crate::math::Vector3Ext;
use crate::types::{HeadingSettings, SensorType};

/// A validated three-axis reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub sensor: SensorType,
    pub values: Vector3<f32>,
}

impl SensorReading {
    /// Validate a raw reading: exactly three finite components
    pub fn new(sensor: SensorType, values: &[f32]) -> Result<Self> {
        let components: [f32; 3] = values.try_into().map_err(|_| GeoError::InvalidDimension {
            sensor,
            len: values.len(),
        })?;
        let values = Vector3::from(components);
        if !values.is_finite() {
            return Err(GeoError::NonFiniteReading { sensor });
        }
        Ok(Self { sensor, values })
    }
}

/// Latest published state of the estimator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadingSnapshot {
    pub azimuth: Azimuth,
    /// True once the estimator produced at least one solution
    pub solved: bool,
    /// Readings processed by the worker
    pub updates: u64,
}

/// Cloneable read handle on the published heading
#[derive(Debug, Clone, Default)]
pub struct SharedHeading {
    inner: Arc<RwLock<HeadingSnapshot>>,
}

impl SharedHeading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> HeadingSnapshot {
        *self.inner.read()
    }

    pub fn azimuth(&self) -> Azimuth {
        self.inner.read().azimuth
    }

    fn publish(&self, snapshot: HeadingSnapshot) {
        *self.inner.write() = snapshot;
    }
}

#[derive(Debug)]
enum Message {
    Reading(SensorReading),
    Stop,
}

/// Producer side of the sensor queue
#[derive(Debug, Clone)]
pub struct SensorSender {
    tx: Sender<Message>,
}

impl SensorSender {
    /// Validate and enqueue a reading, blocking while the queue is full
    pub fn send(&self, sensor: SensorType, values: &[f32]) -> Result<()> {
        let reading = SensorReading::new(sensor, values)?;
        self.tx
            .send(Message::Reading(reading))
            .map_err(|_| GeoError::ChannelClosed)
    }

    /// Validate and enqueue a reading without blocking.
    ///
    /// Returns `Ok(false)` when the queue is full and the reading was
    /// dropped; a newer reading will follow shortly.
    pub fn try_send(&self, sensor: SensorType, values: &[f32]) -> Result<bool> {
        let reading = SensorReading::new(sensor, values)?;
        match self.tx.try_send(Message::Reading(reading)) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => {
                log::debug!("sensor queue full, dropping {} reading", sensor);
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(GeoError::ChannelClosed),
        }
    }
}

/// Worker thread running a [`HeadingEstimator`] over a sensor queue
///
/// # Example
/// ```
/// use geo_overlay::{HeadingSettings, HeadingWorker, SensorType};
///
/// let worker = HeadingWorker::spawn(HeadingSettings::default(), 16)?;
/// let sender = worker.sender();
/// let heading = worker.heading();
///
/// sender.send(SensorType::Accelerometer, &[0.0, 0.0, 9.81])?;
/// sender.send(SensorType::Magnetometer, &[-20.0, 0.0, -43.0])?;
/// worker.shutdown();
///
/// assert!((heading.azimuth().degrees() - 90.0).abs() < 1.0);
/// # Ok::<(), geo_overlay::GeoError>(())
/// ```
#[derive(Debug)]
pub struct HeadingWorker {
    sender: SensorSender,
    heading: SharedHeading,
    handle: Option<JoinHandle<HeadingEstimator>>,
}

impl HeadingWorker {
    /// Start the worker with a queue holding at most `capacity` readings
    pub fn spawn(settings: HeadingSettings, capacity: usize) -> Result<Self> {
        let estimator = HeadingEstimator::try_with_settings(settings)?;
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        let heading = SharedHeading::new();

        let published = heading.clone();
        let handle = thread::Builder::new()
            .name("heading-estimator".to_string())
            .spawn(move || run(rx, estimator, published))
            .map_err(GeoError::WorkerSpawn)?;

        Ok(Self {
            sender: SensorSender { tx },
            heading,
            handle: Some(handle),
        })
    }

    pub fn sender(&self) -> SensorSender {
        self.sender.clone()
    }

    pub fn heading(&self) -> SharedHeading {
        self.heading.clone()
    }

    /// Process everything already queued, stop the thread and hand back the
    /// estimator. Senders still held elsewhere get
    /// [`GeoError::ChannelClosed`] afterwards.
    pub fn shutdown(mut self) -> Option<HeadingEstimator> {
        self.stop()
    }

    fn stop(&mut self) -> Option<HeadingEstimator> {
        let handle = self.handle.take()?;
        // The worker may already be gone if it panicked
        let _ = self.sender.tx.send(Message::Stop);
        match handle.join() {
            Ok(estimator) => Some(estimator),
            Err(_) => {
                log::error!("heading worker panicked");
                None
            }
        }
    }
}

impl Drop for HeadingWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    rx: Receiver<Message>,
    mut estimator: HeadingEstimator,
    heading: SharedHeading,
) -> HeadingEstimator {
    log::debug!("heading worker started");
    let mut updates = 0u64;

    for message in rx.iter() {
        let reading = match message {
            Message::Reading(reading) => reading,
            Message::Stop => break,
        };
        // Readings are validated by the sender
        if let Err(e) = estimator.update_vector(reading.sensor, reading.values) {
            log::warn!("rejected reading: {}", e);
            continue;
        }
        updates += 1;
        heading.publish(HeadingSnapshot {
            azimuth: estimator.current_azimuth(),
            solved: estimator.has_solution(),
            updates,
        });
    }

    log::debug!("heading worker stopped after {} readings", updates);
    estimator
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reading_validation() {
        assert!(SensorReading::new(SensorType::Accelerometer, &[0.0, 0.0, 9.81]).is_ok());
        assert!(matches!(
            SensorReading::new(SensorType::Accelerometer, &[0.0, 9.81]),
            Err(GeoError::InvalidDimension { len: 2, .. })
        ));
        assert!(matches!(
            SensorReading::new(SensorType::Magnetometer, &[0.0, f32::INFINITY, 1.0]),
            Err(GeoError::NonFiniteReading { .. })
        ));
    }

    #[test]
    fn test_worker_publishes_heading() {
        let worker = HeadingWorker::spawn(HeadingSettings::default(), 4).unwrap();
        let sender = worker.sender();
        let heading = worker.heading();
        assert!(!heading.snapshot().solved);

        sender.send(SensorType::Accelerometer, &[0.0, 0.0, 9.81]).unwrap();
        sender.send(SensorType::Magnetometer, &[-20.0, 0.0, -43.0]).unwrap();
        let estimator = worker.shutdown().unwrap();

        let snapshot = heading.snapshot();
        assert!(snapshot.solved);
        assert_eq!(snapshot.updates, 2);
        assert_relative_eq!(snapshot.azimuth.degrees(), 90.0, epsilon = 0.01);
        assert_eq!(estimator.current_azimuth(), snapshot.azimuth);
    }

    #[test]
    fn test_send_after_shutdown_fails() {
        let worker = HeadingWorker::spawn(HeadingSettings::default(), 4).unwrap();
        let sender = worker.sender();
        worker.shutdown();

        assert!(matches!(
            sender.send(SensorType::Accelerometer, &[0.0, 0.0, 9.81]),
            Err(GeoError::ChannelClosed)
        ));
        assert!(matches!(
            sender.try_send(SensorType::Accelerometer, &[0.0, 0.0, 9.81]),
            Err(GeoError::ChannelClosed)
        ));
    }

    #[test]
    fn test_invalid_reading_rejected_at_sender() {
        let worker = HeadingWorker::spawn(HeadingSettings::default(), 4).unwrap();
        let sender = worker.sender();
        assert!(sender.send(SensorType::Magnetometer, &[1.0]).is_err());
        let heading = worker.heading();
        worker.shutdown();
        assert_eq!(heading.snapshot().updates, 0);
    }

    #[test]
    fn test_spawn_rejects_invalid_settings() {
        let settings = HeadingSettings {
            smoothing: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            HeadingWorker::spawn(settings, 4),
            Err(GeoError::InvalidSettings(_))
        ));
    }
}
