use std::thread;
use std::time::Duration;

use geo_overlay::{GeoCoordinate, HeadingWorker, Scene, SensorType, Settings, Target};

const SAMPLE_PERIOD: Duration = Duration::from_millis(20); // 50 Hz

fn main() -> geo_overlay::Result<()> {
    env_logger::init();

    // optional settings file as the first argument
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let worker = HeadingWorker::spawn(settings.heading, 8)?;
    let heading = worker.heading();
    let sender = worker.sender();

    // stands in for the platform sensor callbacks: a phone lying flat,
    // turning from north towards east
    let producer = thread::spawn(move || -> geo_overlay::Result<()> {
        for step in 0..=45 {
            let (sin, cos) = (step as f32 * 2.0).to_radians().sin_cos();
            sender.try_send(SensorType::Accelerometer, &[0.0, 0.0, 9.81])?;
            sender.try_send(SensorType::Magnetometer, &[-17.5 * sin, 17.5 * cos, -45.0])?;
            thread::sleep(SAMPLE_PERIOD);
        }
        Ok(())
    });

    for _ in 0..5 {
        thread::sleep(SAMPLE_PERIOD * 10);
        let snapshot = heading.snapshot();
        println!("{} readings, facing {}", snapshot.updates, snapshot.azimuth);
    }

    match producer.join() {
        Ok(result) => result?,
        Err(_) => log::error!("sensor producer panicked"),
    }
    worker.shutdown();

    let observer = GeoCoordinate::new(56.111773, -3.154543);
    let targets = (0..8).map(|i| {
        let bearing = f64::from(i) * 45.0;
        let coordinate = observer.destination(bearing, 2_000.0);
        Target::new(format!("poi-{i}"), format!("{bearing}°"), coordinate)
    });

    let mut scene = Scene::new(geo_overlay::BearingProjector::with_settings(settings.projector));
    scene.place(observer, targets, heading.azimuth())?;
    for placement in scene.placements() {
        println!("{:<6} {}", placement.target.name, placement.position);
    }
    Ok(())
}
