use geo_overlay::{GeoCoordinate, HeadingEstimator, Scene, SensorType, Target, TargetKind};

fn main() -> geo_overlay::Result<()> {
    env_logger::init();

    let observer = GeoCoordinate::new(56.111773, -3.154543);
    let targets = vec![
        Target::new("home", "Home", observer),
        Target::new("cafe", "Cafe", observer.destination(30.0, 250.0)),
        Target::new("station", "Station", observer.destination(200.0, 1_800.0)),
        Target::new("hill", "Hill", observer.destination(85.0, 7_500.0))
            .with_kind(TargetKind::Peak),
    ];

    let mut estimator = HeadingEstimator::new();
    // replace these with actual sensor readings; top edge of the phone facing east
    estimator.update(SensorType::Accelerometer, &[0.0, 0.0, 9.81])?;
    estimator.update(SensorType::Magnetometer, &[-20.0, 0.0, -43.0])?;
    let azimuth = estimator.current_azimuth();
    println!("Facing {}", azimuth);

    let mut scene = Scene::default();
    scene.place(observer, targets, azimuth)?;

    for target in scene.map_markers() {
        match scene.identify(&target.id) {
            Some(placement) => println!(
                "{:<8} {:>7.0} m  bearing {:>5.1}°  at {}",
                target.name,
                placement.bearing.distance_m,
                placement.bearing.heading_deg,
                placement.position
            ),
            None => println!("{:<8} map only", target.name),
        }
    }

    if let Some(bounds) = scene.map_bounds() {
        println!("Map bounds: {:?} .. {:?}", bounds.south_west, bounds.north_east);
    }
    Ok(())
}
