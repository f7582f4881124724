use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geo_overlay::{
    Azimuth, BearingProjector, GeoCoordinate, HeadingEstimator, Scene, SensorType, Target,
    great_circle_distance, initial_bearing, radial_scale,
};
use nalgebra::Vector3;
use rand::prelude::*;
use rand_pcg::Pcg64;

const OBSERVER: GeoCoordinate = GeoCoordinate::new(56.111773, -3.154543);

// Pre-generated targets to keep RNG out of the measured loops
fn generate_targets(count: usize, seed: u64) -> Vec<Target> {
    let mut rng = Pcg64::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            // Up to ~20 km in every direction
            let coordinate = GeoCoordinate::new(
                OBSERVER.latitude + rng.random_range(-0.18..0.18),
                OBSERVER.longitude + rng.random_range(-0.3..0.3),
            );
            Target::new(format!("poi-{i}"), format!("Point {i}"), coordinate)
        })
        .collect()
}

/// Readings of a handheld device slowly turning and shaking
fn generate_readings(count: usize, seed: u64) -> Vec<(Vector3<f32>, Vector3<f32>)> {
    let mut rng = Pcg64::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let yaw = (i as f32 * 0.5).to_radians();
            let (sin, cos) = yaw.sin_cos();
            let accelerometer = Vector3::new(
                rng.random_range(-0.3..0.3),
                rng.random_range(-0.3..0.3),
                9.81 + rng.random_range(-0.1..0.1),
            );
            // Horizontal field of 17.5 µT rotated into the device frame
            let magnetometer = Vector3::new(
                -17.5 * sin + rng.random_range(-0.5..0.5),
                17.5 * cos + rng.random_range(-0.5..0.5),
                -45.0 + rng.random_range(-0.5..0.5),
            );
            (accelerometer, magnetometer)
        })
        .collect()
}

fn bench_geodesy(c: &mut Criterion) {
    let target = GeoCoordinate::new(56.156773, -3.074543);

    c.bench_function("great_circle_distance", |b| {
        b.iter(|| great_circle_distance(black_box(&OBSERVER), black_box(&target)))
    });
    c.bench_function("initial_bearing", |b| {
        b.iter(|| initial_bearing(black_box(&OBSERVER), black_box(&target)))
    });
    c.bench_function("radial_scale", |b| b.iter(|| radial_scale(black_box(2_345.0))));
}

fn bench_project(c: &mut Criterion) {
    let projector = BearingProjector::new();
    let target = GeoCoordinate::new(56.156773, -3.074543);
    let reference = Azimuth::from_degrees(37.0);

    c.bench_function("project", |b| {
        b.iter(|| projector.project(black_box(&OBSERVER), black_box(&target), black_box(reference)))
    });
}

/// Benchmark placing a typical batch of points of interest
fn bench_scene_place(c: &mut Criterion) {
    let targets = generate_targets(200, 42);
    let mut scene = Scene::default();

    c.bench_function("scene_place_200", |b| {
        b.iter(|| {
            scene
                .place(black_box(OBSERVER), targets.iter().cloned(), Azimuth::ZERO)
                .map(black_box)
        })
    });

    scene.place(OBSERVER, targets.iter().cloned(), Azimuth::ZERO).ok();
    c.bench_function("scene_adjust_200", |b| b.iter(|| scene.adjust_azimuth(black_box(1.0))));
}

fn bench_heading_update(c: &mut Criterion) {
    let readings = generate_readings(1_000, 7);
    let mut estimator = HeadingEstimator::new();
    let mut index = 0;

    c.bench_function("heading_update_pair", |b| {
        b.iter(|| {
            let (accelerometer, magnetometer) = readings[index];
            index = (index + 1) % readings.len();
            estimator
                .update_vector(SensorType::Accelerometer, black_box(accelerometer))
                .ok();
            estimator
                .update_vector(SensorType::Magnetometer, black_box(magnetometer))
                .ok();
            black_box(estimator.current_azimuth())
        })
    });
}

criterion_group!(
    benches,
    bench_geodesy,
    bench_project,
    bench_scene_place,
    bench_heading_update
);
criterion_main!(benches);
