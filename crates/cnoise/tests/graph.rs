use std::sync::Arc;
use std::thread;

use bevy_math::DVec3;
use cnoise::model::{Plane, Sphere};
use cnoise::module::{Billow, ControlPoint, Perlin, RidgedMulti, Voronoi};
use cnoise::{Cache, Module, NoiseError, NoiseFunction, Source};

fn terrain() -> Result<Module, NoiseError> {
    let mountains = Module::scale_bias(
        RidgedMulti::new().with_seed(3).with_octave_count(5)?,
        0.75,
        0.25,
    );
    let plains = Module::scale_bias(Billow::new().with_frequency(2.0).with_seed(3), 0.125, -0.75);
    let control = Perlin::new()
        .with_frequency(0.5)
        .with_persistence(0.25)
        .with_seed(4);
    let base = Module::select(plains, mountains, control, 0.0, 1000.0, 0.125)?;
    let shaped = Module::curve(
        Module::turbulence(base, 0.125, 4.0, 3, 9)?,
        [
            ControlPoint::new(-2.0, -2.0),
            ControlPoint::new(-1.0, -0.75),
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(1.0, 0.75),
            ControlPoint::new(2.0, 2.0),
        ],
    )?;
    Module::clamp(shaped, -1.0, 1.0)
}

#[test]
fn terrain_graph_is_bounded() {
    let terrain = terrain().unwrap();
    terrain.validate().unwrap();
    for i in 0..64 {
        let point = DVec3::new(i as f64 * 0.37, 0.5, i as f64 * -0.21);
        let value = terrain.sample(point).unwrap();
        assert!((-1.0..=1.0).contains(&value), "{value} at {point}");
    }
}

#[test]
fn graphs_are_deterministic() {
    let a = terrain().unwrap();
    let b = terrain().unwrap();
    for i in 0..16 {
        let point = DVec3::new(i as f64 * 1.13, -2.5, 0.7);
        assert_eq!(a.sample(point), b.sample(point));
    }
}

#[test]
fn billow_scale_bias_golden() {
    let graph = Module::scale_bias(Billow::new().with_seed(0).with_frequency(5.0), 16.0, -0.25);
    assert_eq!(
        format!("{:.8}", graph.sample(DVec3::ZERO).unwrap()),
        "-23.75000000"
    );
    assert_eq!(
        format!("{:.10}", graph.sample(DVec3::new(0.13, 0.27, 0.41)).unwrap()),
        "-18.5395820434"
    );
}

#[test]
fn validate_finds_missing_slot() {
    let graph = Module::add(
        Perlin::new(),
        Module::blend(Voronoi::new(), Module::constant(1.0), Source::empty()),
    );
    let expected = NoiseError::MissingSource {
        module: "blend",
        slot: "control",
    };
    assert_eq!(graph.validate(), Err(expected.clone()));
    assert_eq!(graph.sample(DVec3::ZERO), Err(expected));
}

#[test]
fn shared_across_threads() {
    let graph = Arc::new(terrain().unwrap());
    let points: Vec<DVec3> = (0..8)
        .map(|i| DVec3::new(i as f64 * 0.5, 1.0, -(i as f64)))
        .collect();
    let expected: Vec<f64> = points.iter().map(|p| graph.sample(*p).unwrap()).collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let graph = Arc::clone(&graph);
                let points = &points;
                scope.spawn(move || {
                    // Each thread owns its cache over the shared graph.
                    let cache = Cache::new(graph);
                    points
                        .iter()
                        .map(|p| cache.sample(*p).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn models_sample_through_graph() {
    let graph = Arc::new(Module::abs(Perlin::new().with_seed(12)));
    let plane = Plane::new(Arc::clone(&graph));
    let sphere = Sphere::new(Arc::clone(&graph));
    assert_eq!(
        plane.sample(0.3, 0.6),
        graph.sample(DVec3::new(0.3, 0.0, 0.6))
    );
    let value = sphere.sample(45.0, 30.0).unwrap();
    assert!(value >= 0.0);
}

#[test]
fn shared_source_feeds_two_parents() {
    let shared = Arc::new(Module::from(Perlin::new().with_seed(5)));
    let graph = Module::multiply(&shared, Module::abs(&shared));
    let point = DVec3::new(0.25, 0.5, 0.75);
    let value = shared.sample(point).unwrap();
    assert_eq!(
        format!("{:.12}", graph.sample(point).unwrap()),
        format!("{:.12}", value * value.abs())
    );
}
