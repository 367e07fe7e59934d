//! Samples a terrain-like module graph over a square grid.
//!
//! Builds the graph once, validates it, then evaluates every grid point
//! through a planar or spherical model and reports value statistics and
//! timings.
//!
//! Usage:
//!   cargo run --release --example sample_graph -p cnoise -- [OPTIONS]
//!
//! Options:
//!   --seed SEED          Base seed (default: 0)
//!   --size N             Grid side length (default: 256)
//!   --model NAME         plane or sphere (default: plane)
//!   --quality NAME       fast, standard or best (default: standard)
//!   --cache              Wrap the graph root in a cache
//!   --preview            Print a coarse ASCII preview of the grid
//!
//! Set `RUST_LOG=cnoise=debug` to see graph construction events.

use std::sync::Arc;
use std::time::{Duration, Instant};

use cnoise::model::{Plane, Sphere};
use cnoise::module::{Billow, ControlPoint, Perlin, RidgedMulti};
use cnoise::{Cache, Module, NoiseError, NoiseFunction, NoiseQuality};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, PartialEq)]
enum Model {
    Plane,
    Sphere,
}

fn build_graph(seed: i32, quality: NoiseQuality) -> Result<Module, NoiseError> {
    let mountains = Module::scale_bias(
        RidgedMulti::new()
            .with_quality(quality)
            .with_seed(seed)
            .with_octave_count(6)?,
        0.75,
        0.25,
    );
    let plains = Module::scale_bias(
        Billow::new()
            .with_frequency(2.0)
            .with_quality(quality)
            .with_seed(seed),
        0.125,
        -0.75,
    );
    let control = Perlin::new()
        .with_frequency(0.5)
        .with_persistence(0.25)
        .with_quality(quality)
        .with_seed(seed.wrapping_add(1));
    let base = Module::select(plains, mountains, control, 0.0, 1000.0, 0.125)?;
    let rough = Module::turbulence(base, 0.125, 4.0, 3, seed.wrapping_add(2))?;
    let shaped = Module::curve(
        rough,
        [
            ControlPoint::new(-2.0, -2.0),
            ControlPoint::new(-1.0, -0.875),
            ControlPoint::new(0.0, -0.125),
            ControlPoint::new(0.5, 0.25),
            ControlPoint::new(1.0, 0.75),
            ControlPoint::new(2.0, 2.0),
        ],
    )?;
    Module::clamp(shaped, -1.0, 1.0)
}

fn sample_grid<F: NoiseFunction>(
    source: F,
    model: Model,
    size: usize,
) -> Result<(Vec<f64>, Vec<Duration>), NoiseError> {
    let mut values = Vec::with_capacity(size * size);
    let mut row_times = Vec::with_capacity(size);
    let plane = Plane::new(&source);
    let sphere = Sphere::new(&source);
    let step = 1.0 / size as f64;
    for row in 0..size {
        let t = Instant::now();
        for col in 0..size {
            let u = col as f64 * step;
            let v = row as f64 * step;
            let value = match model {
                Model::Plane => plane.sample(u * 4.0, v * 4.0)?,
                Model::Sphere => sphere.sample(v * 180.0 - 90.0, u * 360.0 - 180.0)?,
            };
            values.push(value);
        }
        row_times.push(t.elapsed());
    }
    Ok((values, row_times))
}

fn fmt_duration(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.3}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.3}ms", d.as_secs_f64() * 1e3)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1e6)
    }
}

fn print_preview(values: &[f64], size: usize) {
    const RAMP: &[u8] = b" .:-=+*#%@";
    let stride = (size / 64).max(1);
    for row in (0..size).step_by(stride * 2) {
        let line: String = (0..size)
            .step_by(stride)
            .map(|col| {
                let t = (values[row * size + col] + 1.0) * 0.5;
                let index = (t * (RAMP.len() - 1) as f64).round() as usize;
                RAMP[index.min(RAMP.len() - 1)] as char
            })
            .collect();
        println!("{line}");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut seed: i32 = 0;
    let mut size: usize = 256;
    let mut model = Model::Plane;
    let mut quality = NoiseQuality::Standard;
    let mut use_cache = false;
    let mut preview = false;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("Invalid seed");
            }
            "--size" => {
                i += 1;
                size = args[i].parse().expect("Invalid size");
                if size < 1 {
                    panic!("Size must be >= 1");
                }
            }
            "--model" => {
                i += 1;
                model = match args[i].as_str() {
                    "plane" => Model::Plane,
                    "sphere" => Model::Sphere,
                    other => panic!("Unknown model: {}", other),
                };
            }
            "--quality" => {
                i += 1;
                quality = match args[i].as_str() {
                    "fast" => NoiseQuality::Fast,
                    "standard" => NoiseQuality::Standard,
                    "best" => NoiseQuality::Best,
                    other => panic!("Unknown quality: {}", other),
                };
            }
            "--cache" => use_cache = true,
            "--preview" => preview = true,
            "--help" | "-h" => {
                eprintln!(
                    "Usage: sample_graph [--seed SEED] [--size N] [--model plane|sphere] [--quality fast|standard|best] [--cache] [--preview]"
                );
                eprintln!();
                eprintln!("Defaults: seed=0, size=256, model=plane, quality=standard");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let t_build = Instant::now();
    let graph = Arc::new(build_graph(seed, quality).expect("Invalid graph configuration"));
    graph.validate().expect("Incomplete graph");
    eprintln!("Built graph in {}", fmt_duration(t_build.elapsed()));

    let t_total = Instant::now();
    let result = if use_cache {
        sample_grid(Cache::new(Arc::clone(&graph)), model, size)
    } else {
        sample_grid(Arc::clone(&graph), model, size)
    };
    let (values, mut row_times) = result.expect("Sampling failed");
    let wall_time = t_total.elapsed();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len() as f64;

    row_times.sort();
    let median = row_times[row_times.len() / 2];

    if preview {
        print_preview(&values, size);
    }

    eprintln!();
    eprintln!("=== Results ({}x{} samples) ===", size, size);
    eprintln!("  Wall time:  {}", fmt_duration(wall_time));
    eprintln!("  Row median: {}", fmt_duration(median));
    eprintln!(
        "  Per sample: {}",
        fmt_duration(wall_time / (size * size) as u32)
    );
    eprintln!("  Min: {:.4}  Max: {:.4}  Mean: {:.4}", min, max, mean);
}
