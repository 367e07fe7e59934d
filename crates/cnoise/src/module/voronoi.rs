use bevy_math::DVec3;

use crate::error::NoiseError;
use crate::math::SQRT_3;
use crate::module::{NoiseFunction, warn_on_frequency};
use crate::noise::{lattice_floor, value_noise_3d};

/// Cellular noise. Every unit cell holds one jittered seed point; the output
/// is a random value for the nearest seed point, optionally plus the
/// distance to it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Voronoi {
    pub frequency: f64,
    /// Scale of the per-cell random value.
    pub displacement: f64,
    pub seed: i32,
    /// Adds the distance to the nearest seed point to the output.
    pub enable_distance: bool,
}

impl Default for Voronoi {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            displacement: 1.0,
            seed: 0,
            enable_distance: false,
        }
    }
}

impl Voronoi {
    pub const NAME: &'static str = "voronoi";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        warn_on_frequency(Self::NAME, frequency);
        self.frequency = frequency;
        self
    }

    pub fn with_displacement(mut self, displacement: f64) -> Self {
        self.displacement = displacement;
        self
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_distance(mut self, enable_distance: bool) -> Self {
        self.enable_distance = enable_distance;
        self
    }

    /// Seed point of the cell at `(x, y, z)`.
    #[inline]
    fn seed_point(&self, x: i32, y: i32, z: i32) -> DVec3 {
        DVec3::new(
            x as f64 + value_noise_3d(x, y, z, self.seed),
            y as f64 + value_noise_3d(x, y, z, self.seed.wrapping_add(1)),
            z as f64 + value_noise_3d(x, y, z, self.seed.wrapping_add(2)),
        )
    }

    pub fn get(&self, point: DVec3) -> f64 {
        let point = point * self.frequency;
        let x_int = lattice_floor(point.x);
        let y_int = lattice_floor(point.y);
        let z_int = lattice_floor(point.z);

        // Ties keep the first cell found scanning z, then y, then x upwards.
        let mut min_dist = i32::MAX as f64;
        let mut candidate = DVec3::ZERO;
        for z in z_int.wrapping_sub(2)..=z_int.wrapping_add(2) {
            for y in y_int.wrapping_sub(2)..=y_int.wrapping_add(2) {
                for x in x_int.wrapping_sub(2)..=x_int.wrapping_add(2) {
                    let seed_point = self.seed_point(x, y, z);
                    let d = seed_point - point;
                    let dist = d.x * d.x + d.y * d.y + d.z * d.z;
                    if dist < min_dist {
                        min_dist = dist;
                        candidate = seed_point;
                    }
                }
            }
        }

        let value = if self.enable_distance {
            let d = candidate - point;
            (d.x * d.x + d.y * d.y + d.z * d.z).sqrt() * SQRT_3 - 1.0
        } else {
            0.0
        };

        value
            + self.displacement
                * value_noise_3d(
                    candidate.x.floor() as i32,
                    candidate.y.floor() as i32,
                    candidate.z.floor() as i32,
                    0,
                )
    }
}

impl NoiseFunction for Voronoi {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        Ok(self.get(point))
    }
}

#[cfg(test)]
mod test {
    use bevy_math::DVec3;

    use crate::module::voronoi::Voronoi;

    #[test]
    fn defaults() {
        let voronoi = Voronoi::new();
        assert_eq!(voronoi.frequency, 1.0);
        assert_eq!(voronoi.displacement, 1.0);
        assert_eq!(voronoi.seed, 0);
        assert!(!voronoi.enable_distance);
    }

    #[test]
    fn sample() {
        let plain = Voronoi::new();
        let distance = Voronoi::new().with_distance(true);
        let scaled = Voronoi::new().with_frequency(2.0).with_seed(3);
        let cases = [
            (
                DVec3::ZERO,
                0.37672762479633093,
                0.20044956470533704,
                -0.2817909838631749,
            ),
            (
                DVec3::new(0.5, 1.25, -3.75),
                0.16861711349338293,
                0.40062738249300867,
                0.7189528932794929,
            ),
            (
                DVec3::new(10.1, -4.2, 7.7),
                0.5688872085884213,
                0.8861803031291651,
                -0.7942157322540879,
            ),
        ];
        for (point, expected_plain, expected_distance, expected_scaled) in cases {
            assert_eq!(
                format!("{:.10}", plain.get(point)),
                format!("{:.10}", expected_plain)
            );
            assert_eq!(
                format!("{:.10}", distance.get(point)),
                format!("{:.10}", expected_distance)
            );
            assert_eq!(
                format!("{:.10}", scaled.get(point)),
                format!("{:.10}", expected_scaled)
            );
        }
    }

    #[test]
    fn constant_within_cells() {
        // Without the distance term the output only changes across cell
        // borders, so nearby points mostly agree.
        let voronoi = Voronoi::new().with_frequency(0.5);
        let a = voronoi.get(DVec3::new(3.30, 1.10, -2.20));
        let b = voronoi.get(DVec3::new(3.30001, 1.10001, -2.20001));
        assert_eq!(a, b);
    }

    #[test]
    fn displacement_scales_output() {
        let point = DVec3::new(0.5, 1.25, -3.75);
        let unit = Voronoi::new().get(point);
        let zero = Voronoi::new().with_displacement(0.0).get(point);
        let double = Voronoi::new().with_displacement(2.0).get(point);
        assert_eq!(zero, 0.0);
        assert_eq!(double, 2.0 * unit);
    }

    #[test]
    fn far_from_origin() {
        for x in [-3.0e9, -2.5e9, -2.0e9, 2.0e9, 3.0e9] {
            for voronoi in [Voronoi::new(), Voronoi::new().with_distance(true)] {
                let point = DVec3::new(x, 0.5, 0.5);
                let value = voronoi.get(point);
                assert!(value.is_finite(), "{value} at {point}");
                assert_eq!(value, voronoi.get(point));
            }
        }
    }
}
