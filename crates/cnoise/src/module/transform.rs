use bevy_math::{DMat3, DVec3};

use crate::error::NoiseError;
use crate::math::DEG_TO_RAD;
use crate::module::{FractalSettings, NoiseFunction, Perlin, Source};

/// Samples the source at a point offset by three displacement modules.
#[derive(Clone, Debug, Default)]
pub struct Displace {
    pub(crate) source: Source,
    pub(crate) x_displace: Source,
    pub(crate) y_displace: Source,
    pub(crate) z_displace: Source,
}

impl Displace {
    pub const NAME: &'static str = "displace";

    pub fn new(
        source: impl Into<Source>,
        x_displace: impl Into<Source>,
        y_displace: impl Into<Source>,
        z_displace: impl Into<Source>,
    ) -> Self {
        Self {
            source: source.into(),
            x_displace: x_displace.into(),
            y_displace: y_displace.into(),
            z_displace: z_displace.into(),
        }
    }
}

impl NoiseFunction for Displace {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let source = self.source.require(Self::NAME, "source")?;
        let offset = DVec3::new(
            self.x_displace.require(Self::NAME, "x_displace")?.sample(point)?,
            self.y_displace.require(Self::NAME, "y_displace")?.sample(point)?,
            self.z_displace.require(Self::NAME, "z_displace")?.sample(point)?,
        );
        source.sample(point + offset)
    }
}

// Offsets keep the distortion noise away from lattice points, where it is
// always zero.
const X_DISTORT_OFFSET: DVec3 =
    DVec3::new(12414.0 / 65536.0, 65124.0 / 65536.0, 31337.0 / 65536.0);
const Y_DISTORT_OFFSET: DVec3 =
    DVec3::new(26519.0 / 65536.0, 18128.0 / 65536.0, 60493.0 / 65536.0);
const Z_DISTORT_OFFSET: DVec3 =
    DVec3::new(53820.0 / 65536.0, 11213.0 / 65536.0, 44845.0 / 65536.0);
const DEFAULT_ROUGHNESS: usize = 3;

/// Randomly displaces the input point with three internal Perlin generators.
#[derive(Clone, Debug)]
pub struct Turbulence {
    pub(crate) source: Source,
    power: f64,
    x_distort: Perlin,
    y_distort: Perlin,
    z_distort: Perlin,
}

impl Default for Turbulence {
    fn default() -> Self {
        let distort = Perlin::from_valid_settings(FractalSettings {
            octave_count: DEFAULT_ROUGHNESS,
            ..Default::default()
        });
        let mut turbulence = Self {
            source: Source::empty(),
            power: 1.0,
            x_distort: distort.clone(),
            y_distort: distort.clone(),
            z_distort: distort,
        };
        turbulence.set_seed(0);
        turbulence
    }
}

impl Turbulence {
    pub const NAME: &'static str = "turbulence";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Scale of the displacement.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.x_distort = self.x_distort.with_frequency(frequency);
        self.y_distort = self.y_distort.with_frequency(frequency);
        self.z_distort = self.z_distort.with_frequency(frequency);
        self
    }

    /// Octave count of the distortion noise.
    pub fn with_roughness(mut self, roughness: usize) -> Result<Self, NoiseError> {
        self.x_distort.set_octave_count(roughness)?;
        self.y_distort.set_octave_count(roughness)?;
        self.z_distort.set_octave_count(roughness)?;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.set_seed(seed);
        self
    }

    fn set_seed(&mut self, seed: i32) {
        self.x_distort = std::mem::take(&mut self.x_distort).with_seed(seed);
        self.y_distort = std::mem::take(&mut self.y_distort).with_seed(seed.wrapping_add(1));
        self.z_distort = std::mem::take(&mut self.z_distort).with_seed(seed.wrapping_add(2));
    }

    pub fn power(&self) -> f64 {
        self.power
    }

    pub fn frequency(&self) -> f64 {
        self.x_distort.settings().frequency
    }

    pub fn roughness(&self) -> usize {
        self.x_distort.settings().octave_count
    }

    pub fn seed(&self) -> i32 {
        self.x_distort.settings().seed
    }
}

impl NoiseFunction for Turbulence {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let source = self.source.require(Self::NAME, "source")?;
        let distorted = DVec3::new(
            point.x + self.x_distort.get(point + X_DISTORT_OFFSET) * self.power,
            point.y + self.y_distort.get(point + Y_DISTORT_OFFSET) * self.power,
            point.z + self.z_distort.get(point + Z_DISTORT_OFFSET) * self.power,
        );
        source.sample(distorted)
    }
}

#[derive(Clone, Debug, Default)]
pub struct TranslatePoint {
    pub(crate) source: Source,
    translation: DVec3,
}

impl TranslatePoint {
    pub const NAME: &'static str = "translate_point";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            translation: DVec3::ZERO,
        }
    }

    pub fn with_translation(mut self, translation: DVec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn translation(&self) -> DVec3 {
        self.translation
    }
}

impl NoiseFunction for TranslatePoint {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        self.source
            .require(Self::NAME, "source")?
            .sample(point + self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct ScalePoint {
    pub(crate) source: Source,
    scale: DVec3,
}

impl Default for ScalePoint {
    fn default() -> Self {
        Self {
            source: Source::empty(),
            scale: DVec3::ONE,
        }
    }
}

impl ScalePoint {
    pub const NAME: &'static str = "scale_point";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            scale: DVec3::ONE,
        }
    }

    pub fn with_scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn scale(&self) -> DVec3 {
        self.scale
    }
}

impl NoiseFunction for ScalePoint {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        self.source
            .require(Self::NAME, "source")?
            .sample(point * self.scale)
    }
}

/// Rotates the input point around the origin. Angles are in degrees.
#[derive(Clone, Debug)]
pub struct RotatePoint {
    pub(crate) source: Source,
    angles: DVec3,
    matrix: DMat3,
}

impl Default for RotatePoint {
    fn default() -> Self {
        Self {
            source: Source::empty(),
            angles: DVec3::ZERO,
            matrix: rotation_matrix(DVec3::ZERO),
        }
    }
}

fn rotation_matrix(angles: DVec3) -> DMat3 {
    let (x_sin, x_cos) = (angles.x * DEG_TO_RAD).sin_cos();
    let (y_sin, y_cos) = (angles.y * DEG_TO_RAD).sin_cos();
    let (z_sin, z_cos) = (angles.z * DEG_TO_RAD).sin_cos();

    let row1 = DVec3::new(
        y_sin * x_sin * z_sin + y_cos * z_cos,
        x_cos * z_sin,
        y_sin * z_cos - y_cos * x_sin * z_sin,
    );
    let row2 = DVec3::new(
        y_sin * x_sin * z_cos - y_cos * z_sin,
        x_cos * z_cos,
        -y_cos * x_sin * z_cos - y_sin * z_sin,
    );
    let row3 = DVec3::new(-y_sin * x_cos, x_sin, y_cos * x_cos);
    DMat3::from_cols(row1, row2, row3).transpose()
}

impl RotatePoint {
    pub const NAME: &'static str = "rotate_point";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_angles(mut self, x_angle: f64, y_angle: f64, z_angle: f64) -> Self {
        self.set_angles(x_angle, y_angle, z_angle);
        self
    }

    pub fn set_angles(&mut self, x_angle: f64, y_angle: f64, z_angle: f64) {
        self.angles = DVec3::new(x_angle, y_angle, z_angle);
        self.matrix = rotation_matrix(self.angles);
    }

    pub fn angles(&self) -> DVec3 {
        self.angles
    }
}

impl NoiseFunction for RotatePoint {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        self.source
            .require(Self::NAME, "source")?
            .sample(self.matrix * point)
    }
}
