use bevy_math::DVec3;
use tracing::debug;

use crate::error::NoiseError;
use crate::module::{MAX_OCTAVES, NoiseFunction, warn_on_frequency};
use crate::noise::{NoiseQuality, gradient_coherent_noise_3d, make_int32_range};

const RIDGED_OFFSET: f64 = 1.0;
const RIDGED_GAIN: f64 = 2.0;
const RIDGED_EXPONENT: f64 = 1.0;

/// Parameters shared by the fractal generators.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FractalSettings {
    /// Frequency of the first octave.
    pub frequency: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    pub quality: NoiseQuality,
    /// Number of octaves, in `[1, 30]`.
    pub octave_count: usize,
    /// Amplitude multiplier between successive octaves. RidgedMulti ignores it.
    pub persistence: f64,
    pub seed: i32,
}

impl Default for FractalSettings {
    fn default() -> Self {
        Self {
            frequency: 1.0,
            lacunarity: 2.0,
            quality: NoiseQuality::Standard,
            octave_count: 6,
            persistence: 0.5,
            seed: 0,
        }
    }
}

impl FractalSettings {
    pub fn validate(&self) -> Result<(), NoiseError> {
        check_octave_count(self.octave_count)
    }
}

fn check_octave_count(count: usize) -> Result<(), NoiseError> {
    if (1..=MAX_OCTAVES).contains(&count) {
        Ok(())
    } else {
        Err(NoiseError::InvalidOctaveCount { count })
    }
}

#[inline(always)]
pub(crate) fn octave_seed(seed: i32, octave: usize) -> i32 {
    seed.wrapping_add(octave as i32) & 0x7fffffff
}

#[inline(always)]
fn octave_signal(point: DVec3, seed: i32, quality: NoiseQuality) -> f64 {
    gradient_coherent_noise_3d(
        make_int32_range(point.x),
        make_int32_range(point.y),
        make_int32_range(point.z),
        seed,
        quality,
    )
}

/// Sum of octaves of gradient coherent noise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Perlin {
    settings: FractalSettings,
}

impl Perlin {
    pub const NAME: &'static str = "perlin";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: FractalSettings) -> Result<Self, NoiseError> {
        settings.validate()?;
        warn_on_frequency(Self::NAME, settings.frequency);
        Ok(Self { settings })
    }

    pub(crate) fn from_valid_settings(settings: FractalSettings) -> Self {
        debug_assert!(settings.validate().is_ok());
        Self { settings }
    }

    pub fn settings(&self) -> &FractalSettings {
        &self.settings
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        warn_on_frequency(Self::NAME, frequency);
        self.settings.frequency = frequency;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.settings.lacunarity = lacunarity;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.settings.persistence = persistence;
        self
    }

    pub fn with_quality(mut self, quality: NoiseQuality) -> Self {
        self.settings.quality = quality;
        self
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn with_octave_count(mut self, count: usize) -> Result<Self, NoiseError> {
        self.set_octave_count(count)?;
        Ok(self)
    }

    pub fn set_octave_count(&mut self, count: usize) -> Result<(), NoiseError> {
        check_octave_count(count)?;
        self.settings.octave_count = count;
        Ok(())
    }

    pub fn get(&self, point: DVec3) -> f64 {
        let settings = &self.settings;
        let mut point = point * settings.frequency;
        let mut value = 0.0;
        let mut persistence = 1.0;
        for octave in 0..settings.octave_count {
            let signal = octave_signal(
                point,
                octave_seed(settings.seed, octave),
                settings.quality,
            );
            value += signal * persistence;
            point *= settings.lacunarity;
            persistence *= settings.persistence;
        }
        value
    }
}

impl NoiseFunction for Perlin {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        Ok(self.get(point))
    }
}

/// Perlin variant that folds every octave with `2|s| - 1`, giving rounded
/// lumps.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Billow {
    settings: FractalSettings,
}

impl Billow {
    pub const NAME: &'static str = "billow";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: FractalSettings) -> Result<Self, NoiseError> {
        settings.validate()?;
        warn_on_frequency(Self::NAME, settings.frequency);
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &FractalSettings {
        &self.settings
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        warn_on_frequency(Self::NAME, frequency);
        self.settings.frequency = frequency;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.settings.lacunarity = lacunarity;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.settings.persistence = persistence;
        self
    }

    pub fn with_quality(mut self, quality: NoiseQuality) -> Self {
        self.settings.quality = quality;
        self
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn with_octave_count(mut self, count: usize) -> Result<Self, NoiseError> {
        self.set_octave_count(count)?;
        Ok(self)
    }

    pub fn set_octave_count(&mut self, count: usize) -> Result<(), NoiseError> {
        check_octave_count(count)?;
        self.settings.octave_count = count;
        Ok(())
    }

    pub fn get(&self, point: DVec3) -> f64 {
        let settings = &self.settings;
        let mut point = point * settings.frequency;
        let mut value = 0.0;
        let mut persistence = 1.0;
        for octave in 0..settings.octave_count {
            let signal = octave_signal(
                point,
                octave_seed(settings.seed, octave),
                settings.quality,
            );
            let signal = 2.0 * signal.abs() - 1.0;
            value += signal * persistence;
            point *= settings.lacunarity;
            persistence *= settings.persistence;
        }
        value + 0.5
    }
}

impl NoiseFunction for Billow {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        Ok(self.get(point))
    }
}

/// Ridged multifractal noise. Each octave is weighted by the previous one,
/// so ridges get sharper detail than valleys.
#[derive(Clone, Debug, PartialEq)]
pub struct RidgedMulti {
    settings: FractalSettings,
    spectral_weights: [f64; MAX_OCTAVES],
}

impl Default for RidgedMulti {
    fn default() -> Self {
        let settings = FractalSettings::default();
        Self {
            spectral_weights: spectral_weights(settings.lacunarity),
            settings,
        }
    }
}

fn spectral_weights(lacunarity: f64) -> [f64; MAX_OCTAVES] {
    let mut weights = [0.0; MAX_OCTAVES];
    let mut frequency = 1.0f64;
    for weight in weights.iter_mut() {
        *weight = frequency.powf(-RIDGED_EXPONENT);
        frequency *= lacunarity;
    }
    weights
}

impl RidgedMulti {
    pub const NAME: &'static str = "ridged_multi";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: FractalSettings) -> Result<Self, NoiseError> {
        settings.validate()?;
        warn_on_frequency(Self::NAME, settings.frequency);
        Ok(Self {
            spectral_weights: spectral_weights(settings.lacunarity),
            settings,
        })
    }

    pub fn settings(&self) -> &FractalSettings {
        &self.settings
    }

    pub fn spectral_weights(&self) -> &[f64; MAX_OCTAVES] {
        &self.spectral_weights
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        warn_on_frequency(Self::NAME, frequency);
        self.settings.frequency = frequency;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.set_lacunarity(lacunarity);
        self
    }

    /// Sets the lacunarity and rebuilds the spectral weights from it.
    pub fn set_lacunarity(&mut self, lacunarity: f64) {
        self.settings.lacunarity = lacunarity;
        self.spectral_weights = spectral_weights(lacunarity);
        debug!(lacunarity, "Recomputed ridged multifractal spectral weights");
    }

    pub fn with_quality(mut self, quality: NoiseQuality) -> Self {
        self.settings.quality = quality;
        self
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.settings.seed = seed;
        self
    }

    pub fn with_octave_count(mut self, count: usize) -> Result<Self, NoiseError> {
        self.set_octave_count(count)?;
        Ok(self)
    }

    pub fn set_octave_count(&mut self, count: usize) -> Result<(), NoiseError> {
        check_octave_count(count)?;
        self.settings.octave_count = count;
        Ok(())
    }

    pub fn get(&self, point: DVec3) -> f64 {
        let settings = &self.settings;
        let mut point = point * settings.frequency;
        let mut value = 0.0;
        let mut weight = 1.0;
        for octave in 0..settings.octave_count {
            let signal = octave_signal(
                point,
                octave_seed(settings.seed, octave),
                settings.quality,
            );
            let mut signal = RIDGED_OFFSET - signal.abs();
            signal *= signal;
            signal *= weight;

            weight = (signal * RIDGED_GAIN).clamp(0.0, 1.0);

            value += signal * self.spectral_weights[octave];
            point *= settings.lacunarity;
        }
        (value * 1.25) - 1.0
    }
}

impl NoiseFunction for RidgedMulti {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        Ok(self.get(point))
    }
}

#[cfg(test)]
mod test {
    use bevy_math::DVec3;
    use cnoise_random::{Random, XoroshiroRandom};

    use crate::error::NoiseError;
    use crate::module::fractal::{
        Billow, FractalSettings, Perlin, RidgedMulti, octave_seed, spectral_weights,
    };
    use crate::noise::NoiseQuality;

    #[test]
    fn default_settings() {
        let settings = FractalSettings::default();
        assert_eq!(settings.frequency, 1.0);
        assert_eq!(settings.lacunarity, 2.0);
        assert_eq!(settings.quality, NoiseQuality::Standard);
        assert_eq!(settings.octave_count, 6);
        assert_eq!(settings.persistence, 0.5);
        assert_eq!(settings.seed, 0);
        assert_eq!(Perlin::new().settings(), &settings);
    }

    #[test]
    fn octave_count_range() {
        for count in [0, 31, 100] {
            assert_eq!(
                Perlin::new().with_octave_count(count),
                Err(NoiseError::InvalidOctaveCount { count })
            );
            assert!(Billow::new().with_octave_count(count).is_err());
            assert!(RidgedMulti::new().with_octave_count(count).is_err());
        }
        assert!(Perlin::new().with_octave_count(1).is_ok());
        assert!(Perlin::new().with_octave_count(30).is_ok());
        let settings = FractalSettings {
            octave_count: 0,
            ..Default::default()
        };
        assert!(Billow::from_settings(settings).is_err());
    }

    #[test]
    fn octave_seeds_are_masked() {
        assert_eq!(octave_seed(0, 3), 3);
        assert_eq!(octave_seed(-1, 0), 0x7fffffff);
        assert_eq!(octave_seed(i32::MAX, 1), 0);
    }

    #[test]
    fn lattice_points() {
        // Gradient noise vanishes on the lattice, so only the constant
        // terms of each generator survive.
        for point in [DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0), DVec3::new(-4.0, 0.0, 9.0)] {
            assert_eq!(Perlin::new().get(point), 0.0);
            assert_eq!(format!("{:.8}", Billow::new().get(point)), "-1.46875000");
            assert_eq!(format!("{:.8}", RidgedMulti::new().get(point)), "1.46093750");
        }
    }

    #[test]
    fn off_lattice_golden() {
        let point = DVec3::new(0.37, -1.9, 4.25);
        assert_eq!(format!("{:.12}", Perlin::new().get(point)), "0.547489439267");
        assert_eq!(
            format!("{:.12}", Perlin::new().with_seed(7).get(point)),
            "-0.672242945731"
        );
        assert_eq!(format!("{:.12}", Billow::new().get(point)), "-0.321019927201");
        assert_eq!(format!("{:.12}", RidgedMulti::new().get(point)), "0.204633617990");

        let perlin = Perlin::new().with_frequency(0.5).with_seed(12);
        assert_eq!(
            format!("{:.10}", perlin.get(DVec3::new(1.25, 0.75, -2.6))),
            "0.0811455790"
        );
        let ridged = RidgedMulti::new().with_seed(3).with_octave_count(5).unwrap();
        assert_eq!(
            format!("{:.10}", ridged.get(DVec3::new(2.3, 0.4, -7.1))),
            "-0.0773878235"
        );
        let billow = Billow::new().with_quality(NoiseQuality::Best).with_seed(-4);
        assert_eq!(
            format!("{:.10}", billow.get(DVec3::new(-3.3, 8.1, 0.55))),
            "-0.2075044193"
        );
    }

    #[test]
    fn deterministic_and_seeded() {
        let mut random = XoroshiroRandom::new(8);
        let a = Perlin::new().with_seed(12);
        let b = Perlin::new().with_seed(12);
        let c = Perlin::new().with_seed(13);
        let mut differing = 0;
        for _ in 0..64 {
            let point = DVec3::new(
                random.next_f64_range(-10.0, 10.0),
                random.next_f64_range(-10.0, 10.0),
                random.next_f64_range(-10.0, 10.0),
            );
            assert_eq!(a.get(point), b.get(point));
            if a.get(point) != c.get(point) {
                differing += 1;
            }
        }
        assert!(differing > 32);
    }

    #[test]
    fn billow_folds_perlin_octave() {
        let point = DVec3::new(0.37, -1.9, 4.25);
        let perlin = Perlin::new().with_octave_count(1).unwrap().with_seed(5);
        let billow = Billow::new().with_octave_count(1).unwrap().with_seed(5);
        let expected = 2.0 * perlin.get(point).abs() - 1.0 + 0.5;
        assert_eq!(format!("{:.12}", billow.get(point)), format!("{:.12}", expected));
    }

    #[test]
    fn ridged_spectral_weights() {
        let weights = spectral_weights(2.0);
        assert_eq!(weights[0], 1.0);
        assert_eq!(weights[1], 0.5);
        assert_eq!(weights[5], 1.0 / 32.0);

        let mut ridged = RidgedMulti::new();
        ridged.set_lacunarity(3.0);
        assert_eq!(ridged.settings().lacunarity, 3.0);
        assert_eq!(
            format!("{:.10}", ridged.spectral_weights()[2]),
            format!("{:.10}", 1.0 / 9.0)
        );
        let rebuilt = RidgedMulti::from_settings(FractalSettings {
            lacunarity: 3.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(ridged, rebuilt);
    }

    #[test]
    fn ridged_single_octave() {
        let point = DVec3::new(2.3, 0.4, -7.1);
        let ridged = RidgedMulti::new().with_octave_count(1).unwrap();
        let signal = Perlin::new().with_octave_count(1).unwrap().get(point);
        let expected = (1.0 - signal.abs()).powi(2) * 1.25 - 1.0;
        assert_eq!(format!("{:.12}", ridged.get(point)), format!("{:.12}", expected));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn settings_from_json() {
        let settings: FractalSettings =
            serde_json::from_str(r#"{"frequency": 4.0, "quality": "best", "seed": 7}"#).unwrap();
        assert_eq!(settings.frequency, 4.0);
        assert_eq!(settings.quality, NoiseQuality::Best);
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.octave_count, 6);
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(serde_json::from_str::<FractalSettings>(&json).unwrap(), settings);
    }
}
