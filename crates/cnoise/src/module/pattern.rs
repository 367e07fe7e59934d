use bevy_math::DVec3;

use crate::error::NoiseError;
use crate::module::{NoiseFunction, warn_on_frequency};
use crate::noise::make_int32_range;

/// Alternating unit cubes of `1.0` and `-1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Checkerboard;

impl Checkerboard {
    pub const NAME: &'static str = "checkerboard";

    pub fn new() -> Self {
        Self
    }

    pub fn get(&self, point: DVec3) -> f64 {
        let ix = make_int32_range(point.x).floor() as i32;
        let iy = make_int32_range(point.y).floor() as i32;
        let iz = make_int32_range(point.z).floor() as i32;
        if (ix & 1) ^ (iy & 1) ^ (iz & 1) != 0 {
            -1.0
        } else {
            1.0
        }
    }
}

impl NoiseFunction for Checkerboard {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        Ok(self.get(point))
    }
}

#[inline]
fn shell_value(distance: f64) -> f64 {
    let inner = distance - distance.floor();
    let outer = 1.0 - inner;
    1.0 - inner.min(outer) * 4.0
}

/// Concentric spherical shells around the origin. Shell surfaces output
/// `1.0`, the midpoints between them `-1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Spheres {
    pub frequency: f64,
}

impl Default for Spheres {
    fn default() -> Self {
        Self { frequency: 1.0 }
    }
}

impl Spheres {
    pub const NAME: &'static str = "spheres";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        warn_on_frequency(Self::NAME, frequency);
        self.frequency = frequency;
        self
    }

    pub fn get(&self, point: DVec3) -> f64 {
        shell_value((point * self.frequency).length())
    }
}

impl NoiseFunction for Spheres {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        Ok(self.get(point))
    }
}

/// Concentric cylinders around the y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Cylinders {
    pub frequency: f64,
}

impl Default for Cylinders {
    fn default() -> Self {
        Self { frequency: 1.0 }
    }
}

impl Cylinders {
    pub const NAME: &'static str = "cylinders";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frequency(mut self, frequency: f64) -> Self {
        warn_on_frequency(Self::NAME, frequency);
        self.frequency = frequency;
        self
    }

    pub fn get(&self, point: DVec3) -> f64 {
        let x = point.x * self.frequency;
        let z = point.z * self.frequency;
        shell_value((x * x + z * z).sqrt())
    }
}

impl NoiseFunction for Cylinders {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        Ok(self.get(point))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Const {
    pub value: f64,
}

impl Const {
    pub const NAME: &'static str = "const";

    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn get(&self, _point: DVec3) -> f64 {
        self.value
    }
}

impl NoiseFunction for Const {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        Ok(self.get(point))
    }
}
