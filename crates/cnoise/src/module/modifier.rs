use bevy_math::DVec3;

use crate::error::NoiseError;
use crate::module::{NoiseFunction, Source};

#[derive(Clone, Debug, Default)]
pub struct Abs {
    pub(crate) source: Source,
}

impl Abs {
    pub const NAME: &'static str = "abs";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl NoiseFunction for Abs {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let value = self.source.require(Self::NAME, "source")?.sample(point)?;
        Ok(value.abs())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Invert {
    pub(crate) source: Source,
}

impl Invert {
    pub const NAME: &'static str = "invert";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl NoiseFunction for Invert {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let value = self.source.require(Self::NAME, "source")?.sample(point)?;
        Ok(-value)
    }
}

/// `value * scale + bias`.
#[derive(Clone, Debug)]
pub struct ScaleBias {
    pub(crate) source: Source,
    scale: f64,
    bias: f64,
}

impl Default for ScaleBias {
    fn default() -> Self {
        Self {
            source: Source::empty(),
            scale: 1.0,
            bias: 0.0,
        }
    }
}

impl ScaleBias {
    pub const NAME: &'static str = "scale_bias";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl NoiseFunction for ScaleBias {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let value = self.source.require(Self::NAME, "source")?.sample(point)?;
        Ok(value * self.scale + self.bias)
    }
}

#[derive(Clone, Debug)]
pub struct Clamp {
    pub(crate) source: Source,
    lower: f64,
    upper: f64,
}

impl Default for Clamp {
    fn default() -> Self {
        Self {
            source: Source::empty(),
            lower: -1.0,
            upper: 1.0,
        }
    }
}

impl Clamp {
    pub const NAME: &'static str = "clamp";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Result<Self, NoiseError> {
        self.set_bounds(lower, upper)?;
        Ok(self)
    }

    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<(), NoiseError> {
        if lower > upper {
            return Err(NoiseError::InvalidBounds { lower, upper });
        }
        self.lower = lower;
        self.upper = upper;
        Ok(())
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }
}

impl NoiseFunction for Clamp {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let value = self.source.require(Self::NAME, "source")?.sample(point)?;
        Ok(value.clamp(self.lower, self.upper))
    }
}

/// Maps the source from `[-1, 1]` onto `[0, 1]`, raises it to `exponent` and
/// maps it back.
#[derive(Clone, Debug)]
pub struct Exponent {
    pub(crate) source: Source,
    exponent: f64,
}

impl Default for Exponent {
    fn default() -> Self {
        Self {
            source: Source::empty(),
            exponent: 1.0,
        }
    }
}

impl Exponent {
    pub const NAME: &'static str = "exponent";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent;
        self
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl NoiseFunction for Exponent {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let value = self.source.require(Self::NAME, "source")?.sample(point)?;
        Ok(((value + 1.0) / 2.0).abs().powf(self.exponent) * 2.0 - 1.0)
    }
}
