use bevy_math::DVec3;

use crate::error::NoiseError;
use crate::math::{linear_interp, s_curve3};
use crate::module::{NoiseFunction, Source};

macro_rules! two_source_module {
    ($(#[$meta:meta])* $name:ident, $label:literal, |$a:ident, $b:ident| $combine:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        pub struct $name {
            pub(crate) source1: Source,
            pub(crate) source2: Source,
        }

        impl $name {
            pub const NAME: &'static str = $label;

            pub fn new(source1: impl Into<Source>, source2: impl Into<Source>) -> Self {
                Self {
                    source1: source1.into(),
                    source2: source2.into(),
                }
            }
        }

        impl NoiseFunction for $name {
            fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
                let $a = self.source1.require(Self::NAME, "source1")?.sample(point)?;
                let $b = self.source2.require(Self::NAME, "source2")?.sample(point)?;
                Ok($combine)
            }
        }
    };
}

two_source_module!(Add, "add", |a, b| a + b);
two_source_module!(Multiply, "multiply", |a, b| a * b);
two_source_module!(Max, "max", |a, b| a.max(b));
two_source_module!(Min, "min", |a, b| a.min(b));
two_source_module!(
    /// `source1` raised to the power of `source2`.
    Power,
    "power",
    |a, b| a.powf(b)
);

/// Weighted blend of two sources. A control value of `-1` gives `source1`,
/// `1` gives `source2`.
#[derive(Clone, Debug, Default)]
pub struct Blend {
    pub(crate) source1: Source,
    pub(crate) source2: Source,
    pub(crate) control: Source,
}

impl Blend {
    pub const NAME: &'static str = "blend";

    pub fn new(
        source1: impl Into<Source>,
        source2: impl Into<Source>,
        control: impl Into<Source>,
    ) -> Self {
        Self {
            source1: source1.into(),
            source2: source2.into(),
            control: control.into(),
        }
    }
}

impl NoiseFunction for Blend {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let v0 = self.source1.require(Self::NAME, "source1")?.sample(point)?;
        let v1 = self.source2.require(Self::NAME, "source2")?.sample(point)?;
        let alpha = (self.control.require(Self::NAME, "control")?.sample(point)? + 1.0) / 2.0;
        Ok(linear_interp(v0, v1, alpha))
    }
}

/// Picks `source2` where the control value lies inside `[lower, upper]` and
/// `source1` elsewhere, with an optional smooth transition of width
/// `2 * falloff` around each bound.
#[derive(Clone, Debug)]
pub struct Select {
    pub(crate) source1: Source,
    pub(crate) source2: Source,
    pub(crate) control: Source,
    lower: f64,
    upper: f64,
    falloff: f64,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            source1: Source::empty(),
            source2: Source::empty(),
            control: Source::empty(),
            lower: -1.0,
            upper: 1.0,
            falloff: 0.0,
        }
    }
}

impl Select {
    pub const NAME: &'static str = "select";

    pub fn new(
        source1: impl Into<Source>,
        source2: impl Into<Source>,
        control: impl Into<Source>,
    ) -> Self {
        Self {
            source1: source1.into(),
            source2: source2.into(),
            control: control.into(),
            ..Default::default()
        }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Result<Self, NoiseError> {
        self.set_bounds(lower, upper)?;
        Ok(self)
    }

    /// Sets the selection range. The falloff is shrunk if it no longer fits.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) -> Result<(), NoiseError> {
        if lower > upper {
            return Err(NoiseError::InvalidBounds { lower, upper });
        }
        self.lower = lower;
        self.upper = upper;
        self.set_falloff(self.falloff);
        Ok(())
    }

    pub fn with_falloff(mut self, falloff: f64) -> Self {
        self.set_falloff(falloff);
        self
    }

    /// The two transitions may not overlap, so the falloff is capped at half
    /// the selection range.
    pub fn set_falloff(&mut self, falloff: f64) {
        let half_range = (self.upper - self.lower) / 2.0;
        self.falloff = if falloff > half_range {
            half_range
        } else {
            falloff
        };
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    pub fn falloff(&self) -> f64 {
        self.falloff
    }
}

impl NoiseFunction for Select {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let control = self.control.require(Self::NAME, "control")?.sample(point)?;
        let source1 = self.source1.require(Self::NAME, "source1")?;
        let source2 = self.source2.require(Self::NAME, "source2")?;
        let (lower, upper, falloff) = (self.lower, self.upper, self.falloff);

        if falloff > 0.0 {
            if control < lower - falloff {
                source1.sample(point)
            } else if control < lower + falloff {
                let lower_curve = lower - falloff;
                let upper_curve = lower + falloff;
                let alpha = s_curve3((control - lower_curve) / (upper_curve - lower_curve));
                Ok(linear_interp(
                    source1.sample(point)?,
                    source2.sample(point)?,
                    alpha,
                ))
            } else if control < upper - falloff {
                source2.sample(point)
            } else if control < upper + falloff {
                let lower_curve = upper - falloff;
                let upper_curve = upper + falloff;
                let alpha = s_curve3((control - lower_curve) / (upper_curve - lower_curve));
                Ok(linear_interp(
                    source2.sample(point)?,
                    source1.sample(point)?,
                    alpha,
                ))
            } else {
                source1.sample(point)
            }
        } else if control < lower || control > upper {
            source1.sample(point)
        } else {
            source2.sample(point)
        }
    }
}
