use bevy_math::DVec3;

use crate::error::NoiseError;
use crate::math::{cubic_interp, linear_interp};
use crate::module::{NoiseFunction, Source};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoint {
    pub input: f64,
    pub output: f64,
}

impl ControlPoint {
    pub fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((input, output): (f64, f64)) -> Self {
        Self { input, output }
    }
}

/// Index of the first element for which `predicate` holds, or `max` if none
/// does. `predicate` must be monotonic over `[min, max)`.
fn binary_search<F>(min: usize, max: usize, predicate: F) -> usize
where
    F: Fn(usize) -> bool,
{
    let mut min = min;
    let mut max = max;
    while min < max {
        let mid = min + (max - min) / 2;
        if predicate(mid) {
            max = mid;
        } else {
            min = mid + 1;
        }
    }
    min
}

/// Index of the first key strictly greater than `value`.
#[inline]
fn upper_index(len: usize, value: f64, key: impl Fn(usize) -> f64) -> usize {
    binary_search(0, len, |i| value < key(i))
}

#[inline]
fn clamp_index(index: isize, len: usize) -> usize {
    index.clamp(0, len as isize - 1) as usize
}

/// Remaps the source through a cubic spline over sorted control points.
#[derive(Clone, Debug, Default)]
pub struct Curve {
    pub(crate) source: Source,
    points: Vec<ControlPoint>,
}

impl Curve {
    pub const NAME: &'static str = "curve";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            points: Vec::new(),
        }
    }

    pub fn with_control_points(
        mut self,
        points: impl IntoIterator<Item = ControlPoint>,
    ) -> Result<Self, NoiseError> {
        for point in points {
            self.add_control_point(point)?;
        }
        Ok(self)
    }

    /// Inserts `point` keeping the points sorted by input. Inputs must be
    /// unique and both coordinates finite.
    pub fn add_control_point(&mut self, point: ControlPoint) -> Result<(), NoiseError> {
        if !point.input.is_finite() || !point.output.is_finite() {
            return Err(NoiseError::NonFiniteControlPoint { module: Self::NAME });
        }
        let index = upper_index(self.points.len(), point.input, |i| self.points[i].input);
        if index > 0 && self.points[index - 1].input == point.input {
            return Err(NoiseError::DuplicateControlPoint { input: point.input });
        }
        self.points.insert(index, point);
        Ok(())
    }

    pub fn clear_control_points(&mut self) {
        self.points.clear();
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.points
    }
}

impl NoiseFunction for Curve {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let value = self.source.require(Self::NAME, "source")?.sample(point)?;
        let points = &self.points;
        let len = points.len();
        if len == 0 {
            return Err(NoiseError::NotEnoughControlPoints {
                module: Self::NAME,
                required: 1,
                actual: 0,
            });
        }

        let index = upper_index(len, value, |i| points[i].input) as isize;
        let i0 = clamp_index(index - 2, len);
        let i1 = clamp_index(index - 1, len);
        let i2 = clamp_index(index, len);
        let i3 = clamp_index(index + 1, len);

        if i1 == i2 {
            return Ok(points[i1].output);
        }

        let input0 = points[i1].input;
        let input1 = points[i2].input;
        let alpha = (value - input0) / (input1 - input0);
        Ok(cubic_interp(
            points[i0].output,
            points[i1].output,
            points[i2].output,
            points[i3].output,
            alpha,
        ))
    }
}

/// Maps the source onto terrace-like steps between sorted control values.
#[derive(Clone, Debug, Default)]
pub struct Terrace {
    pub(crate) source: Source,
    points: Vec<f64>,
    invert: bool,
}

impl Terrace {
    pub const NAME: &'static str = "terrace";

    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_control_points(
        mut self,
        points: impl IntoIterator<Item = f64>,
    ) -> Result<Self, NoiseError> {
        for point in points {
            self.add_control_point(point)?;
        }
        Ok(self)
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn add_control_point(&mut self, value: f64) -> Result<(), NoiseError> {
        if !value.is_finite() {
            return Err(NoiseError::NonFiniteControlPoint { module: Self::NAME });
        }
        let index = upper_index(self.points.len(), value, |i| self.points[i]);
        if index > 0 && self.points[index - 1] == value {
            return Err(NoiseError::DuplicateControlPoint { input: value });
        }
        self.points.insert(index, value);
        Ok(())
    }

    pub fn clear_control_points(&mut self) {
        self.points.clear();
    }

    /// Replaces the control points with `count` evenly spaced values covering
    /// `[-1, 1]`.
    pub fn make_control_points(&mut self, count: usize) -> Result<(), NoiseError> {
        if count < 2 {
            return Err(NoiseError::NotEnoughControlPoints {
                module: Self::NAME,
                required: 2,
                actual: count,
            });
        }
        self.clear_control_points();
        let step = 2.0 / (count as f64 - 1.0);
        let mut value = -1.0;
        for _ in 0..count {
            self.add_control_point(value)?;
            value += step;
        }
        Ok(())
    }

    pub fn control_points(&self) -> &[f64] {
        &self.points
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }
}

impl NoiseFunction for Terrace {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        let value = self.source.require(Self::NAME, "source")?.sample(point)?;
        let points = &self.points;
        let len = points.len();
        if len == 0 {
            return Err(NoiseError::NotEnoughControlPoints {
                module: Self::NAME,
                required: 1,
                actual: 0,
            });
        }

        let index = upper_index(len, value, |i| points[i]) as isize;
        let i0 = clamp_index(index - 1, len);
        let i1 = clamp_index(index, len);

        if i0 == i1 {
            return Ok(points[i1]);
        }

        let mut value0 = points[i0];
        let mut value1 = points[i1];
        let mut alpha = (value - value0) / (value1 - value0);
        if self.invert {
            alpha = 1.0 - alpha;
            std::mem::swap(&mut value0, &mut value1);
        }
        alpha *= alpha;
        Ok(linear_interp(value0, value1, alpha))
    }
}
