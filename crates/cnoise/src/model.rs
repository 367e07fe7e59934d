//! Lower-dimensional parameterizations over a 3D noise function.

use bevy_math::DVec3;

use crate::error::NoiseError;
use crate::math::{DEG_TO_RAD, lat_lon_to_xyz};
use crate::module::NoiseFunction;

/// Samples the source on the `y = 0` plane.
#[derive(Clone, Debug)]
pub struct Plane<F> {
    source: F,
}

impl<F: NoiseFunction> Plane<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn sample(&self, x: f64, z: f64) -> Result<f64, NoiseError> {
        self.source.sample(DVec3::new(x, 0.0, z))
    }
}

/// Samples the source on the unit sphere. Coordinates are in degrees.
#[derive(Clone, Debug)]
pub struct Sphere<F> {
    source: F,
}

impl<F: NoiseFunction> Sphere<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn sample(&self, lat: f64, lon: f64) -> Result<f64, NoiseError> {
        self.source.sample(lat_lon_to_xyz(lat, lon))
    }
}

/// Samples the source on a unit-radius cylinder around the y axis.
#[derive(Clone, Debug)]
pub struct Cylinder<F> {
    source: F,
}

impl<F: NoiseFunction> Cylinder<F> {
    pub fn new(source: F) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    /// `angle` is in degrees.
    pub fn sample(&self, angle: f64, height: f64) -> Result<f64, NoiseError> {
        let angle = angle * DEG_TO_RAD;
        self.source
            .sample(DVec3::new(angle.cos(), height, angle.sin()))
    }
}

/// Samples the source along the segment from `start` to `end`. Both ends
/// start at the origin, so set them before sampling.
///
/// With attenuation enabled the value is scaled by `4p(1 - p)`, so it fades to
/// zero at both ends and is untouched at the midpoint.
#[derive(Clone, Debug)]
pub struct Line<F> {
    source: F,
    start: DVec3,
    end: DVec3,
    attenuate: bool,
}

impl<F: NoiseFunction> Line<F> {
    pub fn new(source: F) -> Self {
        Self {
            source,
            start: DVec3::ZERO,
            end: DVec3::ZERO,
            attenuate: false,
        }
    }

    pub fn with_start(mut self, start: DVec3) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: DVec3) -> Self {
        self.end = end;
        self
    }

    pub fn with_attenuate(mut self, attenuate: bool) -> Self {
        self.attenuate = attenuate;
        self
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn start(&self) -> DVec3 {
        self.start
    }

    pub fn end(&self) -> DVec3 {
        self.end
    }

    pub fn attenuates(&self) -> bool {
        self.attenuate
    }

    pub fn sample(&self, p: f64) -> Result<f64, NoiseError> {
        let point = self.start + (self.end - self.start) * p;
        let value = self.source.sample(point)?;
        if self.attenuate {
            Ok(p * (1.0 - p) * 4.0 * value)
        } else {
            Ok(value)
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use bevy_math::DVec3;

    use crate::error::NoiseError;
    use crate::model::{Cylinder, Line, Plane, Sphere};
    use crate::module::{Module, NoiseFunction, Source};

    /// Records the points it is sampled at and returns 2.0.
    #[derive(Default)]
    struct Recorder {
        points: RefCell<Vec<DVec3>>,
    }

    impl NoiseFunction for Recorder {
        fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
            self.points.borrow_mut().push(point);
            Ok(2.0)
        }
    }

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).abs().max_element() < 1.0e-12, "{a} != {b}");
    }

    #[test]
    fn plane() {
        let plane = Plane::new(Recorder::default());
        assert_eq!(plane.sample(3.0, -4.0), Ok(2.0));
        assert_eq!(plane.source().points.borrow()[0], DVec3::new(3.0, 0.0, -4.0));
    }

    #[test]
    fn sphere() {
        let sphere = Sphere::new(Recorder::default());
        sphere.sample(0.0, 0.0).unwrap();
        sphere.sample(90.0, 0.0).unwrap();
        sphere.sample(0.0, 90.0).unwrap();
        let points = sphere.source().points.borrow();
        assert_close(points[0], DVec3::X);
        assert_close(points[1], DVec3::Y);
        assert_close(points[2], DVec3::Z);
    }

    #[test]
    fn cylinder() {
        let cylinder = Cylinder::new(Recorder::default());
        cylinder.sample(0.0, 5.0).unwrap();
        cylinder.sample(90.0, -1.5).unwrap();
        cylinder.sample(180.0, 0.0).unwrap();
        let points = cylinder.source().points.borrow();
        assert_close(points[0], DVec3::new(1.0, 5.0, 0.0));
        assert_close(points[1], DVec3::new(0.0, -1.5, 1.0));
        assert_close(points[2], DVec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn line() {
        let line = Line::new(Recorder::default())
            .with_start(DVec3::new(1.0, 1.0, 1.0))
            .with_end(DVec3::new(3.0, -1.0, 1.0));
        assert_eq!(line.sample(0.5), Ok(2.0));
        assert_eq!(line.sample(0.0), Ok(2.0));
        let points = line.source().points.borrow();
        assert_eq!(points[0], DVec3::new(2.0, 0.0, 1.0));
        assert_eq!(points[1], DVec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn line_defaults() {
        let line = Line::new(Recorder::default());
        assert_eq!(line.start(), DVec3::ZERO);
        assert_eq!(line.end(), DVec3::ZERO);
        assert!(!line.attenuates());
        assert_eq!(line.sample(0.75), Ok(2.0));
        assert_eq!(line.source().points.borrow()[0], DVec3::ZERO);
    }

    #[test]
    fn line_attenuation() {
        let line = Line::new(Module::constant(2.0))
            .with_end(DVec3::ONE)
            .with_attenuate(true);
        assert_eq!(line.sample(0.0), Ok(0.0));
        assert_eq!(line.sample(1.0), Ok(0.0));
        assert_eq!(line.sample(0.5), Ok(2.0));
        assert_eq!(line.sample(0.25), Ok(1.5));
    }

    #[test]
    fn errors_propagate() {
        let plane = Plane::new(Module::abs(Source::empty()));
        assert_eq!(
            plane.sample(0.0, 0.0),
            Err(NoiseError::MissingSource {
                module: "abs",
                slot: "source"
            })
        );
    }
}
