pub mod combiner;
pub mod curve;
pub mod fractal;
pub mod modifier;
pub mod pattern;
pub mod transform;
pub mod visitor;
pub mod voronoi;

use std::sync::Arc;

use bevy_math::DVec3;
use tracing::{debug, warn};

pub use combiner::{Add, Blend, Max, Min, Multiply, Power, Select};
pub use curve::{ControlPoint, Curve, Terrace};
pub use fractal::{Billow, FractalSettings, Perlin, RidgedMulti};
pub use modifier::{Abs, Clamp, Exponent, Invert, ScaleBias};
pub use pattern::{Checkerboard, Const, Cylinders, Spheres};
pub use transform::{Displace, RotatePoint, ScalePoint, TranslatePoint, Turbulence};
pub use visitor::Visitor;
pub use voronoi::Voronoi;

use crate::error::NoiseError;
use visitor::SourceValidator;

pub const MAX_OCTAVES: usize = 30;

/// Anything that maps a point in space to a noise value.
pub trait NoiseFunction {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError>;
}

impl<T: NoiseFunction + ?Sized> NoiseFunction for &T {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        (**self).sample(point)
    }
}

impl<T: NoiseFunction + ?Sized> NoiseFunction for Box<T> {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        (**self).sample(point)
    }
}

impl<T: NoiseFunction + ?Sized> NoiseFunction for Arc<T> {
    #[inline]
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        (**self).sample(point)
    }
}

/// A child slot of a module. Empty until a module is connected; the same
/// child can be connected to any number of parents.
#[derive(Clone, Debug, Default)]
pub struct Source(Option<Arc<Module>>);

impl Source {
    pub const fn empty() -> Self {
        Self(None)
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<&Arc<Module>> {
        self.0.as_ref()
    }

    /// The connected module, or a [`NoiseError::MissingSource`] naming the
    /// owner and the slot.
    #[inline]
    pub fn require(&self, module: &'static str, slot: &'static str) -> Result<&Module, NoiseError> {
        self.0
            .as_deref()
            .ok_or(NoiseError::MissingSource { module, slot })
    }
}

impl From<Module> for Source {
    fn from(module: Module) -> Self {
        Self(Some(Arc::new(module)))
    }
}

impl From<Arc<Module>> for Source {
    fn from(module: Arc<Module>) -> Self {
        Self(Some(module))
    }
}

impl From<&Arc<Module>> for Source {
    fn from(module: &Arc<Module>) -> Self {
        Self(Some(module.clone()))
    }
}

pub(crate) fn warn_on_frequency(module: &'static str, frequency: f64) {
    if frequency <= 0.0 {
        warn!(module, frequency, "Non-positive frequency configured");
    }
}

#[derive(Clone, Debug)]
pub enum Module {
    Perlin(Perlin),
    Billow(Billow),
    RidgedMulti(RidgedMulti),
    Voronoi(Voronoi),
    Checkerboard(Checkerboard),
    Spheres(Spheres),
    Cylinders(Cylinders),
    Const(Const),
    Abs(Abs),
    Invert(Invert),
    ScaleBias(ScaleBias),
    Clamp(Clamp),
    Exponent(Exponent),
    Curve(Curve),
    Terrace(Terrace),
    Add(Add),
    Multiply(Multiply),
    Max(Max),
    Min(Min),
    Power(Power),
    Blend(Blend),
    Select(Select),
    Displace(Displace),
    Turbulence(Turbulence),
    TranslatePoint(TranslatePoint),
    ScalePoint(ScalePoint),
    RotatePoint(RotatePoint),
}

macro_rules! module_nodes {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Module {
                fn from(node: $variant) -> Self {
                    Module::$variant(node)
                }
            }

            impl From<$variant> for Source {
                fn from(node: $variant) -> Self {
                    Source::from(Module::$variant(node))
                }
            }
        )*

        impl Module {
            pub fn name(&self) -> &'static str {
                match self {
                    $(Module::$variant(_) => $variant::NAME,)*
                }
            }
        }

        impl NoiseFunction for Module {
            fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
                match self {
                    $(Module::$variant(node) => node.sample(point),)*
                }
            }
        }
    };
}

module_nodes!(
    Perlin,
    Billow,
    RidgedMulti,
    Voronoi,
    Checkerboard,
    Spheres,
    Cylinders,
    Const,
    Abs,
    Invert,
    ScaleBias,
    Clamp,
    Exponent,
    Curve,
    Terrace,
    Add,
    Multiply,
    Max,
    Min,
    Power,
    Blend,
    Select,
    Displace,
    Turbulence,
    TranslatePoint,
    ScalePoint,
    RotatePoint,
);

impl Module {
    /// Named child slots in evaluation order.
    pub fn sources(&self) -> Vec<(&'static str, &Source)> {
        match self {
            Module::Perlin(_)
            | Module::Billow(_)
            | Module::RidgedMulti(_)
            | Module::Voronoi(_)
            | Module::Checkerboard(_)
            | Module::Spheres(_)
            | Module::Cylinders(_)
            | Module::Const(_) => Vec::new(),
            Module::Abs(m) => vec![("source", &m.source)],
            Module::Invert(m) => vec![("source", &m.source)],
            Module::ScaleBias(m) => vec![("source", &m.source)],
            Module::Clamp(m) => vec![("source", &m.source)],
            Module::Exponent(m) => vec![("source", &m.source)],
            Module::Curve(m) => vec![("source", &m.source)],
            Module::Terrace(m) => vec![("source", &m.source)],
            Module::Add(m) => vec![("source1", &m.source1), ("source2", &m.source2)],
            Module::Multiply(m) => vec![("source1", &m.source1), ("source2", &m.source2)],
            Module::Max(m) => vec![("source1", &m.source1), ("source2", &m.source2)],
            Module::Min(m) => vec![("source1", &m.source1), ("source2", &m.source2)],
            Module::Power(m) => vec![("source1", &m.source1), ("source2", &m.source2)],
            Module::Blend(m) => vec![
                ("source1", &m.source1),
                ("source2", &m.source2),
                ("control", &m.control),
            ],
            Module::Select(m) => vec![
                ("source1", &m.source1),
                ("source2", &m.source2),
                ("control", &m.control),
            ],
            Module::Displace(m) => vec![
                ("source", &m.source),
                ("x_displace", &m.x_displace),
                ("y_displace", &m.y_displace),
                ("z_displace", &m.z_displace),
            ],
            Module::Turbulence(m) => vec![("source", &m.source)],
            Module::TranslatePoint(m) => vec![("source", &m.source)],
            Module::ScalePoint(m) => vec![("source", &m.source)],
            Module::RotatePoint(m) => vec![("source", &m.source)],
        }
    }

    /// Walks the whole graph and fails on the first empty source slot.
    pub fn validate(&self) -> Result<(), NoiseError> {
        let mut validator = SourceValidator::default();
        validator.visit_module(self);
        debug!(
            root = self.name(),
            nodes = validator.visited,
            "Validated module graph"
        );
        match validator.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn constant(value: f64) -> Module {
        Module::Const(Const::new(value))
    }

    pub fn add(source1: impl Into<Source>, source2: impl Into<Source>) -> Module {
        Module::Add(Add::new(source1, source2))
    }

    /// `source1 - source2`, built as an addition of the inverted second source.
    pub fn subtract(source1: impl Into<Source>, source2: impl Into<Source>) -> Module {
        Module::add(source1, Module::invert(source2))
    }

    pub fn multiply(source1: impl Into<Source>, source2: impl Into<Source>) -> Module {
        Module::Multiply(Multiply::new(source1, source2))
    }

    pub fn max(source1: impl Into<Source>, source2: impl Into<Source>) -> Module {
        Module::Max(Max::new(source1, source2))
    }

    pub fn min(source1: impl Into<Source>, source2: impl Into<Source>) -> Module {
        Module::Min(Min::new(source1, source2))
    }

    pub fn power(base: impl Into<Source>, exponent: impl Into<Source>) -> Module {
        Module::Power(Power::new(base, exponent))
    }

    pub fn abs(source: impl Into<Source>) -> Module {
        Module::Abs(Abs::new(source))
    }

    pub fn invert(source: impl Into<Source>) -> Module {
        Module::Invert(Invert::new(source))
    }

    pub fn scale_bias(source: impl Into<Source>, scale: f64, bias: f64) -> Module {
        Module::ScaleBias(ScaleBias::new(source).with_scale(scale).with_bias(bias))
    }

    pub fn clamp(source: impl Into<Source>, lower: f64, upper: f64) -> Result<Module, NoiseError> {
        Ok(Module::Clamp(Clamp::new(source).with_bounds(lower, upper)?))
    }

    pub fn exponent(source: impl Into<Source>, exponent: f64) -> Module {
        Module::Exponent(Exponent::new(source).with_exponent(exponent))
    }

    pub fn curve(
        source: impl Into<Source>,
        points: impl IntoIterator<Item = ControlPoint>,
    ) -> Result<Module, NoiseError> {
        Ok(Module::Curve(Curve::new(source).with_control_points(points)?))
    }

    pub fn terrace(
        source: impl Into<Source>,
        points: impl IntoIterator<Item = f64>,
        invert: bool,
    ) -> Result<Module, NoiseError> {
        let terrace = Terrace::new(source)
            .with_control_points(points)?
            .with_invert(invert);
        Ok(Module::Terrace(terrace))
    }

    pub fn blend(
        source1: impl Into<Source>,
        source2: impl Into<Source>,
        control: impl Into<Source>,
    ) -> Module {
        Module::Blend(Blend::new(source1, source2, control))
    }

    pub fn select(
        source1: impl Into<Source>,
        source2: impl Into<Source>,
        control: impl Into<Source>,
        lower: f64,
        upper: f64,
        falloff: f64,
    ) -> Result<Module, NoiseError> {
        let select = Select::new(source1, source2, control)
            .with_bounds(lower, upper)?
            .with_falloff(falloff);
        Ok(Module::Select(select))
    }

    pub fn displace(
        source: impl Into<Source>,
        x_displace: impl Into<Source>,
        y_displace: impl Into<Source>,
        z_displace: impl Into<Source>,
    ) -> Module {
        Module::Displace(Displace::new(source, x_displace, y_displace, z_displace))
    }

    pub fn turbulence(
        source: impl Into<Source>,
        power: f64,
        frequency: f64,
        roughness: usize,
        seed: i32,
    ) -> Result<Module, NoiseError> {
        let turbulence = Turbulence::new(source)
            .with_power(power)
            .with_frequency(frequency)
            .with_seed(seed)
            .with_roughness(roughness)?;
        Ok(Module::Turbulence(turbulence))
    }

    pub fn translate(source: impl Into<Source>, translation: DVec3) -> Module {
        Module::TranslatePoint(TranslatePoint::new(source).with_translation(translation))
    }

    pub fn scale(source: impl Into<Source>, scale: DVec3) -> Module {
        Module::ScalePoint(ScalePoint::new(source).with_scale(scale))
    }

    /// Rotation angles are in degrees.
    pub fn rotate(source: impl Into<Source>, x_angle: f64, y_angle: f64, z_angle: f64) -> Module {
        Module::RotatePoint(RotatePoint::new(source).with_angles(x_angle, y_angle, z_angle))
    }
}
