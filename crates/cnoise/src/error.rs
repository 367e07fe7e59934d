use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum NoiseError {
    #[error("octave count {count} is out of range [1, {max}]", max = crate::module::MAX_OCTAVES)]
    InvalidOctaveCount { count: usize },
    #[error("lower bound {lower} is greater than upper bound {upper}")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("control point with input {input} already exists")]
    DuplicateControlPoint { input: f64 },
    #[error("{module} control points must be finite")]
    NonFiniteControlPoint { module: &'static str },
    #[error("{module} needs at least {required} control points, has {actual}")]
    NotEnoughControlPoints {
        module: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("{module} has no module in source slot `{slot}`")]
    MissingSource {
        module: &'static str,
        slot: &'static str,
    },
}
