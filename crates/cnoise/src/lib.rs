pub mod cache;
pub mod error;
pub mod math;
pub mod model;
pub mod module;
pub mod noise;

pub use crate::cache::Cache;
pub use crate::error::NoiseError;
pub use crate::module::{Module, NoiseFunction, Source};
pub use crate::noise::NoiseQuality;
