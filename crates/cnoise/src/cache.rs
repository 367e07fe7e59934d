use std::cell::Cell;

use bevy_math::DVec3;
use tracing::trace;

use crate::error::NoiseError;
use crate::module::NoiseFunction;

const CACHE_EPSILON: f64 = 1.0e-7;

/// Remembers the value of the most recently sampled point.
///
/// Wraps a graph root or any consumer-side function, such as the source of a
/// model or a per-thread sampler. Source slots hold `Arc<Module>`, so a cache
/// never sits inside a graph. It holds interior state and is `!Sync`, so each
/// thread keeps its own.
#[derive(Debug)]
pub struct Cache<F> {
    source: F,
    last: Cell<Option<(DVec3, f64)>>,
}

impl<F: NoiseFunction> Cache<F> {
    pub fn new(source: F) -> Self {
        Self {
            source,
            last: Cell::new(None),
        }
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    /// Replaces the source and forgets the cached value.
    pub fn set_source(&mut self, source: F) {
        self.source = source;
        self.invalidate();
    }

    pub fn invalidate(&self) {
        self.last.set(None);
    }

    pub fn into_inner(self) -> F {
        self.source
    }
}

impl<F: NoiseFunction> NoiseFunction for Cache<F> {
    fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
        if let Some((cached_point, value)) = self.last.get() {
            if (cached_point - point).abs().cmplt(DVec3::splat(CACHE_EPSILON)).all() {
                return Ok(value);
            }
        }
        let value = self.source.sample(point)?;
        trace!(x = point.x, y = point.y, z = point.z, "Cache miss");
        self.last.set(Some((point, value)));
        Ok(value)
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use bevy_math::DVec3;

    use crate::cache::Cache;
    use crate::error::NoiseError;
    use crate::model::Plane;
    use crate::module::{Module, NoiseFunction, Perlin};

    #[derive(Default)]
    struct Counting {
        calls: Cell<u32>,
    }

    impl NoiseFunction for Counting {
        fn sample(&self, point: DVec3) -> Result<f64, NoiseError> {
            self.calls.set(self.calls.get() + 1);
            Ok(point.x + point.y + point.z)
        }
    }

    #[test]
    fn repeats_hit() {
        let cache = Cache::new(Counting::default());
        let point = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(cache.sample(point), Ok(6.0));
        assert_eq!(cache.sample(point), Ok(6.0));
        assert_eq!(cache.sample(point + DVec3::splat(5.0e-8)), Ok(6.0));
        assert_eq!(cache.source().calls.get(), 1);
    }

    #[test]
    fn wraps_model_source() {
        let plane = Plane::new(Cache::new(Counting::default()));
        assert_eq!(plane.sample(1.0, 2.0), Ok(3.0));
        assert_eq!(plane.sample(1.0, 2.0), Ok(3.0));
        assert_eq!(plane.source().source().calls.get(), 1);
        assert_eq!(plane.sample(2.0, 2.0), Ok(4.0));
        assert_eq!(plane.source().source().calls.get(), 2);
    }

    #[test]
    fn distant_points_miss() {
        let cache = Cache::new(Counting::default());
        let point = DVec3::new(1.0, 2.0, 3.0);
        cache.sample(point).unwrap();
        cache.sample(point + DVec3::new(0.0, 0.0, 1.0e-6)).unwrap();
        assert_eq!(cache.source().calls.get(), 2);
        cache.sample(point).unwrap();
        assert_eq!(cache.source().calls.get(), 3);
        cache.invalidate();
        cache.sample(point).unwrap();
        assert_eq!(cache.source().calls.get(), 4);
    }

    #[test]
    fn replacing_source_invalidates() {
        let mut cache = Cache::new(Module::constant(1.0));
        assert_eq!(cache.sample(DVec3::ZERO), Ok(1.0));
        cache.set_source(Module::constant(2.0));
        assert_eq!(cache.sample(DVec3::ZERO), Ok(2.0));
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = Cache::new(Module::abs(crate::module::Source::empty()));
        assert!(cache.sample(DVec3::ZERO).is_err());
        assert!(cache.sample(DVec3::ZERO).is_err());
    }

    #[test]
    fn matches_source() {
        let perlin = Perlin::new().with_seed(77);
        let cache = Cache::new(&perlin);
        let point = DVec3::new(-0.4, 8.2, 1.9);
        assert_eq!(cache.sample(point), perlin.sample(point));
        assert_eq!(cache.sample(point), perlin.sample(point));
        assert_eq!(cache.into_inner().get(point), perlin.get(point));
    }
}
