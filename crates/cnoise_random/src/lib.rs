pub mod xoroshiro;

pub use crate::xoroshiro::XoroshiroRandom;
use rand_xoshiro::rand_core::RngCore;

pub trait Random: RngCore + Clone {
    fn next_i32(&mut self) -> i32 {
        self.next_u32() as i32
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform in `[min, max)`.
    fn next_f64_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}
