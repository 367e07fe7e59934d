use rand_xoshiro::Xoroshiro128PlusPlus;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};

use crate::Random;

const F64_MULTIPLIER: f64 = 1.0 / (1u64 << 53) as f64;
const STAFFORD_1: u64 = 0xbf58476d1ce4e5b9;
const STAFFORD_2: u64 = 0x94d049bb133111eb;
const SILVER_RATIO: u64 = 0x6a09e667f3bcc909;
const GOLDEN_RATIO: u64 = 0x9e3779b97f4a7c15;

/// Xoroshiro128++ seeded from a single 64-bit value.
///
/// The 64-bit seed is spread over the 128-bit state with two Stafford mixes,
/// so neighbouring seeds give unrelated streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XoroshiroRandom(Xoroshiro128PlusPlus);

impl XoroshiroRandom {
    pub fn new(seed: u64) -> Self {
        let (lo, hi) = upgrade_seed_to_u128(seed);
        let mut array = [0u8; 16];
        array[..8].copy_from_slice(&lo.to_le_bytes());
        array[8..16].copy_from_slice(&hi.to_le_bytes());
        Self(Xoroshiro128PlusPlus::from_seed(array))
    }

    fn next_bits(&mut self, bits: usize) -> u64 {
        self.next_u64() >> (64 - bits)
    }
}

impl Random for XoroshiroRandom {
    fn next_f64(&mut self) -> f64 {
        self.next_bits(53) as f64 * F64_MULTIPLIER
    }
}

impl RngCore for XoroshiroRandom {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

fn mix_stafford_13(mut v: u64) -> u64 {
    v = (v ^ v >> 30).wrapping_mul(STAFFORD_1);
    v = (v ^ v >> 27).wrapping_mul(STAFFORD_2);
    v ^ v >> 31
}

fn upgrade_seed_to_u128(seed: u64) -> (u64, u64) {
    let lo = seed ^ SILVER_RATIO;
    let hi = lo.wrapping_add(GOLDEN_RATIO);
    (mix_stafford_13(lo), mix_stafford_13(hi))
}

#[cfg(test)]
mod test {
    use crate::Random;
    use crate::xoroshiro::XoroshiroRandom;

    #[test]
    fn next_i32() {
        let mut random = XoroshiroRandom::new(1);
        let expected = [1734564350, 836234122, 825264738, -1425890201, 767430484];
        for &e in &expected {
            assert_eq!(random.next_i32(), e);
        }
    }

    #[test]
    fn next_f64() {
        let mut random = XoroshiroRandom::new(1);
        let expected = [
            0.9439647613102243,
            0.34974587038035987,
            0.9012351308931007,
            0.048251694223845565,
            0.4388219188383503,
        ];
        for &e in &expected {
            assert_eq!(random.next_f64(), e);
        }
    }

    #[test]
    fn f64_range() {
        let mut random = XoroshiroRandom::new(99);
        for _ in 0..1000 {
            let v = random.next_f64_range(-3.0, 5.0);
            assert!((-3.0..5.0).contains(&v));
        }
    }
}
