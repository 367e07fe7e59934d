pub mod gradient;
pub mod value;

pub use gradient::{
    gradient_coherent_noise_1d, gradient_coherent_noise_2d, gradient_coherent_noise_3d,
    gradient_noise_1d, gradient_noise_2d, gradient_noise_3d,
};
pub use value::{
    int_value_noise_1d, int_value_noise_2d, int_value_noise_3d, value_coherent_noise_1d,
    value_coherent_noise_2d, value_coherent_noise_3d, value_noise_1d, value_noise_2d,
    value_noise_3d,
};

use crate::math::{s_curve3, s_curve5};

// Lattice hash constants. They are primes and must stay prime.
pub(crate) const X_NOISE_GEN: i32 = 1619;
pub(crate) const Y_NOISE_GEN: i32 = 31337;
pub(crate) const Z_NOISE_GEN: i32 = 6971;
pub(crate) const SEED_NOISE_GEN: i32 = 1013;
pub(crate) const SHIFT_NOISE_GEN: u32 = 8;

const INT32_RANGE: f64 = 1073741824.0;

/// Smoothness of the interpolant used inside a lattice cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NoiseQuality {
    /// Linear interpolant. The first derivative is discontinuous at lattice
    /// boundaries.
    Fast,
    /// Cubic S-curve. The second derivative is discontinuous at lattice
    /// boundaries.
    #[default]
    Standard,
    /// Quintic S-curve. First and second derivatives are continuous.
    Best,
}

impl NoiseQuality {
    #[inline(always)]
    pub fn interpolant(self, a: f64) -> f64 {
        match self {
            NoiseQuality::Fast => a,
            NoiseQuality::Standard => s_curve3(a),
            NoiseQuality::Best => s_curve5(a),
        }
    }
}

/// Folds `n` into a range that converts to `i32` identically on every
/// platform. Apply to coordinates before they reach the lattice functions.
#[inline]
pub fn make_int32_range(n: f64) -> f64 {
    if n >= INT32_RANGE {
        (2.0 * (n % INT32_RANGE)) - INT32_RANGE
    } else if n <= -INT32_RANGE {
        (2.0 * (n % INT32_RANGE)) + INT32_RANGE
    } else {
        n
    }
}

/// Lower lattice coordinate of the cell containing `v`.
///
/// Non-positive values always step down one cell, so `0.0` maps to `-1` and
/// the point sits on the far face of that cell. Values beyond the `i32` range
/// saturate and then wrap.
#[inline(always)]
pub(crate) fn lattice_floor(v: f64) -> i32 {
    if v > 0.0 {
        v as i32
    } else {
        (v as i32).wrapping_sub(1)
    }
}

#[cfg(test)]
mod test {
    use crate::noise::{NoiseQuality, lattice_floor, make_int32_range};

    #[test]
    fn int32_range_folding() {
        assert_eq!(make_int32_range(0.0), 0.0);
        assert_eq!(make_int32_range(12345.678), 12345.678);
        assert_eq!(make_int32_range(-1073741823.0), -1073741823.0);
        assert_eq!(make_int32_range(1073741824.0), -1073741824.0);
        assert_eq!(make_int32_range(1073741824.0 + 10.5), -1073741824.0 + 21.0);
        assert_eq!(make_int32_range(-1073741824.0 - 10.5), 1073741824.0 - 21.0);
        for n in [3.0e9, -3.0e9, 1.0e15, -7.5e12] {
            let folded = make_int32_range(n);
            assert!(folded.abs() <= 1073741824.0, "{n} folded to {folded}");
        }
    }

    #[test]
    fn lattice_floor_steps_down_for_non_positive() {
        assert_eq!(lattice_floor(0.5), 0);
        assert_eq!(lattice_floor(1.0), 1);
        assert_eq!(lattice_floor(0.0), -1);
        assert_eq!(lattice_floor(-0.5), -1);
        assert_eq!(lattice_floor(-1.0), -2);
        assert_eq!(lattice_floor(-1.25), -2);
        assert_eq!(lattice_floor(-3.0e9), i32::MAX);
        assert_eq!(lattice_floor(i32::MIN as f64), i32::MAX);
        assert_eq!(lattice_floor(3.0e9), i32::MAX);
    }

    #[test]
    fn interpolants() {
        assert_eq!(NoiseQuality::default(), NoiseQuality::Standard);
        assert_eq!(NoiseQuality::Fast.interpolant(0.25), 0.25);
        assert_eq!(NoiseQuality::Standard.interpolant(0.25), 0.15625);
        assert_eq!(NoiseQuality::Best.interpolant(0.25), 0.103515625);
    }
}
