use crate::math::linear_interp;
use crate::noise::{
    NoiseQuality, SEED_NOISE_GEN, X_NOISE_GEN, Y_NOISE_GEN, Z_NOISE_GEN, lattice_floor,
};

const VALUE_SCALE: f64 = 1073741824.0;

#[inline(always)]
fn scramble(n: i32) -> i32 {
    let n = n & 0x7fffffff;
    let n = (n >> 13) ^ n;
    n.wrapping_mul(n.wrapping_mul(n).wrapping_mul(60493).wrapping_add(19990303))
        .wrapping_add(1376312589)
        & 0x7fffffff
}

/// Integer noise for a lattice point, in `[0, 2³¹ - 1]`.
#[inline]
pub fn int_value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> i32 {
    scramble(
        X_NOISE_GEN
            .wrapping_mul(x)
            .wrapping_add(Y_NOISE_GEN.wrapping_mul(y))
            .wrapping_add(Z_NOISE_GEN.wrapping_mul(z))
            .wrapping_add(SEED_NOISE_GEN.wrapping_mul(seed)),
    )
}

#[inline]
pub fn int_value_noise_2d(x: i32, y: i32, seed: i32) -> i32 {
    scramble(
        X_NOISE_GEN
            .wrapping_mul(x)
            .wrapping_add(Y_NOISE_GEN.wrapping_mul(y))
            .wrapping_add(SEED_NOISE_GEN.wrapping_mul(seed)),
    )
}

#[inline]
pub fn int_value_noise_1d(x: i32, seed: i32) -> i32 {
    scramble(
        X_NOISE_GEN
            .wrapping_mul(x)
            .wrapping_add(SEED_NOISE_GEN.wrapping_mul(seed)),
    )
}

/// Value noise for a lattice point, in `[-1, 1]`.
#[inline]
pub fn value_noise_3d(x: i32, y: i32, z: i32, seed: i32) -> f64 {
    1.0 - (int_value_noise_3d(x, y, z, seed) as f64 / VALUE_SCALE)
}

#[inline]
pub fn value_noise_2d(x: i32, y: i32, seed: i32) -> f64 {
    1.0 - (int_value_noise_2d(x, y, seed) as f64 / VALUE_SCALE)
}

#[inline]
pub fn value_noise_1d(x: i32, seed: i32) -> f64 {
    1.0 - (int_value_noise_1d(x, seed) as f64 / VALUE_SCALE)
}

pub fn value_coherent_noise_3d(x: f64, y: f64, z: f64, seed: i32, quality: NoiseQuality) -> f64 {
    let x0 = lattice_floor(x);
    let x1 = x0.wrapping_add(1);
    let y0 = lattice_floor(y);
    let y1 = y0.wrapping_add(1);
    let z0 = lattice_floor(z);
    let z1 = z0.wrapping_add(1);

    let xs = quality.interpolant(x - x0 as f64);
    let ys = quality.interpolant(y - y0 as f64);
    let zs = quality.interpolant(z - z0 as f64);

    let n0 = value_noise_3d(x0, y0, z0, seed);
    let n1 = value_noise_3d(x1, y0, z0, seed);
    let ix0 = linear_interp(n0, n1, xs);
    let n0 = value_noise_3d(x0, y1, z0, seed);
    let n1 = value_noise_3d(x1, y1, z0, seed);
    let ix1 = linear_interp(n0, n1, xs);
    let iy0 = linear_interp(ix0, ix1, ys);

    let n0 = value_noise_3d(x0, y0, z1, seed);
    let n1 = value_noise_3d(x1, y0, z1, seed);
    let ix0 = linear_interp(n0, n1, xs);
    let n0 = value_noise_3d(x0, y1, z1, seed);
    let n1 = value_noise_3d(x1, y1, z1, seed);
    let ix1 = linear_interp(n0, n1, xs);
    let iy1 = linear_interp(ix0, ix1, ys);

    linear_interp(iy0, iy1, zs)
}

pub fn value_coherent_noise_2d(x: f64, y: f64, seed: i32, quality: NoiseQuality) -> f64 {
    let x0 = lattice_floor(x);
    let x1 = x0.wrapping_add(1);
    let y0 = lattice_floor(y);
    let y1 = y0.wrapping_add(1);

    let xs = quality.interpolant(x - x0 as f64);
    let ys = quality.interpolant(y - y0 as f64);

    let ix0 = linear_interp(value_noise_2d(x0, y0, seed), value_noise_2d(x1, y0, seed), xs);
    let ix1 = linear_interp(value_noise_2d(x0, y1, seed), value_noise_2d(x1, y1, seed), xs);
    linear_interp(ix0, ix1, ys)
}

pub fn value_coherent_noise_1d(x: f64, seed: i32, quality: NoiseQuality) -> f64 {
    let x0 = lattice_floor(x);
    let xs = quality.interpolant(x - x0 as f64);
    linear_interp(
        value_noise_1d(x0, seed),
        value_noise_1d(x0.wrapping_add(1), seed),
        xs,
    )
}
