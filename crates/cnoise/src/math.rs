use bevy_math::DVec3;

pub const SQRT_2: f64 = 1.4142135623730950488;
pub const SQRT_3: f64 = 1.7320508075688772935;
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 1.0 / DEG_TO_RAD;

/// Cubic interpolation between `n1` and `n2`, using `n0` and `n3` as the
/// outer neighbours. `a` is in `[0, 1]`.
#[inline]
pub fn cubic_interp(n0: f64, n1: f64, n2: f64, n3: f64, a: f64) -> f64 {
    let p = (n3 - n2) - (n0 - n1);
    let q = (n0 - n1) - p;
    let r = n2 - n0;
    let s = n1;
    p * a * a * a + q * a * a + r * a + s
}

#[inline]
pub fn linear_interp(n0: f64, n1: f64, a: f64) -> f64 {
    ((1.0 - a) * n0) + (a * n1)
}

/// Cubic S-curve, `3a² - 2a³`. First derivative is zero at 0 and 1.
#[inline]
pub fn s_curve3(a: f64) -> f64 {
    a * a * (3.0 - 2.0 * a)
}

/// Quintic S-curve, `6a⁵ - 15a⁴ + 10a³`. First and second derivatives are
/// zero at 0 and 1.
#[inline]
pub fn s_curve5(a: f64) -> f64 {
    let a3 = a * a * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    (6.0 * a5) - (15.0 * a4) + (10.0 * a3)
}

/// Position on the unit sphere for a latitude/longitude pair in degrees.
pub fn lat_lon_to_xyz(lat: f64, lon: f64) -> DVec3 {
    let r = (DEG_TO_RAD * lat).cos();
    DVec3::new(
        r * (DEG_TO_RAD * lon).cos(),
        (DEG_TO_RAD * lat).sin(),
        r * (DEG_TO_RAD * lon).sin(),
    )
}

#[cfg(test)]
mod test {
    use crate::math::{
        DEG_TO_RAD, RAD_TO_DEG, SQRT_2, SQRT_3, cubic_interp, lat_lon_to_xyz, linear_interp,
        s_curve3, s_curve5,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn constants() {
        assert!(close(SQRT_2 * SQRT_2, 2.0));
        assert!(close(SQRT_3 * SQRT_3, 3.0));
        assert!(close(180.0 * DEG_TO_RAD, std::f64::consts::PI));
        assert!(close(DEG_TO_RAD * RAD_TO_DEG, 1.0));
    }

    #[test]
    fn s_curves_fix_endpoints() {
        for curve in [s_curve3, s_curve5] {
            assert_eq!(curve(0.0), 0.0);
            assert_eq!(curve(1.0), 1.0);
            assert_eq!(curve(0.5), 0.5);
        }
        assert!(close(s_curve3(0.25), 0.15625));
        assert!(close(s_curve5(0.25), 0.103515625));
    }

    #[test]
    fn interpolation() {
        assert_eq!(linear_interp(2.0, 4.0, 0.0), 2.0);
        assert_eq!(linear_interp(2.0, 4.0, 1.0), 4.0);
        assert_eq!(linear_interp(2.0, 4.0, 0.25), 2.5);
        assert_eq!(cubic_interp(0.0, 1.0, 2.0, 3.0, 0.0), 1.0);
        assert_eq!(cubic_interp(0.0, 1.0, 2.0, 3.0, 1.0), 2.0);
        assert!(close(cubic_interp(0.0, 1.0, 2.0, 3.0, 0.5), 1.5));
    }

    #[test]
    fn lat_lon() {
        let north = lat_lon_to_xyz(90.0, 0.0);
        assert!(close(north.y, 1.0));
        let p = lat_lon_to_xyz(0.0, 90.0);
        assert!(close(p.x, 0.0) && close(p.y, 0.0) && close(p.z, 1.0));
        let q = lat_lon_to_xyz(33.0, -120.0);
        assert!(close(q.length(), 1.0));
    }
}
