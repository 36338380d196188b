//! Fixed-point scalar arithmetic.
//!
//! Every quantity in the tracer is a 256-bit signed integer scaled by 10^6:
//! the stored integer `v` stands for the real number `v / 1_000_000`.
//! Division truncates toward zero and remainders keep the sign of the
//! dividend, which is exactly what `I256`'s `/` and `%` do.
//!
//! Nothing in here touches floating point. The transcendental functions are
//! plain integer iterations so every platform produces the same bits.

use ethnum::I256;

/// The fixed-point scalar type.
pub type Scalar = I256;

/// `1.0` in fixed point.
pub const SCALE: Scalar = Scalar::new(1_000_000);

/// `1.0` in the squared (10^12) scale produced by multiplying two scalars.
pub const SCALE_SQ: Scalar = Scalar::new(1_000_000_000_000);

/// Tolerance band used in place of exact-zero comparisons (0.001).
pub const EPSILON: Scalar = Scalar::new(1_000);

/// `2π` truncated to six decimals.
pub const TWO_PI: Scalar = Scalar::new(6_283_184);

/// Build a scalar from a raw (already scaled) integer.
#[inline]
pub const fn fixed(raw: i128) -> Scalar {
    Scalar::new(raw)
}

/// Absolute value.
#[inline]
pub fn abs(x: Scalar) -> Scalar {
    if x < Scalar::ZERO {
        -x
    } else {
        x
    }
}

/// Clamp into the displayable color range `[0, 1]`.
#[inline]
pub fn clamp(x: Scalar) -> Scalar {
    if x < Scalar::ZERO {
        Scalar::ZERO
    } else if x > SCALE {
        SCALE
    } else {
        x
    }
}

/// Integer square root by Newton's method.
///
/// Operates on the raw integer, so callers pick the scale: the root of a
/// value in the 10^12 scale comes back in the 10^6 scale. A negative input
/// never improves on the first guess and is returned unchanged.
pub fn sqrt(x: Scalar) -> Scalar {
    if x == Scalar::ZERO {
        return Scalar::ZERO;
    }
    let two = Scalar::new(2);
    let mut z = (x + Scalar::ONE) / two;
    let mut y = x;
    while z < y {
        y = z;
        z = (x / z + z) / two;
    }
    y
}

/// Sine of an angle given in radians × 10^6.
///
/// The angle is wrapped into `[0, 2π)` and the Taylor series is summed until
/// the numerator of the next term no longer exceeds its factorial
/// denominator.
pub fn sin(x: Scalar) -> Scalar {
    let mut x = x % TWO_PI;
    if x < Scalar::ZERO {
        x += TWO_PI;
    }

    let two = Scalar::new(2);
    let mut y = Scalar::ZERO;
    let mut sign = Scalar::ONE;
    let mut n = x;
    let mut d = Scalar::ONE;
    let mut f = two;
    while n > d {
        y += sign * n / d;
        n = n * x * x / SCALE / SCALE;
        d *= f * (f + Scalar::ONE);
        sign = -sign;
        f += two;
    }
    y
}

/// Cosine via the Pythagorean identity.
///
/// Always non-negative: the sign of the true cosine is lost.
pub fn cos(x: Scalar) -> Scalar {
    let s = sin(x);
    sqrt(SCALE_SQ - s * s)
}

/// Convert a scalar already known to lie in `[0, 255]` into a color byte.
#[inline]
pub fn to_channel(x: Scalar) -> u8 {
    assert!(
        x >= Scalar::ZERO && x <= Scalar::new(255),
        "channel value {x} out of byte range"
    );
    x.as_i128() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_exact_squares() {
        assert_eq!(sqrt(fixed(0)), fixed(0));
        assert_eq!(sqrt(fixed(1)), fixed(1));
        assert_eq!(sqrt(fixed(144)), fixed(12));
        // 10^12 scaled input yields 10^6 scaled output
        assert_eq!(sqrt(SCALE_SQ), SCALE);
        assert_eq!(sqrt(fixed(4_000_000_000_000)), fixed(2_000_000));
    }

    #[test]
    fn test_sqrt_truncates() {
        assert_eq!(sqrt(fixed(2)), fixed(1));
        assert_eq!(sqrt(fixed(15)), fixed(3));
        assert_eq!(sqrt(fixed(2_000_000_000_000)), fixed(1_414_213));
    }

    #[test]
    fn test_sqrt_negative_passthrough() {
        assert_eq!(sqrt(fixed(-10)), fixed(-10));
    }

    #[test]
    fn test_sin_known_angles() {
        assert_eq!(sin(fixed(0)), fixed(0));

        // sin(π/2) ≈ 1
        let s = sin(fixed(1_570_796));
        assert!(abs(s - SCALE) <= fixed(10), "sin(pi/2) = {s}");

        // sin(π/6) ≈ 0.5
        let s = sin(fixed(523_599));
        assert!(abs(s - fixed(500_000)) <= fixed(10), "sin(pi/6) = {s}");

        // sin(3π/2) ≈ -1
        let s = sin(fixed(4_712_388));
        assert!(abs(s + SCALE) <= fixed(10), "sin(3pi/2) = {s}");
    }

    #[test]
    fn test_sin_wraps_angle() {
        let a = fixed(1_000_000);
        assert_eq!(sin(a), sin(a + TWO_PI));
        assert_eq!(sin(a), sin(a - TWO_PI));
        assert_eq!(sin(a), sin(a + TWO_PI * fixed(3)));
    }

    #[test]
    fn test_cos_is_non_negative() {
        assert!(abs(cos(fixed(0)) - SCALE) <= fixed(1));
        // cos(π) is -1 in reals; the identity-based cosine drops the sign
        let c = cos(fixed(3_141_592));
        assert!(abs(c - SCALE) <= fixed(10), "cos(pi) = {c}");
        assert!(cos(fixed(2_000_000)) >= fixed(0));
    }

    #[test]
    fn test_abs_and_clamp() {
        assert_eq!(abs(fixed(-5)), fixed(5));
        assert_eq!(abs(fixed(5)), fixed(5));
        assert_eq!(clamp(fixed(-1)), fixed(0));
        assert_eq!(clamp(fixed(2_000_000)), SCALE);
        assert_eq!(clamp(fixed(123_456)), fixed(123_456));
    }

    #[test]
    fn test_truncating_division() {
        // Round toward zero, not floor
        assert_eq!(fixed(-7) / fixed(2), fixed(-3));
        assert_eq!(fixed(-7) % fixed(2), fixed(-1));
    }

    #[test]
    fn test_to_channel() {
        assert_eq!(to_channel(fixed(0)), 0);
        assert_eq!(to_channel(fixed(255)), 255);
    }

    #[test]
    #[should_panic]
    fn test_to_channel_out_of_range() {
        to_channel(fixed(256));
    }
}
