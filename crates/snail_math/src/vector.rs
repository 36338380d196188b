//! Three-component fixed-point vector.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use crate::fixed::{self, Scalar, SCALE};

/// A position, direction, or color in 10^6 fixed point.
///
/// Operators follow the integer semantics of [`Scalar`]: `v * k` is a raw
/// product (the caller rescales), `v / k` truncates toward zero, and
/// `a * b` between vectors is the component-wise product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Vector {
    pub const ZERO: Self = Self::fixed(0, 0, 0);

    /// Create a vector from scalars.
    #[inline]
    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    /// Create a vector from raw, already scaled integers.
    #[inline]
    pub const fn fixed(x: i128, y: i128, z: i128) -> Self {
        Self::new(Scalar::new(x), Scalar::new(y), Scalar::new(z))
    }

    /// Same value on every component.
    #[inline]
    pub const fn splat(v: i128) -> Self {
        Self::fixed(v, v, v)
    }

    /// Dot product, left in the squared scale.
    #[inline]
    pub fn dot(self, other: Self) -> Scalar {
        self.x * other.x + (self.y * other.y + self.z * other.z)
    }

    /// Cross product, left in the squared scale.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length in the same scale as the components.
    pub fn length(self) -> Scalar {
        fixed::sqrt(self.x * self.x + (self.y * self.y + self.z * self.z))
    }

    /// Unit vector (length 10^6) pointing the same way.
    ///
    /// The zero vector normalizes to itself.
    pub fn norm(self) -> Self {
        let length = self.length();
        if length == Scalar::ZERO {
            return Self::ZERO;
        }
        Self::new(
            self.x * SCALE / length,
            self.y * SCALE / length,
            self.z * SCALE / length,
        )
    }

    /// Clamp every component into `[0, 10^6]`.
    pub fn clamp(self) -> Self {
        Self::new(
            fixed::clamp(self.x),
            fixed::clamp(self.y),
            fixed::clamp(self.z),
        )
    }

    /// Largest component.
    pub fn max_element(self) -> Scalar {
        self.x.max(self.y).max(self.z)
    }
}

impl Add for Vector {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Scalar> for Vector {
    type Output = Self;

    #[inline]
    fn mul(self, k: Scalar) -> Self {
        Self::new(k * self.x, k * self.y, k * self.z)
    }
}

impl Mul for Vector {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div<Scalar> for Vector {
    type Output = Self;

    #[inline]
    fn div(self, k: Scalar) -> Self {
        Self::new(self.x / k, self.y / k, self.z / k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::fixed;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector::fixed(1, 2, 3);
        let b = Vector::fixed(4, 5, 6);
        assert_eq!(a + b, Vector::fixed(5, 7, 9));
        assert_eq!(b - a, Vector::fixed(3, 3, 3));
        assert_eq!(-a, Vector::fixed(-1, -2, -3));
        assert_eq!(a * b, Vector::fixed(4, 10, 18));
        assert_eq!(a * fixed(2), Vector::fixed(2, 4, 6));
        assert_eq!(Vector::fixed(-7, 7, 8) / fixed(2), Vector::fixed(-3, 3, 4));
    }

    #[test]
    fn test_dot_and_cross() {
        let x = Vector::fixed(1_000_000, 0, 0);
        let y = Vector::fixed(0, 1_000_000, 0);
        assert_eq!(x.dot(y), fixed(0));
        assert_eq!(x.dot(x), fixed(1_000_000_000_000));
        assert_eq!(x.cross(y), Vector::fixed(0, 0, 1_000_000_000_000));
        assert_eq!(y.cross(x), Vector::fixed(0, 0, -1_000_000_000_000));
    }

    #[test]
    fn test_norm() {
        assert_eq!(
            Vector::fixed(0, 0, -5_000_000).norm(),
            Vector::fixed(0, 0, -1_000_000)
        );
        assert_eq!(
            Vector::fixed(3_000_000, 4_000_000, 0).norm(),
            Vector::fixed(600_000, 800_000, 0)
        );
    }

    #[test]
    fn test_norm_zero_vector() {
        assert_eq!(Vector::ZERO.norm(), Vector::ZERO);
    }

    #[test]
    fn test_length() {
        assert_eq!(Vector::fixed(3_000_000, 4_000_000, 0).length(), fixed(5_000_000));
    }

    #[test]
    fn test_clamp_and_max() {
        let v = Vector::fixed(-3, 2_000_000, 500_000);
        assert_eq!(v.clamp(), Vector::fixed(0, 1_000_000, 500_000));
        assert_eq!(v.max_element(), fixed(2_000_000));
    }
}
