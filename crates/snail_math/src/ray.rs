use crate::fixed::{Scalar, SCALE};
use crate::Vector;

/// A ray in fixed-point space.
///
/// Besides origin and direction a ray carries its bounce count and whether
/// it currently travels inside a refractive medium. Rays are rebuilt at every
/// bounce; only `depth` changes along a path.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ray {
    pub origin: Vector,
    /// Direction (normalized whenever it is used for shading)
    pub direction: Vector,
    pub depth: u32,
    pub refract: bool,
}

impl Ray {
    /// Create a primary ray at depth 0, outside any medium.
    pub fn new(origin: Vector, direction: Vector) -> Self {
        Self {
            origin,
            direction,
            depth: 0,
            refract: false,
        }
    }

    /// Get the point at distance `dist` along the ray.
    ///
    /// Returns: origin + direction * dist / 10^6
    #[inline]
    pub fn at(&self, dist: Scalar) -> Vector {
        self.origin + self.direction * dist / SCALE
    }

    /// The same ray one bounce deeper.
    #[inline]
    pub fn bounced(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// A continuation ray from `origin` that stays in the current medium.
    #[inline]
    pub fn continue_from(&self, origin: Vector, direction: Vector) -> Self {
        Self {
            origin,
            direction,
            ..*self
        }
    }

    /// A continuation ray that crosses the medium boundary.
    #[inline]
    pub fn cross_boundary(&self, origin: Vector, direction: Vector) -> Self {
        Self {
            origin,
            direction,
            depth: self.depth,
            refract: !self.refract,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vector::fixed(0, 0, 0), Vector::fixed(1_000_000, 0, 0));

        assert_eq!(ray.at(Scalar::new(0)), Vector::fixed(0, 0, 0));
        assert_eq!(ray.at(Scalar::new(1_000_000)), Vector::fixed(1_000_000, 0, 0));
        assert_eq!(ray.at(Scalar::new(2_500_000)), Vector::fixed(2_500_000, 0, 0));
    }

    #[test]
    fn test_ray_continuations() {
        let ray = Ray::new(Vector::ZERO, Vector::fixed(0, 0, 1_000_000)).bounced();
        assert_eq!(ray.depth, 1);
        assert!(!ray.refract);

        let next = ray.continue_from(Vector::splat(5), Vector::fixed(0, 1_000_000, 0));
        assert_eq!(next.depth, 1);
        assert!(!next.refract);
        assert_eq!(next.origin, Vector::splat(5));

        let inside = ray.cross_boundary(Vector::ZERO, Vector::fixed(1_000_000, 0, 0));
        assert_eq!(inside.depth, 1);
        assert!(inside.refract);
        assert!(!inside.cross_boundary(Vector::ZERO, Vector::ZERO).refract);
    }
}
