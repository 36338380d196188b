//! Sphere primitive for ray tracing.

use snail_math::{fixed, Ray, Scalar, Vector, EPSILON, SCALE};

use crate::{hittable::Hittable, material::Surface};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sphere {
    radius: Scalar,
    position: Vector,
    surface: Surface,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(radius: Scalar, position: Vector, surface: Surface) -> Self {
        Self {
            radius,
            position,
            surface,
        }
    }

    pub fn radius(&self) -> Scalar {
        self.radius
    }

    pub fn position(&self) -> Vector {
        self.position
    }
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Scalar {
        let op = self.position - ray.origin;
        let b = op.dot(ray.direction) / SCALE;
        let det = b * b - op.dot(op) + self.radius * self.radius;
        if det < Scalar::ZERO {
            return Scalar::ZERO;
        }

        let det_sqrt = fixed::sqrt(det);

        // Nearest root first, then the far one for rays starting inside
        let near = b - det_sqrt;
        if near > EPSILON {
            return near;
        }
        let far = b + det_sqrt;
        if far > EPSILON {
            return far;
        }
        Scalar::ZERO
    }

    fn normal_at(&self, point: Vector) -> Vector {
        (point - self.position).norm()
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use snail_math::fixed::fixed;

    fn unit_sphere_at_z(z: i128) -> Sphere {
        Sphere::new(
            fixed(1_000_000),
            Vector::fixed(0, 0, z),
            Surface::plain(Vector::splat(500_000), Material::Diffuse),
        )
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at_z(-5_000_000);
        let ray = Ray::new(Vector::ZERO, Vector::fixed(0, 0, -1_000_000));

        // Front face at z = -4
        assert_eq!(sphere.intersect(&ray), fixed(4_000_000));
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere_at_z(0);
        let ray = Ray::new(Vector::ZERO, Vector::fixed(1_000_000, 0, 0));

        // The near root is behind the origin; the far root is the exit point
        assert_eq!(sphere.intersect(&ray), fixed(1_000_000));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at_z(-5_000_000);

        // Ray pointing away from sphere
        let ray = Ray::new(Vector::ZERO, Vector::fixed(0, 1_000_000, 0));
        assert_eq!(sphere.intersect(&ray), fixed(0));

        // Sphere entirely behind the ray
        let ray = Ray::new(Vector::ZERO, Vector::fixed(0, 0, 1_000_000));
        assert_eq!(sphere.intersect(&ray), fixed(0));
    }

    #[test]
    fn test_sphere_skips_root_within_epsilon() {
        let sphere = unit_sphere_at_z(-1_000_500);
        // Origin sits 500 units (< epsilon) in front of the surface, so the
        // entry point is treated as self-intersection and the exit is used
        let ray = Ray::new(Vector::ZERO, Vector::fixed(0, 0, -1_000_000));
        assert_eq!(sphere.intersect(&ray), fixed(2_000_500));
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = unit_sphere_at_z(-5_000_000);
        assert_eq!(
            sphere.normal_at(Vector::fixed(0, 0, -4_000_000)),
            Vector::fixed(0, 0, 1_000_000)
        );
    }
}
