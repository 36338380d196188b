//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection, carried
//! out entirely in fixed point.

use snail_math::{Ray, Scalar, Vector, EPSILON, SCALE};

use crate::{hittable::Hittable, material::Surface};

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangle {
    /// Vertices
    a: Vector,
    b: Vector,
    c: Vector,
    /// Pre-computed face normal (unit length)
    normal: Vector,
    surface: Surface,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The normal follows the winding: `normalize((b - a) × (c - a))`.
    pub fn new(a: Vector, b: Vector, c: Vector, surface: Surface) -> Self {
        let normal = (b - a).cross(c - a).norm();
        Self {
            a,
            b,
            c,
            normal,
            surface,
        }
    }

    pub fn vertices(&self) -> [Vector; 3] {
        [self.a, self.b, self.c]
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }
}

impl Hittable for Triangle {
    fn intersect(&self, ray: &Ray) -> Scalar {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let p = ray.direction.cross(edge2);

        // Ray is parallel to triangle (within the epsilon band)
        let det = edge1.dot(p) / SCALE;
        if det > -EPSILON && det < EPSILON {
            return Scalar::ZERO;
        }

        let d = ray.origin - self.a;
        let u = d.dot(p) / det;
        if u < Scalar::ZERO || u > SCALE {
            return Scalar::ZERO;
        }

        let q = d.cross(edge1);
        let v = ray.direction.dot(q) / det;
        if v < Scalar::ZERO || u + v > SCALE {
            return Scalar::ZERO;
        }

        let dist = edge2.dot(q) / det;
        if dist < EPSILON {
            return Scalar::ZERO;
        }
        dist
    }

    fn normal_at(&self, _point: Vector) -> Vector {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
