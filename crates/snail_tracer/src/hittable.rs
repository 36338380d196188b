//! Hittable trait and Hit record for ray-object intersection.

use snail_math::{Ray, Scalar, Vector};

use crate::material::Surface;

/// Kind of primitive that produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Sphere,
    Triangle,
}

/// Nearest intersection found by a scene scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Distance along the ray (always > 0)
    pub dist: Scalar,
    pub kind: PrimitiveKind,
    /// Index into the scene's list for `kind`
    pub index: usize,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Distance to the first valid intersection, or `0` for a miss.
    fn intersect(&self, ray: &Ray) -> Scalar;

    /// Geometric normal at a point on the surface (not flipped toward the ray).
    fn normal_at(&self, point: Vector) -> Vector;

    fn surface(&self) -> &Surface;
}

/// Fold `objects` into `best`, keeping the nearest positive hit.
///
/// Only a strictly closer hit replaces the current one, so earlier objects
/// win ties.
pub(crate) fn nearest<T: Hittable>(
    objects: &[T],
    kind: PrimitiveKind,
    ray: &Ray,
    best: &mut Option<Hit>,
) {
    for (index, object) in objects.iter().enumerate() {
        let dist = object.intersect(ray);
        if dist <= Scalar::ZERO {
            continue;
        }
        if best.map_or(true, |hit| dist < hit.dist) {
            *best = Some(Hit { dist, kind, index });
        }
    }
}
