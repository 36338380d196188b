//! Recursive radiance estimation.
//!
//! Follows a smallpt-style path: cosine-weighted diffuse bounces, perfect
//! mirrors, and Fresnel-weighted glass. Every quantity is a 10^6 fixed-point
//! integer and every random draw comes from the pixel's own [`Lcg`], so the
//! result of a path depends only on the scene and the pixel seed.

use snail_math::fixed::{self, fixed};
use snail_math::{Lcg, Ray, Scalar, Vector, SCALE, SCALE_SQ, TWO_PI};

use crate::material::{Color, Material};
use crate::Scene;

/// Rays deeper than this contribute nothing.
pub const MAX_DEPTH: u32 = 10;

/// Russian roulette starts once a path is deeper than this.
pub const ROULETTE_DEPTH: u32 = 5;

/// Glass hits no deeper than this trace both branches and blend them.
pub const BLEND_DEPTH: u32 = 2;

/// Relative index of refraction entering glass (1 / 1.5).
const AIR_TO_GLASS: Scalar = fixed(666_666);
/// Relative index of refraction leaving glass.
const GLASS_TO_AIR: Scalar = fixed(1_500_000);
/// Schlick reflectance at normal incidence.
const R0: Scalar = fixed(40_000);
/// Scale of a fifth power of a fixed-point value, less one factor of 10^6.
const SCALE_POW5: Scalar = fixed(1_000_000_000_000_000_000_000_000_000_000);

const QUARTER: Scalar = fixed(250_000);
const THREE_QUARTERS: Scalar = fixed(750_000);
const MILLI: Scalar = fixed(1_000);
const TWO: Scalar = fixed(2);
/// Normals with a larger |x| build their tangent frame from the Y axis.
const TANGENT_SWITCH: Scalar = fixed(100_000);

/// Path tracer bound to one scene and one random stream.
#[derive(Debug)]
pub struct PathTracer<'a> {
    scene: &'a Scene,
    rng: Lcg,
    roulette: bool,
}

impl<'a> PathTracer<'a> {
    pub fn new(scene: &'a Scene, rng: Lcg) -> Self {
        Self {
            scene,
            rng,
            roulette: true,
        }
    }

    /// Tracer seeded for pixel `(x, y)` of `scene`.
    pub fn for_pixel(scene: &'a Scene, x: u32, y: u32) -> Self {
        Self::new(scene, scene.pixel_rng(x, y))
    }

    /// Disable Russian roulette; paths then run to [`MAX_DEPTH`].
    #[cfg(test)]
    pub(crate) fn without_roulette(mut self) -> Self {
        self.roulette = false;
        self
    }

    /// Next random draw reduced into `[0, bound)`.
    pub fn sample(&mut self, bound: Scalar) -> Scalar {
        self.rng.below(bound)
    }

    /// Radiance arriving along `ray`.
    pub fn radiance(&mut self, ray: Ray) -> Color {
        if ray.depth > MAX_DEPTH {
            return Color::ZERO;
        }

        let Some(hit) = self.scene.trace_ray(&ray) else {
            return Color::ZERO;
        };

        let surface = *self.scene.surface(&hit);
        let reflectance = surface.reflectance();
        let mut color = surface.color;

        let ray = ray.bounced();
        if self.roulette && ray.depth > ROULETTE_DEPTH {
            if self.sample(SCALE) < reflectance {
                color = color * SCALE / reflectance;
            } else {
                return surface.emission;
            }
        }

        let point = ray.at(hit.dist);
        let normal = self.scene.normal(&hit, point);
        let incoming = match surface.material {
            Material::Diffuse => {
                // Shade the side the ray arrived from
                let normal = if normal.dot(ray.direction) >= Scalar::ZERO {
                    -normal
                } else {
                    normal
                };
                self.diffuse(&ray, point, normal)
            }
            Material::Specular => self.specular(&ray, point, normal),
            Material::Refractive => self.refractive(&ray, point, normal),
        };

        surface.emission + color * incoming / SCALE
    }

    /// Cosine-weighted bounce into the hemisphere around `normal`.
    fn diffuse(&mut self, ray: &Ray, point: Vector, normal: Vector) -> Color {
        let r1 = TWO_PI * self.sample(SCALE) / SCALE;
        let r2 = self.sample(SCALE);
        let r2s = fixed::sqrt(r2) * MILLI;

        let axis = if fixed::abs(normal.x) > TANGENT_SWITCH {
            Vector::fixed(0, 1_000_000, 0)
        } else {
            Vector::fixed(1_000_000, 0, 0)
        };
        let u = axis.cross(normal).norm();
        let v = normal.cross(u).norm();

        let direction = (u * (fixed::cos(r1) * r2s / SCALE)
            + v * (fixed::sin(r1) * r2s / SCALE)
            + normal * (fixed::sqrt(SCALE - r2) * MILLI))
            .norm();

        self.radiance(ray.continue_from(point, direction))
    }

    /// Mirror reflection about `normal`.
    fn specular(&mut self, ray: &Ray, point: Vector, normal: Vector) -> Color {
        let d2 = TWO * normal.dot(ray.direction);
        let reflected = (ray.direction - normal * (d2 / SCALE)).norm();
        self.radiance(ray.continue_from(point, reflected))
    }

    /// Glass: total internal reflection, or a Schlick-weighted mix of the
    /// reflected and transmitted paths.
    ///
    /// Shallow paths trace both branches. Deeper ones pick one at random and
    /// reweight it.
    fn refractive(&mut self, ray: &Ray, point: Vector, normal: Vector) -> Color {
        let nnt = if ray.refract {
            GLASS_TO_AIR
        } else {
            AIR_TO_GLASS
        };

        let mut ddn = normal.dot(ray.direction) / SCALE;
        if ddn >= Scalar::ZERO {
            ddn = -ddn;
        }

        let cos2t = SCALE_SQ - nnt * nnt * (SCALE_SQ - ddn * ddn) / SCALE_SQ;
        if cos2t < Scalar::ZERO {
            return self.specular(ray, point, normal);
        }

        let sign = if ray.refract {
            Scalar::ONE
        } else {
            -Scalar::ONE
        };
        let bend = (ddn * nnt / SCALE + fixed::sqrt(cos2t)) * sign;
        let refracted = ((ray.direction * nnt - normal * bend) / SCALE).norm();

        let c = if ray.refract {
            SCALE + ddn
        } else {
            SCALE - refracted.dot(normal) / SCALE
        };
        let re = R0 + (SCALE - R0) * c * c * c * c * c / SCALE_POW5;

        if ray.depth <= BLEND_DEPTH {
            let transmitted = self.radiance(ray.cross_boundary(point, refracted)) * (SCALE - re);
            let reflected = self.specular(ray, point, normal) * re;
            return (transmitted + reflected) / SCALE;
        }

        let threshold = QUARTER + re / TWO;
        if self.sample(SCALE) < threshold {
            return self.specular(ray, point, normal) * re / threshold;
        }
        self.radiance(ray.cross_boundary(point, refracted)) * (SCALE - re)
            / (THREE_QUARTERS - re / TWO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Surface;
    use crate::{SceneConfig, Sphere, Triangle};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tiny_config() -> SceneConfig {
        SceneConfig {
            width: 1,
            height: 1,
            ..SceneConfig::default()
        }
    }

    /// Glowing diffuse shell enclosing the origin.
    fn shell_scene() -> Scene {
        let shell = Sphere::new(
            fixed(100_000_000),
            Vector::ZERO,
            Surface::new(
                Vector::splat(1_000_000),
                Vector::splat(500_000),
                Material::Diffuse,
            ),
        );
        let camera = Ray::new(Vector::ZERO, Vector::fixed(0, 0, -1_000_000));
        Scene::new(&tiny_config(), camera, vec![shell], vec![])
    }

    fn outward(depth: u32) -> Ray {
        Ray {
            depth,
            ..Ray::new(Vector::ZERO, Vector::fixed(1_000_000, 0, 0))
        }
    }

    #[test]
    fn test_miss_is_black() {
        let camera = Ray::new(Vector::ZERO, Vector::fixed(0, 0, -1_000_000));
        let scene = Scene::new(&tiny_config(), camera, vec![], vec![]);
        let mut tracer = PathTracer::new(&scene, Lcg::new(1));
        assert_eq!(tracer.radiance(camera), Color::ZERO);
    }

    #[test]
    fn test_too_deep_is_black() {
        let scene = shell_scene();
        let mut tracer = PathTracer::new(&scene, Lcg::new(1));
        assert_eq!(tracer.radiance(outward(MAX_DEPTH + 1)), Color::ZERO);
    }

    #[test]
    fn test_last_bounce_returns_emission() {
        let scene = shell_scene();
        let mut tracer = PathTracer::new(&scene, Lcg::new(1)).without_roulette();
        // The bounce after the hit is beyond the depth limit
        assert_eq!(tracer.radiance(outward(MAX_DEPTH)), Vector::splat(1_000_000));
    }

    #[test]
    fn test_geometric_series_without_roulette() {
        let scene = shell_scene();
        let mut tracer = PathTracer::new(&scene, Lcg::new(7)).without_roulette();
        // 1 + 1/2 + 1/4 + 1/8 + 1/16 for depths 6 through 10
        assert_eq!(tracer.radiance(outward(6)), Vector::splat(1_937_500));
    }

    #[test]
    fn test_roulette_is_unbiased() {
        let scene = shell_scene();
        let mut seeds = StdRng::seed_from_u64(42);
        let paths = 4000;

        let mut total = 0i128;
        for _ in 0..paths {
            let mut tracer = PathTracer::new(&scene, Lcg::new(seeds.gen()));
            total += tracer.radiance(outward(6)).x.as_i128();
        }
        let mean = total / paths;

        let expected = 1_937_500i128;
        assert!(
            (mean - expected).abs() < expected / 20,
            "roulette mean {mean} too far from {expected}"
        );
    }

    #[test]
    fn test_mirror_sees_light() {
        // Ray bounces off a mirror into an emitter behind the origin
        let mirror = Sphere::new(
            fixed(1_000_000),
            Vector::fixed(0, 0, -5_000_000),
            Surface::plain(Vector::splat(1_000_000), Material::Specular),
        );
        let light = Sphere::new(
            fixed(1_000_000),
            Vector::fixed(0, 0, 5_000_000),
            Surface::new(Vector::splat(2_000_000), Vector::ZERO, Material::Diffuse),
        );
        let camera = Ray::new(Vector::ZERO, Vector::fixed(0, 0, -1_000_000));
        let scene = Scene::new(&tiny_config(), camera, vec![mirror, light], vec![]);
        let mut tracer = PathTracer::new(&scene, Lcg::new(3));
        assert_eq!(tracer.radiance(camera), Vector::splat(2_000_000));
    }

    #[test]
    fn test_glass_pane_transmits_and_reflects() {
        // Red light behind a glass triangle, blue light behind the camera.
        // A shallow head-on hit traces both branches and blends them.
        let pane = Triangle::new(
            Vector::fixed(-3_000_000, -3_000_000, -2_000_000),
            Vector::fixed(3_000_000, -3_000_000, -2_000_000),
            Vector::fixed(0, 3_000_000, -2_000_000),
            Surface::plain(Vector::splat(1_000_000), Material::Refractive),
        );
        let far = Sphere::new(
            fixed(1_000_000),
            Vector::fixed(0, 0, -10_000_000),
            Surface::new(Vector::fixed(1_000_000, 0, 0), Vector::ZERO, Material::Diffuse),
        );
        let near = Sphere::new(
            fixed(1_000_000),
            Vector::fixed(0, 0, 10_000_000),
            Surface::new(Vector::fixed(0, 0, 1_000_000), Vector::ZERO, Material::Diffuse),
        );
        let camera = Ray::new(Vector::ZERO, Vector::fixed(0, 0, -1_000_000));
        let scene = Scene::new(&tiny_config(), camera, vec![far, near], vec![pane]);
        let mut tracer = PathTracer::new(&scene, Lcg::new(5));
        let color = tracer.radiance(camera);

        // Transmitted and reflected weights sum to one
        assert_eq!(color.x + color.z, SCALE);
        assert!(color.z > R0);
        assert_eq!(color.y, Scalar::ZERO);
    }
}
