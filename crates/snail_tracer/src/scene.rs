//! Scene: camera, image plane and primitive lists.

use snail_math::fixed::fixed;
use snail_math::{Lcg, Ray, Scalar, Vector, SCALE};

use crate::config::{ConfigResult, SceneConfig};
use crate::hittable::{self, Hit, Hittable, PrimitiveKind};
use crate::material::Surface;
use crate::{Sphere, Triangle};

/// Half-extent of the virtual image plane (0.5135).
pub const FOV_SCALE: Scalar = fixed(513_500);

/// An immutable scene, shared freely between render workers.
///
/// The pseudo-random state is not part of the scene: every pixel trace
/// builds its own generator with [`Scene::pixel_rng`].
#[derive(Debug, Clone)]
pub struct Scene {
    salt: u32,
    seed_offset: u32,
    width: u32,
    height: u32,
    camera: Ray,
    delta_x: Vector,
    delta_y: Vector,
    spheres: Vec<Sphere>,
    triangles: Vec<Triangle>,
}

impl Scene {
    /// Build a scene, deriving the per-pixel basis from the camera.
    ///
    /// The config is assumed valid; use [`Scene::from_config`] for untrusted
    /// input.
    pub fn new(
        config: &SceneConfig,
        camera: Ray,
        spheres: Vec<Sphere>,
        triangles: Vec<Triangle>,
    ) -> Self {
        let delta_x = Vector::new(
            fixed(i128::from(config.width)) * FOV_SCALE / fixed(i128::from(config.height)),
            Scalar::ZERO,
            Scalar::ZERO,
        );
        let delta_y = delta_x.cross(camera.direction).norm() * FOV_SCALE / SCALE;

        log::debug!(
            "Built scene {}x{} with {} spheres and {} triangles",
            config.width,
            config.height,
            spheres.len(),
            triangles.len()
        );

        Self {
            salt: config.salt,
            seed_offset: config.seed_offset,
            width: config.width,
            height: config.height,
            camera,
            delta_x,
            delta_y,
            spheres,
            triangles,
        }
    }

    /// Validate `config` and build the benchmark geometry at its resolution.
    pub fn from_config(config: &SceneConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(
            config,
            crate::benchmark::benchmark_camera(),
            crate::benchmark::benchmark_spheres(),
            crate::benchmark::benchmark_triangles(),
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn salt(&self) -> u32 {
        self.salt
    }

    pub fn seed_offset(&self) -> u32 {
        self.seed_offset
    }

    pub fn camera(&self) -> &Ray {
        &self.camera
    }

    /// Image-plane step per unit of horizontal pixel coordinate.
    pub fn delta_x(&self) -> Vector {
        self.delta_x
    }

    /// Image-plane step per unit of vertical pixel coordinate.
    pub fn delta_y(&self) -> Vector {
        self.delta_y
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Fresh generator for pixel `(x, y)`.
    pub fn pixel_rng(&self, x: u32, y: u32) -> Lcg {
        Lcg::for_pixel(self.salt, self.seed_offset, self.width, self.height, x, y)
    }

    /// Nearest intersection along `ray`, spheres scanned before triangles.
    pub fn trace_ray(&self, ray: &Ray) -> Option<Hit> {
        let mut best = None;
        hittable::nearest(&self.spheres, PrimitiveKind::Sphere, ray, &mut best);
        hittable::nearest(&self.triangles, PrimitiveKind::Triangle, ray, &mut best);
        best
    }

    fn object(&self, hit: &Hit) -> &dyn Hittable {
        match hit.kind {
            PrimitiveKind::Sphere => &self.spheres[hit.index],
            PrimitiveKind::Triangle => &self.triangles[hit.index],
        }
    }

    /// Surface of the primitive behind `hit`.
    pub fn surface(&self, hit: &Hit) -> &Surface {
        self.object(hit).surface()
    }

    /// Geometric normal of the primitive behind `hit` at `point`.
    pub fn normal(&self, hit: &Hit, point: Vector) -> Vector {
        self.object(hit).normal_at(point)
    }
}
