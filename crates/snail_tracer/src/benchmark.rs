//! The reference benchmark scene.
//!
//! A Cornell-style room built from six huge diffuse spheres, a mirror ball, a
//! glass octahedron made of twelve triangles, and a spherical light poking
//! through the ceiling. Rendering the four [`BENCHMARK_POINTS`] at 8 samples
//! each and averaging must give exactly [`BENCHMARK_ORACLE`].

use snail_math::fixed::fixed;
use snail_math::{Ray, Vector};

use crate::material::{Material, Surface};
use crate::{Scene, SceneConfig, Sphere, Triangle};

/// Pixels traced by the benchmark, with their sample count.
///
/// In order: flat diffuse wall, mirror reflecting the left wall, glass
/// reflecting the right wall, mirror reflecting the glass reflecting the light.
pub const BENCHMARK_POINTS: [(u32, u32, u32); 4] = [
    (512, 384, 8),
    (325, 540, 8),
    (600, 600, 8),
    (522, 524, 8),
];

/// Expected average color of [`BENCHMARK_POINTS`] on the reference scene.
pub const BENCHMARK_ORACLE: [u8; 3] = [17, 17, 53];

const WHITE: Vector = Vector::splat(750_000);
const GLASS: Surface = Surface::plain(Vector::splat(999_000), Material::Refractive);

/// Camera looking down the room, slightly tilted toward the floor.
pub fn benchmark_camera() -> Ray {
    Ray::new(
        Vector::fixed(50_000_000, 50_000_000, 295_600_000),
        Vector::fixed(0, -42_612, -1_000_000).norm(),
    )
}

pub fn benchmark_spheres() -> Vec<Sphere> {
    let wall = fixed(100_000_000_000);
    vec![
        // Left
        Sphere::new(
            wall,
            Vector::fixed(100_001_000_000, 40_800_000, 81_600_000),
            Surface::plain(Vector::fixed(750_000, 250_000, 250_000), Material::Diffuse),
        ),
        // Right
        Sphere::new(
            wall,
            Vector::fixed(-99_901_000_000, 40_800_000, 81_600_000),
            Surface::plain(Vector::fixed(250_000, 250_000, 750_000), Material::Diffuse),
        ),
        // Back
        Sphere::new(
            wall,
            Vector::fixed(50_000_000, 40_800_000, 100_000_000_000),
            Surface::plain(WHITE, Material::Diffuse),
        ),
        // Front
        Sphere::new(
            wall,
            Vector::fixed(50_000_000, 40_800_000, -99_830_000_000),
            Surface::plain(Vector::ZERO, Material::Diffuse),
        ),
        // Bottom
        Sphere::new(
            wall,
            Vector::fixed(50_000_000, 100_000_000_000, 81_600_000),
            Surface::plain(WHITE, Material::Diffuse),
        ),
        // Top
        Sphere::new(
            wall,
            Vector::fixed(50_000_000, -99_918_400_000, 81_600_000),
            Surface::plain(WHITE, Material::Diffuse),
        ),
        // Mirror
        Sphere::new(
            fixed(16_500_000),
            Vector::fixed(27_000_000, 16_500_000, 47_000_000),
            Surface::plain(Vector::splat(999_000), Material::Specular),
        ),
        // Light
        Sphere::new(
            fixed(600_000_000),
            Vector::fixed(50_000_000, 681_330_000, 81_600_000),
            Surface::new(Vector::splat(12_000_000), Vector::ZERO, Material::Diffuse),
        ),
    ]
}

/// Glass octahedron, split at the equator into an upper and lower half.
pub fn benchmark_triangles() -> Vec<Triangle> {
    const FACES: [[Vector; 3]; 12] = [
        [
            Vector::fixed(56_500_000, 25_740_000, 78_000_000),
            Vector::fixed(73_000_000, 25_740_000, 94_500_000),
            Vector::fixed(73_000_000, 49_500_000, 78_000_000),
        ],
        [
            Vector::fixed(56_500_000, 23_760_000, 78_000_000),
            Vector::fixed(73_000_000, 0, 78_000_000),
            Vector::fixed(73_000_000, 23_760_000, 94_500_000),
        ],
        [
            Vector::fixed(89_500_000, 25_740_000, 78_000_000),
            Vector::fixed(73_000_000, 49_500_000, 78_000_000),
            Vector::fixed(73_000_000, 25_740_000, 94_500_000),
        ],
        [
            Vector::fixed(89_500_000, 23_760_000, 78_000_000),
            Vector::fixed(73_000_000, 23_760_000, 94_500_000),
            Vector::fixed(73_000_000, 0, 78_000_000),
        ],
        [
            Vector::fixed(56_500_000, 25_740_000, 78_000_000),
            Vector::fixed(73_000_000, 49_500_000, 78_000_000),
            Vector::fixed(73_000_000, 25_740_000, 61_500_000),
        ],
        [
            Vector::fixed(56_500_000, 23_760_000, 78_000_000),
            Vector::fixed(73_000_000, 23_760_000, 61_500_000),
            Vector::fixed(73_000_000, 0, 78_000_000),
        ],
        [
            Vector::fixed(89_500_000, 25_740_000, 78_000_000),
            Vector::fixed(73_000_000, 25_740_000, 61_500_000),
            Vector::fixed(73_000_000, 49_500_000, 78_000_000),
        ],
        [
            Vector::fixed(89_500_000, 23_760_000, 78_000_000),
            Vector::fixed(73_000_000, 0, 78_000_000),
            Vector::fixed(73_000_000, 23_760_000, 61_500_000),
        ],
        // Equatorial caps
        [
            Vector::fixed(56_500_000, 25_740_000, 78_000_000),
            Vector::fixed(73_000_000, 25_740_000, 61_500_000),
            Vector::fixed(89_500_000, 25_740_000, 78_000_000),
        ],
        [
            Vector::fixed(56_500_000, 25_740_000, 78_000_000),
            Vector::fixed(89_500_000, 25_740_000, 78_000_000),
            Vector::fixed(73_000_000, 25_740_000, 94_500_000),
        ],
        [
            Vector::fixed(56_500_000, 23_760_000, 78_000_000),
            Vector::fixed(89_500_000, 23_760_000, 78_000_000),
            Vector::fixed(73_000_000, 23_760_000, 61_500_000),
        ],
        [
            Vector::fixed(56_500_000, 23_760_000, 78_000_000),
            Vector::fixed(73_000_000, 23_760_000, 94_500_000),
            Vector::fixed(89_500_000, 23_760_000, 78_000_000),
        ],
    ];

    FACES
        .iter()
        .map(|&[a, b, c]| Triangle::new(a, b, c, GLASS))
        .collect()
}

impl Scene {
    /// The reference scene at 1024×768.
    ///
    /// `salt` identifies the scene instance and `seed_offset` shifts every
    /// pixel seed; `(0, 0)` reproduces [`BENCHMARK_ORACLE`].
    pub fn benchmark(salt: u32, seed_offset: u32) -> Self {
        Self::new(
            &SceneConfig {
                salt,
                seed_offset,
                ..SceneConfig::default()
            },
            benchmark_camera(),
            benchmark_spheres(),
            benchmark_triangles(),
        )
    }
}

/// Average color of the benchmark points, with integer truncation.
pub fn benchmark_color(scene: &Scene) -> [u8; 3] {
    let mut sum = [0u32; 3];
    for &(x, y, spp) in &BENCHMARK_POINTS {
        let rgb = scene.trace(x, y, spp);
        for (acc, channel) in sum.iter_mut().zip(rgb) {
            *acc += u32::from(channel);
        }
    }
    sum.map(|c| (c / BENCHMARK_POINTS.len() as u32) as u8)
}

/// Pack a color as `0xRRGGBB`.
pub fn pack_rgb([r, g, b]: [u8; 3]) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}
