//! Pixel sampling and the output framebuffer.
//!
//! Implements the per-pixel side of the tracer:
//! - Jittered primary rays through the scene's image plane
//! - Averaging of the fixed-point samples
//! - Quantization to 8-bit RGB

use snail_math::fixed::{self, fixed};
use snail_math::{Ray, Scalar, SCALE};

use crate::{Color, PathTracer, Scene};

/// Half a pixel, in the 10^6 scale.
const HALF: Scalar = fixed(500_000);

/// Primary rays start this far (in raw units of the unit direction) along
/// the view direction.
const NEAR_PUSH: Scalar = fixed(140);

/// Radiance of pixel `(x, y)`, averaged over `spp` jittered samples.
///
/// Each sample draws its horizontal jitter before its vertical one, and each
/// sample's contribution is divided by `spp` before accumulation.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, spp: u32) -> Color {
    let mut tracer = PathTracer::for_pixel(scene, x, y);
    let camera = *scene.camera();
    let width = fixed(i128::from(scene.width()));
    let height = fixed(i128::from(scene.height()));
    let samples = fixed(i128::from(spp));

    let mut color = Color::ZERO;
    for _ in 0..spp {
        let jitter_x = (SCALE * fixed(i128::from(x)) + tracer.sample(HALF)) / width - HALF;
        let offset_x = scene.delta_x() * jitter_x;
        let jitter_y = (SCALE * fixed(i128::from(y)) + tracer.sample(HALF)) / height - HALF;
        let offset_y = scene.delta_y() * jitter_y;

        let pixel = (offset_x + offset_y) / SCALE + camera.direction;
        let ray = Ray::new(camera.origin + pixel * NEAR_PUSH, pixel.norm());
        color += tracer.radiance(ray) / samples;
    }
    color
}

/// Convert a color to 8-bit RGB: clamp to `[0, 1]` and scale by 255,
/// truncating.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let c = color.clamp() * fixed(255) / SCALE;
    [
        fixed::to_channel(c.x),
        fixed::to_channel(c.y),
        fixed::to_channel(c.z),
    ]
}

impl Scene {
    /// Trace pixel `(x, y)` with `spp` samples and return its final color.
    ///
    /// The result depends only on the scene and the arguments.
    pub fn trace(&self, x: u32, y: u32, spp: u32) -> [u8; 3] {
        color_to_rgb(render_pixel(self, x, y, spp))
    }
}

/// Rendered pixels of one image, row `y = 0` at the bottom.
///
/// Pixels that were never rendered (for instance after a cancelled render)
/// stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Option<[u8; 3]>>,
}

impl Framebuffer {
    /// Create an empty framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = Some(rgb);
    }

    /// Store a whole rendered row.
    pub fn set_row(&mut self, y: u32, row: &[[u8; 3]]) {
        let start = self.index(0, y);
        for (slot, rgb) in self.pixels[start..start + row.len()].iter_mut().zip(row) {
            *slot = Some(*rgb);
        }
    }

    /// Number of pixels that have been rendered.
    pub fn rendered_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.pixels.iter().all(Option::is_some)
    }

    /// Convert to tightly packed RGB bytes in image order (top row first).
    ///
    /// Scene row `y` lands on image row `height - 1 - y`; unrendered pixels
    /// are black.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                bytes.extend_from_slice(&self.get(x, y).unwrap_or([0, 0, 0]));
            }
        }
        bytes
    }
}
