//! Surface description shared by all primitives.

use snail_math::{Scalar, Vector};

/// Color type alias (channels in 10^6 fixed point, 10^6 = 1.0)
pub type Color = Vector;

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    /// Lambertian reflector, sampled with a cosine-weighted hemisphere
    Diffuse,
    /// Perfect mirror
    Specular,
    /// Glass: Fresnel-weighted mix of reflection and refraction
    Refractive,
}

/// Emission, reflectance and material of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub emission: Color,
    pub color: Color,
    pub material: Material,
}

impl Surface {
    pub const fn new(emission: Color, color: Color, material: Material) -> Self {
        Self {
            emission,
            color,
            material,
        }
    }

    /// Non-emissive surface of the given color.
    pub const fn plain(color: Color, material: Material) -> Self {
        Self::new(Vector::ZERO, color, material)
    }

    /// Russian-roulette survival threshold: the brightest channel, at least 1.
    pub fn reflectance(&self) -> Scalar {
        self.color.max_element().max(Scalar::ONE)
    }
}
