//! Deterministic linear-congruential generator.
//!
//! Each pixel trace owns one of these, seeded from the pixel coordinates, so
//! renders are reproducible regardless of worker count or scheduling.

use rand::RngCore;

use crate::fixed::Scalar;

/// 32-bit LCG: `seed = seed * 1103515245 + 12345` with wraparound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    seed: u32,
}

impl Lcg {
    pub const MULTIPLIER: u32 = 1_103_515_245;
    pub const INCREMENT: u32 = 12_345;

    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Seed for pixel `(x, y)` of a `width` × `height` image.
    ///
    /// `salt` separates scene instances and `offset` shifts the whole
    /// sequence; both are zero for the reference render.
    pub fn for_pixel(salt: u32, offset: u32, width: u32, height: u32, x: u32, y: u32) -> Self {
        let seed = salt
            .wrapping_mul(width)
            .wrapping_mul(height)
            .wrapping_add(y.wrapping_mul(width))
            .wrapping_add(x)
            .wrapping_add(offset);
        Self::new(seed)
    }

    /// Current seed value.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    #[inline]
    fn step(&mut self) -> u32 {
        self.seed = self
            .seed
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.seed
    }

    /// Next draw, widened to a scalar.
    #[inline]
    pub fn next_scalar(&mut self) -> Scalar {
        Scalar::new(i128::from(self.step()))
    }

    /// Next draw reduced into `[0, bound)`.
    #[inline]
    pub fn below(&mut self, bound: Scalar) -> Scalar {
        self.next_scalar() % bound
    }
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(self.step());
        let lo = u64::from(self.step());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
