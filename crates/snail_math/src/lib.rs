//! SnailTrace math - deterministic 10^6 fixed-point primitives.
//!
//! No floating point is used anywhere in this crate, so every operation
//! produces the same bits on every platform.

pub mod fixed;
mod lcg;
mod ray;
mod vector;

pub use fixed::{Scalar, EPSILON, SCALE, SCALE_SQ, TWO_PI};
pub use lcg::Lcg;
pub use ray::Ray;
pub use vector::Vector;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_creation() {
        let v = Vector::fixed(1_000_000, 2_000_000, 3_000_000);
        assert_eq!(v.x, Scalar::new(1_000_000));
        assert_eq!(v.y, Scalar::new(2_000_000));
        assert_eq!(v.z, Scalar::new(3_000_000));
    }

    #[test]
    fn test_vector_operations() {
        let a = Vector::fixed(1, 2, 3);
        let b = Vector::fixed(4, 5, 6);
        let c = a + b;
        assert_eq!(c, Vector::fixed(5, 7, 9));
    }
}
