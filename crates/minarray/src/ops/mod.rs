//! Array operations: fills, ravel/transpose, axis sums and the matrix product.
//!
//! Each kernel is written once, generic over [`crate::math::Element`], and
//! dispatched on the buffer variant at the operation boundary.
pub mod dot;
pub mod fill;
pub mod reduce;
pub mod transform;
