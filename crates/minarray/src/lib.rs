//! minarray: a minimal two-dimensional numeric array engine.
//!
//! Arrays are always rank 2 and hold one of four element types (`int32`,
//! `int64`, `float`, `double`). A one-dimensional input becomes an `(n, 1)`
//! column. Transposition only permutes dims and strides, so every operation
//! reads elements through the strided layout rather than assuming row-major
//! storage.
//!
//! The engine is synchronous and allocation-owning: `ravel`, `sum` and `dot`
//! return fresh arrays, while `ones`, `randint`, `fill` and `transpose` mutate
//! their receiver in place and leave it untouched when validation fails.
pub mod dtype;
pub mod error;
pub mod functions;
pub mod math;
pub mod ops;

pub use dtype::DType;
pub use error::{ArrayError, ValidationError};
pub use functions::{array, dot, ones, randint, ravel, sum, transpose};
pub use math::{Array, Axis, Literal};
