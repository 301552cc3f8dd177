//! Storage and layout of rank-2 arrays.
//!
//! `Buffer` holds the typed elements, `Layout` the dims and strides used to
//! address them, and `Array` ties both together with construction and
//! validation. Numeric kernels live in `crate::ops`.
pub mod buffer;
pub mod layout;
pub mod literal;
pub mod matrix;

pub use buffer::{Buffer, Element};
pub use layout::{Axis, Layout, RANK};
pub use literal::{Literal, ScalarKind};
pub use matrix::Array;
