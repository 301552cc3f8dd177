use thiserror::Error;

use crate::dtype::DType;

/// Malformed or out-of-domain input to an array operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("array initialisation needs values or a shape")]
    MissingInitializer,
    #[error("array initialisation expects a sequence, got a scalar")]
    NotASequence,
    #[error("array initialisation data cannot be empty")]
    EmptyInput,
    #[error("row {row} is empty")]
    EmptyRow { row: usize },
    #[error("row {row} has length {found}, expected {expected}")]
    JaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("element {index} mixes rows and scalars at the same nesting level")]
    NonUniformNesting { index: usize },
    #[error("nesting depth exceeds two levels")]
    TooDeep,
    #[error("integral and fractional values mixed without an explicit element type")]
    MixedScalars,
    #[error("shape must have 1 or 2 entries, got {len}")]
    ShapeRank { len: usize },
    #[error("dimension {axis} must be positive")]
    ZeroDimension { axis: usize },
    #[error("shape {shape:?} does not match data dimensions {dims:?}")]
    ShapeMismatch { shape: [usize; 2], dims: [usize; 2] },
    #[error("shape {dims:?} is too large to allocate")]
    ShapeTooLarge { dims: [usize; 2] },
    #[error("data has {found} elements, shape needs {expected}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("axis {axis} must be 0 or 1")]
    InvalidAxis { axis: usize },
    #[error("permutation has {len} entries, expected 2")]
    PermutationRank { len: usize },
    #[error("permutation value {value} is not an axis")]
    PermutationAxis { value: usize },
    #[error("permutation {perm:?} repeats an axis")]
    NotAPermutation { perm: [usize; 2] },
    #[error("high ({high}) must be greater than low ({low})")]
    InvalidRange { low: i64, high: i64 },
    #[error("range [{low}, {high}) is not representable as {dtype}")]
    RangeOutOfBounds { low: i64, high: i64, dtype: DType },
    #[error("inner dimensions disagree: {lhs:?} x {rhs:?}")]
    DimensionMismatch { lhs: [usize; 2], rhs: [usize; 2] },
    #[error("unsupported element type '{0}'")]
    UnsupportedDType(String),
    #[error("unsupported element type code {0}")]
    UnsupportedDTypeCode(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("element type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: DType, found: DType },
}

impl ArrayError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ArrayError::Validation(_))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ArrayError::TypeMismatch { .. })
    }
}

pub type Result<T, E = ArrayError> = std::result::Result<T, E>;
