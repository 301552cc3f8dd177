use crate::error::ValidationError;

/// Number of axes of every array.
pub const RANK: usize = 2;

/// Axis selector for reductions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Collapse rows, keeping one value per column.
    Rows,
    /// Collapse columns, keeping one value per row.
    Columns,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::Rows => 0,
            Axis::Columns => 1,
        }
    }
}

impl TryFrom<usize> for Axis {
    type Error = ValidationError;

    fn try_from(axis: usize) -> Result<Self, Self::Error> {
        match axis {
            0 => Ok(Axis::Rows),
            1 => Ok(Axis::Columns),
            _ => Err(ValidationError::InvalidAxis { axis }),
        }
    }
}

/// Dims and strides of a rank-2 array.
///
/// Strides are element offsets, so logical index `(i, j)` lives at
/// `i * strides[0] + j * strides[1]` in the owning buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    dims: [usize; RANK],
    strides: [usize; RANK],
}

impl Layout {
    /// Row-major layout for `dims`. Callers guarantee both dims are non-zero.
    pub fn row_major(dims: [usize; RANK]) -> Self {
        Self {
            dims,
            strides: [dims[1], 1],
        }
    }

    /// Validate a 1- or 2-entry shape, coercing `(n,)` into a column `(n, 1)`.
    pub fn from_shape(shape: &[usize]) -> Result<Self, ValidationError> {
        let dims = match *shape {
            [n] => [n, 1],
            [r, c] => [r, c],
            _ => return Err(ValidationError::ShapeRank { len: shape.len() }),
        };
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(ValidationError::ZeroDimension { axis });
        }
        // widest element is 8 bytes; allocations are capped at isize::MAX bytes
        let fits = dims[0]
            .checked_mul(dims[1])
            .and_then(|len| len.checked_mul(std::mem::size_of::<f64>()))
            .map_or(false, |bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(ValidationError::ShapeTooLarge { dims });
        }
        Ok(Self::row_major(dims))
    }

    pub fn dims(&self) -> [usize; RANK] {
        self.dims
    }

    pub fn strides(&self) -> [usize; RANK] {
        self.strides
    }

    pub fn nrows(&self) -> usize {
        self.dims[0]
    }

    pub fn ncols(&self) -> usize {
        self.dims[1]
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.dims[0] * self.dims[1]
    }

    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.strides[0] + col * self.strides[1]
    }

    /// Whether the strides are those of a fresh row-major array.
    pub(crate) fn is_row_major(&self) -> bool {
        self.strides == [self.dims[1], 1]
    }

    /// Check that `perm` is a permutation of the axes.
    pub fn validate_permutation(perm: &[usize]) -> Result<[usize; RANK], ValidationError> {
        let perm: [usize; RANK] = perm
            .try_into()
            .map_err(|_| ValidationError::PermutationRank { len: perm.len() })?;
        if let Some(&value) = perm.iter().find(|&&p| p >= RANK) {
            return Err(ValidationError::PermutationAxis { value });
        }
        if perm[0] == perm[1] {
            return Err(ValidationError::NotAPermutation { perm });
        }
        Ok(perm)
    }

    /// Reorder dims and strides together. `perm` must already be validated.
    pub fn permute(&mut self, perm: [usize; RANK]) {
        self.dims = [self.dims[perm[0]], self.dims[perm[1]]];
        self.strides = [self.strides[perm[0]], self.strides[perm[1]]];
    }

    /// Buffer offsets in logical row-major order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.dims[0])
            .flat_map(move |row| (0..self.dims[1]).map(move |col| self.offset(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shape_coerces_column() {
        let layout = Layout::from_shape(&[5]).unwrap();
        assert_eq!(layout.dims(), [5, 1]);
        assert_eq!(layout.strides(), [1, 1]);

        let layout = Layout::from_shape(&[3, 7]).unwrap();
        assert_eq!(layout.dims(), [3, 7]);
        assert_eq!(layout.strides(), [7, 1]);
    }

    #[test]
    fn test_from_shape_rejects_bad_shapes() {
        assert_eq!(
            Layout::from_shape(&[]),
            Err(ValidationError::ShapeRank { len: 0 })
        );
        assert_eq!(
            Layout::from_shape(&[1, 1, 1]),
            Err(ValidationError::ShapeRank { len: 3 })
        );
        assert_eq!(
            Layout::from_shape(&[4, 0]),
            Err(ValidationError::ZeroDimension { axis: 1 })
        );
        assert_eq!(
            Layout::from_shape(&[usize::MAX, 2]),
            Err(ValidationError::ShapeTooLarge {
                dims: [usize::MAX, 2]
            })
        );
    }

    #[test]
    fn test_permute_swaps_dims_and_strides() {
        let mut layout = Layout::row_major([2, 3]);
        layout.permute([1, 0]);
        assert_eq!(layout.dims(), [3, 2]);
        assert_eq!(layout.strides(), [1, 3]);
        assert!(!layout.is_row_major());

        let offsets: Vec<usize> = layout.offsets().collect();
        assert_eq!(offsets, vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_identity_permutation_is_noop() {
        let mut layout = Layout::row_major([2, 3]);
        layout.permute([0, 1]);
        assert_eq!(layout, Layout::row_major([2, 3]));
    }

    #[test]
    fn test_validate_permutation() {
        assert_eq!(Layout::validate_permutation(&[1, 0]), Ok([1, 0]));
        assert_eq!(
            Layout::validate_permutation(&[1]),
            Err(ValidationError::PermutationRank { len: 1 })
        );
        assert_eq!(
            Layout::validate_permutation(&[1, 2]),
            Err(ValidationError::PermutationAxis { value: 2 })
        );
        assert_eq!(
            Layout::validate_permutation(&[0, 0]),
            Err(ValidationError::NotAPermutation { perm: [0, 0] })
        );
    }

    #[test]
    fn test_axis_try_from() {
        assert_eq!(Axis::try_from(0), Ok(Axis::Rows));
        assert_eq!(Axis::try_from(1), Ok(Axis::Columns));
        assert_eq!(
            Axis::try_from(2),
            Err(ValidationError::InvalidAxis { axis: 2 })
        );
    }
}
