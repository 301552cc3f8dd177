use crate::error::Result;
use crate::math::buffer::{dispatch, Buffer, Element};
use crate::math::layout::Layout;
use crate::math::matrix::Array;

fn gather<T: Element>(data: &[T], layout: &Layout) -> Vec<T> {
    let mut out = Vec::with_capacity(layout.size());
    for row in 0..layout.nrows() {
        for col in 0..layout.ncols() {
            out.push(data[layout.offset(row, col)]);
        }
    }
    out
}

impl Array {
    /// Flatten into a new `(N, 1)` column in logical row-major order.
    ///
    /// A transposed array is flattened in its transposed order.
    pub fn ravel(&self) -> Array {
        let layout = &self.layout;
        let buffer = dispatch!(&self.buffer, data => Buffer::from(gather(data, layout)));
        Array::from_parts(buffer, Layout::row_major([layout.size(), 1]))
    }

    /// Permute the axes in place without moving any data.
    ///
    /// `perm` must be `[0, 1]` or `[1, 0]`; on error the array is unchanged.
    pub fn transpose(&mut self, perm: &[usize]) -> Result<&mut Self> {
        let perm = Layout::validate_permutation(perm)?;
        self.layout.permute(perm);
        log::trace!(
            "transpose {:?} -> dims {:?} strides {:?}",
            perm,
            self.layout.dims(),
            self.layout.strides()
        );
        Ok(self)
    }

    /// Swap the two axes; what [`Array::transpose`] does without a permutation.
    pub fn reverse_axes(&mut self) -> &mut Self {
        self.layout.permute([1, 0]);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArrayError, ValidationError};

    fn sample() -> Array {
        Array::from_rows(vec![vec![2i64, -81, 26], vec![17, 102, -3]]).unwrap()
    }

    #[test]
    fn test_ravel_row_major() {
        let r = sample().ravel();
        assert_eq!(r.dims(), (6, 1));
        assert_eq!(r.strides(), (1, 1));
        assert_eq!(r.to_vec::<i64>().unwrap(), vec![2, -81, 26, 17, 102, -3]);
    }

    #[test]
    fn test_ravel_follows_transposed_view() {
        let mut a = sample();
        a.transpose(&[1, 0]).unwrap();
        assert_eq!(a.dims(), (3, 2));
        assert_eq!(a.strides(), (1, 3));
        assert_eq!(
            a.ravel().to_vec::<i64>().unwrap(),
            vec![2, 17, -81, 102, 26, -3]
        );
        // the buffer itself was never reordered
        assert_eq!(a.buffer(), &Buffer::Int64(vec![2, -81, 26, 17, 102, -3]));
    }

    #[test]
    fn test_transpose_twice_restores_layout() {
        let mut a = sample();
        let before = *a.layout();
        a.transpose(&[1, 0]).unwrap().transpose(&[1, 0]).unwrap();
        assert_eq!(*a.layout(), before);
    }

    #[test]
    fn test_bad_permutation_is_atomic() {
        let mut a = sample();
        a.reverse_axes();
        let before = *a.layout();

        for perm in [&[1usize, 2][..], &[1][..], &[0, 0][..], &[0, 1, 0][..]] {
            let err = a.transpose(perm).unwrap_err();
            assert!(matches!(err, ArrayError::Validation(_)), "{:?}", perm);
            assert_eq!(*a.layout(), before);
        }
        assert_eq!(
            a.transpose(&[]).unwrap_err(),
            ArrayError::Validation(ValidationError::PermutationRank { len: 0 })
        );
    }
}
