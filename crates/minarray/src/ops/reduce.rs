use crate::error::Result;
use crate::math::buffer::{dispatch, Buffer, Element};
use crate::math::layout::{Axis, Layout};
use crate::math::matrix::Array;

/// Sum along `axis`, accumulating left to right in index order.
fn sum_axis<T: Element>(data: &[T], layout: &Layout, axis: Axis) -> Vec<T> {
    let (nrows, ncols) = (layout.nrows(), layout.ncols());
    match axis {
        Axis::Rows => (0..ncols)
            .map(|col| {
                (0..nrows).fold(T::zero(), |acc, row| {
                    acc.accumulate(data[layout.offset(row, col)])
                })
            })
            .collect(),
        Axis::Columns => (0..nrows)
            .map(|row| {
                (0..ncols).fold(T::zero(), |acc, col| {
                    acc.accumulate(data[layout.offset(row, col)])
                })
            })
            .collect(),
    }
}

impl Array {
    /// Reduce one axis by summation into a new array.
    ///
    /// Axis 0 yields a `(1, d1)` row of column sums, axis 1 a `(d0, 1)`
    /// column of row sums. Integer sums wrap on overflow.
    pub fn sum(&self, axis: usize) -> Result<Array> {
        let axis = Axis::try_from(axis)?;
        Ok(self.sum_along(axis))
    }

    pub fn sum_along(&self, axis: Axis) -> Array {
        let layout = &self.layout;
        log::trace!("sum {:?} {} along {:?}", layout.dims(), self.dtype(), axis);
        let dims = match axis {
            Axis::Rows => [1, layout.ncols()],
            Axis::Columns => [layout.nrows(), 1],
        };
        let buffer = dispatch!(&self.buffer, data => Buffer::from(sum_axis(data, layout, axis)));
        Array::from_parts(buffer, Layout::row_major(dims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::error::{ArrayError, ValidationError};

    #[test]
    fn test_sum_on_transposed_view() {
        let mut a = Array::from_rows(vec![vec![1i32, 2, 3], vec![4, 5, 6]]).unwrap();
        a.reverse_axes();
        let s0 = a.sum(0).unwrap();
        assert_eq!(s0.dims(), (1, 2));
        assert_eq!(s0.to_vec::<i32>().unwrap(), vec![6, 15]);
        let s1 = a.sum(1).unwrap();
        assert_eq!(s1.dims(), (3, 1));
        assert_eq!(s1.to_vec::<i32>().unwrap(), vec![5, 7, 9]);
        // receiver keeps its transposed layout
        assert_eq!(a.dims(), (3, 2));
    }

    #[test]
    fn test_sum_wraps_int32() {
        let a = Array::from_vec(vec![i32::MAX, 1]).unwrap();
        assert_eq!(a.sum(0).unwrap().to_vec::<i32>().unwrap(), vec![i32::MIN]);
    }

    #[test]
    fn test_sum_keeps_dtype() {
        for dtype in DType::ALL {
            let mut a = Array::zeros(&[2, 2], dtype).unwrap();
            a.ones();
            assert_eq!(a.sum(1).unwrap().dtype(), dtype);
        }
    }

    #[test]
    fn test_sum_invalid_axis() {
        let a = Array::from_vec(vec![1i64, 1]).unwrap();
        assert_eq!(
            a.sum(2).unwrap_err(),
            ArrayError::Validation(ValidationError::InvalidAxis { axis: 2 })
        );
    }
}
