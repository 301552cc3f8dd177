use crate::error::{ArrayError, Result, ValidationError};
use crate::math::buffer::{dispatch, Buffer, Element};
use crate::math::layout::Layout;
use crate::math::matrix::Array;

/// `out[i, k] = sum_j lhs[i, j] * rhs[j, k]`, accumulated in ascending `j`.
fn matmul_row<T: Element>(
    lhs: &[T],
    lhs_layout: &Layout,
    rhs: &[T],
    rhs_layout: &Layout,
    row: usize,
) -> Vec<T> {
    (0..rhs_layout.ncols())
        .map(|col| {
            (0..lhs_layout.ncols()).fold(T::zero(), |acc, inner| {
                let a = lhs[lhs_layout.offset(row, inner)];
                let b = rhs[rhs_layout.offset(inner, col)];
                acc.accumulate(a.product(b))
            })
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn matmul<T: Element>(lhs: &[T], lhs_layout: &Layout, rhs: &[T], rhs_layout: &Layout) -> Vec<T> {
    (0..lhs_layout.nrows())
        .flat_map(|row| matmul_row(lhs, lhs_layout, rhs, rhs_layout, row))
        .collect()
}

#[cfg(feature = "parallel")]
fn matmul<T: Element>(lhs: &[T], lhs_layout: &Layout, rhs: &[T], rhs_layout: &Layout) -> Vec<T> {
    use rayon::prelude::*;

    let rows: Vec<Vec<T>> = (0..lhs_layout.nrows())
        .into_par_iter()
        .map(|row| matmul_row(lhs, lhs_layout, rhs, rhs_layout, row))
        .collect();
    rows.concat()
}

fn matmul_typed<T: Element>(
    lhs: &[T],
    lhs_layout: &Layout,
    rhs: &Buffer,
    rhs_layout: &Layout,
) -> Result<Buffer> {
    let rhs = T::slice(rhs).ok_or(ArrayError::TypeMismatch {
        expected: T::DTYPE,
        found: rhs.dtype(),
    })?;
    Ok(Buffer::from(matmul(lhs, lhs_layout, rhs, rhs_layout)))
}

impl Array {
    /// Matrix product `self x other` as a new `(self.d0, other.d1)` array.
    ///
    /// Both operands must share an element type; no promotion is done.
    pub fn dot(&self, other: &Array) -> Result<Array> {
        let (lhs, rhs) = (&self.layout, &other.layout);
        if lhs.ncols() != rhs.nrows() {
            return Err(ValidationError::DimensionMismatch {
                lhs: lhs.dims(),
                rhs: rhs.dims(),
            }
            .into());
        }
        if self.dtype() != other.dtype() {
            return Err(ArrayError::TypeMismatch {
                expected: self.dtype(),
                found: other.dtype(),
            });
        }
        log::trace!(
            "dot {:?} x {:?} ({})",
            lhs.dims(),
            rhs.dims(),
            self.dtype()
        );
        let buffer = dispatch!(&self.buffer, data => matmul_typed(data, lhs, &other.buffer, rhs)?);
        Ok(Array::from_parts(
            buffer,
            Layout::row_major([lhs.nrows(), rhs.ncols()]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    #[test]
    fn test_matrix_vector() {
        let a = Array::from_rows(vec![
            vec![3i32, 1, 5, 2, 0],
            vec![4, 4, 1, 0, 3],
            vec![0, 2, 7, 1, 9],
        ])
        .unwrap();
        let b = Array::from_vec(vec![1i32, 1, 0, 3, 2]).unwrap();
        let c = a.dot(&b).unwrap();
        assert_eq!(c.dims(), (3, 1));
        assert_eq!(c.to_vec::<i32>().unwrap(), vec![10, 14, 23]);
    }

    #[test]
    fn test_dot_with_transposed_operand() {
        let a = Array::from_rows(vec![vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
        let mut b = a.clone();
        b.reverse_axes();
        // a * a^T
        let c = a.dot(&b).unwrap();
        assert_eq!(c.to_vec::<f64>().unwrap(), vec![5.0, 11.0, 11.0, 25.0]);
        assert!(c.layout().is_row_major());
    }

    #[test]
    fn test_outer_product() {
        let mut row = Array::from_vec(vec![1i64, 2, 3]).unwrap();
        let col = row.clone();
        row.reverse_axes();
        let outer = col.dot(&row).unwrap();
        assert_eq!(outer.dims(), (3, 3));
        assert_eq!(
            outer.to_vec::<i64>().unwrap(),
            vec![1, 2, 3, 2, 4, 6, 3, 6, 9]
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Array::zeros(&[2, 3], DType::Double).unwrap();
        let b = Array::zeros(&[2, 3], DType::Double).unwrap();
        assert_eq!(
            a.dot(&b).unwrap_err(),
            ArrayError::Validation(ValidationError::DimensionMismatch {
                lhs: [2, 3],
                rhs: [2, 3]
            })
        );
    }

    #[test]
    fn test_dtype_mismatch() {
        let a = Array::zeros(&[2, 2], DType::Int32).unwrap();
        let b = Array::zeros(&[2, 2], DType::Int64).unwrap();
        assert_eq!(
            a.dot(&b).unwrap_err(),
            ArrayError::TypeMismatch {
                expected: DType::Int32,
                found: DType::Int64
            }
        );
    }
}
