//! Free-function forms of the array operations.
//!
//! These mirror the package-level API front-ends expose (`array`, `ones`,
//! `randint`, `ravel`, `transpose`, `sum`, `dot`) and forward to the
//! [`Array`] methods.
use crate::dtype::DType;
use crate::error::Result;
use crate::math::{Array, Literal};

/// Build an array from literal values, a shape, or both.
pub fn array(values: Option<&Literal>, shape: Option<&[usize]>, dtype: Option<DType>) -> Result<Array> {
    Array::construct(values, shape, dtype)
}

pub fn ones(shape: &[usize], dtype: Option<DType>) -> Result<Array> {
    let mut a = Array::construct(None, Some(shape), dtype)?;
    a.ones();
    Ok(a)
}

pub fn randint(low: i64, high: i64, shape: &[usize], dtype: Option<DType>) -> Result<Array> {
    let mut a = Array::construct(None, Some(shape), dtype)?;
    a.randint(low, high)?;
    Ok(a)
}

pub fn ravel(a: &Array) -> Array {
    a.ravel()
}

/// Permute the axes of `a`; without `perm` the axes are swapped.
pub fn transpose<'a>(a: &'a mut Array, perm: Option<&[usize]>) -> Result<&'a mut Array> {
    match perm {
        Some(perm) => a.transpose(perm),
        None => Ok(a.reverse_axes()),
    }
}

pub fn sum(a: &Array, axis: usize) -> Result<Array> {
    a.sum(axis)
}

pub fn dot(a: &Array, b: &Array) -> Result<Array> {
    a.dot(b)
}
