use std::fmt;

use crate::dtype::DType;
use crate::error::{ArrayError, Result, ValidationError};
use crate::math::buffer::{dispatch, Buffer, Element};
use crate::math::layout::{Layout, RANK};
use crate::math::literal::Literal;

/// A rank-2 array owning a typed buffer and the layout used to read it.
///
/// Every element access goes through [`Layout::offset`], so a transposed
/// array reads correctly without its buffer ever being reordered.
#[derive(Clone, Debug)]
pub struct Array {
    pub(crate) buffer: Buffer,
    pub(crate) layout: Layout,
}

impl Array {
    pub(crate) fn from_parts(buffer: Buffer, layout: Layout) -> Self {
        debug_assert_eq!(buffer.len(), layout.size());
        Self { buffer, layout }
    }

    /// Build an array from nested literal data, a shape, or both.
    ///
    /// A shape alone allocates a zero-filled array (double precision unless
    /// `dtype` says otherwise). When both are given they must agree.
    pub fn construct(
        values: Option<&Literal>,
        shape: Option<&[usize]>,
        dtype: Option<DType>,
    ) -> Result<Self> {
        let shaped = shape.map(Layout::from_shape).transpose()?;
        match (values, shaped) {
            (Some(values), shaped) => {
                let array = Self::from_literal(values, dtype)?;
                if let Some(layout) = shaped {
                    if layout.dims() != array.layout.dims() {
                        return Err(ValidationError::ShapeMismatch {
                            shape: layout.dims(),
                            dims: array.layout.dims(),
                        }
                        .into());
                    }
                }
                Ok(array)
            }
            (None, Some(layout)) => {
                let dtype = dtype.unwrap_or_default();
                log::debug!("allocating {:?} {} array", layout.dims(), dtype);
                Ok(Self::from_parts(Buffer::zeros(dtype, layout.size()), layout))
            }
            (None, None) => Err(ValidationError::MissingInitializer.into()),
        }
    }

    pub fn from_literal(values: &Literal, dtype: Option<DType>) -> Result<Self> {
        let table = values.table()?;
        let dtype = table.resolve_dtype(dtype)?;
        Ok(Self::from_parts(
            table.to_buffer(dtype),
            Layout::row_major(table.dims),
        ))
    }

    /// Zero-filled array of the given shape.
    pub fn zeros(shape: &[usize], dtype: DType) -> Result<Self> {
        Self::construct(None, Some(shape), Some(dtype))
    }

    pub fn from_shape_vec<T: Element>(shape: (usize, usize), data: Vec<T>) -> Result<Self> {
        let (rows, cols) = shape;
        let layout = Layout::from_shape(&[rows, cols])?;
        if data.len() != layout.size() {
            return Err(ValidationError::LengthMismatch {
                expected: layout.size(),
                found: data.len(),
            }
            .into());
        }
        Ok(Self::from_parts(Buffer::from(data), layout))
    }

    /// Column vector holding `data`.
    pub fn from_vec<T: Element>(data: Vec<T>) -> Result<Self> {
        if data.is_empty() {
            return Err(ValidationError::EmptyInput.into());
        }
        Self::from_shape_vec((data.len(), 1), data)
    }

    pub fn from_rows<T: Element>(rows: Vec<Vec<T>>) -> Result<Self> {
        let ncols = rows.first().ok_or(ValidationError::EmptyInput)?.len();
        let mut data = Vec::with_capacity(rows.len() * ncols);
        for (row, values) in rows.iter().enumerate() {
            if values.is_empty() {
                return Err(ValidationError::EmptyRow { row }.into());
            }
            if values.len() != ncols {
                return Err(ValidationError::JaggedRows {
                    row,
                    expected: ncols,
                    found: values.len(),
                }
                .into());
            }
            data.extend_from_slice(values);
        }
        Self::from_shape_vec((rows.len(), ncols), data)
    }

    pub fn dtype(&self) -> DType {
        self.buffer.dtype()
    }

    pub fn rank(&self) -> usize {
        RANK
    }

    pub fn dims(&self) -> (usize, usize) {
        let [d0, d1] = self.layout.dims();
        (d0, d1)
    }

    pub fn strides(&self) -> (usize, usize) {
        let [s0, s1] = self.layout.strides();
        (s0, s1)
    }

    pub fn nrows(&self) -> usize {
        self.layout.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.layout.ncols()
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    fn typed<T: Element>(&self) -> Result<&[T]> {
        T::slice(&self.buffer).ok_or(ArrayError::TypeMismatch {
            expected: self.dtype(),
            found: T::DTYPE,
        })
    }

    /// Element at logical `(row, col)`, or `None` when out of bounds.
    pub fn get<T: Element>(&self, row: usize, col: usize) -> Result<Option<T>> {
        let data = self.typed::<T>()?;
        if row >= self.nrows() || col >= self.ncols() {
            return Ok(None);
        }
        Ok(Some(data[self.layout.offset(row, col)]))
    }

    /// Elements in logical row-major order.
    pub fn to_vec<T: Element>(&self) -> Result<Vec<T>> {
        let data = self.typed::<T>()?;
        Ok(self.layout.offsets().map(|offset| data[offset]).collect())
    }

    /// Elements in logical row-major order, widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        dispatch!(&self.buffer, data => {
            self.layout.offsets().map(|offset| data[offset].to_f64()).collect()
        })
    }
}

/// Render a value like C's `%1.2e`, e.g. `-8.10e+01`.
fn format_scientific(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let formatted = format!("{:.2e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}

impl fmt::Display for Array {
    /// One bracketed line per row. Column vectors are printed as one row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut layout = self.layout;
        if layout.ncols() == 1 {
            layout.permute([1, 0]);
        }
        let values: Vec<f64> = dispatch!(&self.buffer, data => {
            layout.offsets().map(|offset| data[offset].to_f64()).collect()
        });
        for row in values.chunks(layout.ncols()) {
            write!(f, "[")?;
            for (idx, value) in row.iter().enumerate() {
                write!(f, "{}", format_scientific(*value))?;
                if idx + 1 != row.len() {
                    write!(f, " ")?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
