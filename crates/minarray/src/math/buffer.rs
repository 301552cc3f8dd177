use std::fmt;

use num_traits::{One, Zero};

use crate::dtype::DType;

/// A numeric type that can live in a [`Buffer`].
///
/// Integer arithmetic wraps on overflow; float arithmetic follows IEEE-754.
pub trait Element:
    Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display + Zero + One + Send + Sync + 'static
{
    const DTYPE: DType;

    fn accumulate(self, rhs: Self) -> Self;

    fn product(self, rhs: Self) -> Self;

    fn from_i64(value: i64) -> Self;

    fn from_f64(value: f64) -> Self;

    fn to_f64(self) -> f64;

    /// Whether every integer in `[low, high)` is representable.
    fn holds_range(low: i64, high: i64) -> bool;

    fn into_buffer(data: Vec<Self>) -> Buffer;

    fn slice(buffer: &Buffer) -> Option<&[Self]>;
}

macro_rules! impl_integral {
    ($t:ty, $variant:ident, $dtype:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn accumulate(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn product(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline]
            fn from_i64(value: i64) -> Self {
                value as $t
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            fn holds_range(low: i64, high: i64) -> bool {
                <$t>::try_from(low).is_ok() && <$t>::try_from(high - 1).is_ok()
            }

            fn into_buffer(data: Vec<Self>) -> Buffer {
                Buffer::$variant(data)
            }

            fn slice(buffer: &Buffer) -> Option<&[Self]> {
                match buffer {
                    Buffer::$variant(data) => Some(data.as_slice()),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! impl_fractional {
    ($t:ty, $variant:ident, $dtype:expr, $mantissa_bits:expr) => {
        impl Element for $t {
            const DTYPE: DType = $dtype;

            #[inline]
            fn accumulate(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn product(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn from_i64(value: i64) -> Self {
                value as $t
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            /// Every integer in `[-2^m, 2^m]` is exact, `m` being the mantissa width.
            fn holds_range(low: i64, high: i64) -> bool {
                let exact = 1i64 << $mantissa_bits;
                -exact <= low && high <= exact
            }

            fn into_buffer(data: Vec<Self>) -> Buffer {
                Buffer::$variant(data)
            }

            fn slice(buffer: &Buffer) -> Option<&[Self]> {
                match buffer {
                    Buffer::$variant(data) => Some(data.as_slice()),
                    _ => None,
                }
            }
        }
    };
}

impl_integral!(i32, Int32, DType::Int32);
impl_integral!(i64, Int64, DType::Int64);
impl_fractional!(f32, Float, DType::Float, f32::MANTISSA_DIGITS);
impl_fractional!(f64, Double, DType::Double, f64::MANTISSA_DIGITS);

/// Contiguous owned storage, one variant per supported element type.
#[derive(Clone, Debug, PartialEq)]
pub enum Buffer {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

/// Run `$body` with `$data` bound to the buffer's typed slice.
macro_rules! dispatch {
    ($buffer:expr, $data:ident => $body:expr) => {
        match $buffer {
            $crate::math::buffer::Buffer::Int32(v) => {
                let $data: &[i32] = v.as_slice();
                $body
            }
            $crate::math::buffer::Buffer::Int64(v) => {
                let $data: &[i64] = v.as_slice();
                $body
            }
            $crate::math::buffer::Buffer::Float(v) => {
                let $data: &[f32] = v.as_slice();
                $body
            }
            $crate::math::buffer::Buffer::Double(v) => {
                let $data: &[f64] = v.as_slice();
                $body
            }
        }
    };
}

/// Mutable counterpart of [`dispatch!`].
macro_rules! dispatch_mut {
    ($buffer:expr, $data:ident => $body:expr) => {
        match $buffer {
            $crate::math::buffer::Buffer::Int32(v) => {
                let $data: &mut [i32] = v.as_mut_slice();
                $body
            }
            $crate::math::buffer::Buffer::Int64(v) => {
                let $data: &mut [i64] = v.as_mut_slice();
                $body
            }
            $crate::math::buffer::Buffer::Float(v) => {
                let $data: &mut [f32] = v.as_mut_slice();
                $body
            }
            $crate::math::buffer::Buffer::Double(v) => {
                let $data: &mut [f64] = v.as_mut_slice();
                $body
            }
        }
    };
}

pub(crate) use dispatch;
pub(crate) use dispatch_mut;

impl Buffer {
    /// Zero-filled storage of `len` elements.
    pub fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::Int32 => Buffer::Int32(vec![0; len]),
            DType::Int64 => Buffer::Int64(vec![0; len]),
            DType::Float => Buffer::Float(vec![0.0; len]),
            DType::Double => Buffer::Double(vec![0.0; len]),
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            Buffer::Int32(_) => DType::Int32,
            Buffer::Int64(_) => DType::Int64,
            Buffer::Float(_) => DType::Float,
            Buffer::Double(_) => DType::Double,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, data => data.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the storage in bytes.
    pub fn nbytes(&self) -> usize {
        self.len() * self.dtype().size_of()
    }
}

impl<T: Element> From<Vec<T>> for Buffer {
    fn from(data: Vec<T>) -> Self {
        T::into_buffer(data)
    }
}
