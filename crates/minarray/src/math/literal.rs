//! Nested literal data used to initialise arrays.
//!
//! A [`Literal`] mirrors the loosely typed nested lists a front-end receives:
//! scalars are either integral or fractional, and lists may nest. Only flat
//! lists and rectangular two-level tables are accepted by [`Literal::table`].
use crate::dtype::DType;
use crate::error::ValidationError;
use crate::math::buffer::{Buffer, Element};

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    List(Vec<Literal>),
}

/// Scalar flavour of a validated literal table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Integral,
    Fractional,
    Mixed,
}

/// A validated literal: row-major scalars plus the dims they describe.
#[derive(Clone, Debug, PartialEq)]
pub struct Table<'a> {
    pub dims: [usize; 2],
    pub kind: ScalarKind,
    values: Vec<&'a Literal>,
}

impl Literal {
    fn is_list(&self) -> bool {
        matches!(self, Literal::List(_))
    }

    /// Validate the nesting structure and flatten it in row-major order.
    ///
    /// A flat list of `n` scalars becomes dims `(n, 1)`.
    pub fn table(&self) -> Result<Table<'_>, ValidationError> {
        let items = match self {
            Literal::List(items) => items,
            _ => return Err(ValidationError::NotASequence),
        };
        let first = items.first().ok_or(ValidationError::EmptyInput)?;

        let (dims, values) = if first.is_list() {
            let mut values = Vec::new();
            let mut ncols = 0;
            for (row, item) in items.iter().enumerate() {
                let cells = match item {
                    Literal::List(cells) => cells,
                    _ => return Err(ValidationError::NonUniformNesting { index: row }),
                };
                if cells.is_empty() {
                    return Err(ValidationError::EmptyRow { row });
                }
                if row == 0 {
                    ncols = cells.len();
                } else if cells.len() != ncols {
                    return Err(ValidationError::JaggedRows {
                        row,
                        expected: ncols,
                        found: cells.len(),
                    });
                }
                if cells.iter().any(Literal::is_list) {
                    return Err(ValidationError::TooDeep);
                }
                values.extend(cells.iter());
            }
            ([items.len(), ncols], values)
        } else {
            if let Some(index) = items.iter().position(Literal::is_list) {
                return Err(ValidationError::NonUniformNesting { index });
            }
            ([items.len(), 1], items.iter().collect())
        };

        let has_int = values.iter().any(|v| matches!(v, Literal::Int(_)));
        let has_float = values.iter().any(|v| matches!(v, Literal::Float(_)));
        let kind = match (has_int, has_float) {
            (true, true) => ScalarKind::Mixed,
            (false, true) => ScalarKind::Fractional,
            _ => ScalarKind::Integral,
        };

        Ok(Table { dims, kind, values })
    }
}

impl<'a> Table<'a> {
    /// Element type the table should be stored as.
    ///
    /// Without an explicit request integral data becomes `Int64` and
    /// fractional data `Double`; mixed data requires an explicit type.
    pub fn resolve_dtype(&self, requested: Option<DType>) -> Result<DType, ValidationError> {
        match (requested, self.kind) {
            (Some(dtype), _) => Ok(dtype),
            (None, ScalarKind::Integral) => Ok(DType::Int64),
            (None, ScalarKind::Fractional) => Ok(DType::Double),
            (None, ScalarKind::Mixed) => Err(ValidationError::MixedScalars),
        }
    }

    /// Cast every scalar into a freshly allocated buffer of `dtype`.
    pub fn to_buffer(&self, dtype: DType) -> Buffer {
        match dtype {
            DType::Int32 => Buffer::from(self.cast::<i32>()),
            DType::Int64 => Buffer::from(self.cast::<i64>()),
            DType::Float => Buffer::from(self.cast::<f32>()),
            DType::Double => Buffer::from(self.cast::<f64>()),
        }
    }

    fn cast<T: Element>(&self) -> Vec<T> {
        self.values
            .iter()
            .map(|value| match value {
                Literal::Int(v) => T::from_i64(*v),
                Literal::Float(v) => T::from_f64(*v),
                // structure was checked by `Literal::table`
                Literal::List(_) => T::zero(),
            })
            .collect()
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Literal::Float(value.into())
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(values: Vec<T>) -> Self {
        Literal::List(values.into_iter().map(Into::into).collect())
    }
}
