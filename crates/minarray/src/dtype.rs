use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ArrayError, ValidationError};

/// Element type tag of an array buffer.
///
/// Each type also has a stable numeric code, `INT32 = 0` through `DOUBLE = 3`.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Int32,
    Int64,
    #[serde(alias = "float32")]
    Float,
    #[serde(alias = "float64")]
    Double,
}

impl DType {
    pub const ALL: [DType; 4] = [DType::Int32, DType::Int64, DType::Float, DType::Double];

    /// Size of one element in bytes.
    pub fn size_of(self) -> usize {
        match self {
            DType::Int32 | DType::Float => 4,
            DType::Int64 | DType::Double => 8,
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(self, DType::Int32 | DType::Int64)
    }

    pub fn code(self) -> i32 {
        match self {
            DType::Int32 => 0,
            DType::Int64 => 1,
            DType::Float => 2,
            DType::Double => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Float => "float",
            DType::Double => "double",
        }
    }
}

/// Shape-only arrays default to double precision.
impl Default for DType {
    fn default() -> Self {
        DType::Double
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "int32" | "i32" => Ok(DType::Int32),
            "int64" | "i64" => Ok(DType::Int64),
            "float" | "float32" | "f32" => Ok(DType::Float),
            "double" | "float64" | "f64" => Ok(DType::Double),
            _ => Err(ValidationError::UnsupportedDType(s.to_string()).into()),
        }
    }
}

impl TryFrom<i32> for DType {
    type Error = ArrayError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        DType::ALL
            .into_iter()
            .find(|dtype| dtype.code() == code)
            .ok_or_else(|| ValidationError::UnsupportedDTypeCode(code).into())
    }
}
