//! The record returned for every evaluation.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::error::EvalError;
use crate::preview::format_preview;
use crate::values::{Shape, Value};

/// Element type label used when the caller supplies none.
pub const DEFAULT_DTYPE: &str = "float64";

/// A successful evaluation: the value and everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayResult {
    pub data: Value,
    pub shape: Shape,
    /// Free-form label; it never changes how `data` is represented.
    pub dtype: String,
    pub size: usize,
    pub ndim: usize,
    pub preview: String,
}

impl ArrayResult {
    /// Derive shape, size, ndim and preview from `data`.
    pub fn new(data: Value, dtype: impl Into<String>) -> Self {
        Self {
            shape: data.shape(),
            size: data.size(),
            ndim: data.ndim(),
            preview: format_preview(&data),
            dtype: dtype.into(),
            data,
        }
    }
}

/// Outcome of one evaluation. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalResult {
    Success(ArrayResult),
    Failure(EvalError),
}

impl EvalResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EvalResult::Success(_))
    }

    pub fn array(&self) -> Option<&ArrayResult> {
        match self {
            EvalResult::Success(array) => Some(array),
            EvalResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&EvalError> {
        match self {
            EvalResult::Success(_) => None,
            EvalResult::Failure(err) => Some(err),
        }
    }

    pub fn data(&self) -> Option<&Value> {
        self.array().map(|array| &array.data)
    }
}

/// Flat record: `success` plus either the array fields or `error`.
impl Serialize for EvalResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EvalResult::Success(array) => {
                let mut record = serializer.serialize_struct("EvalResult", 7)?;
                record.serialize_field("success", &true)?;
                record.serialize_field("data", &array.data)?;
                record.serialize_field("shape", &array.shape)?;
                record.serialize_field("dtype", &array.dtype)?;
                record.serialize_field("size", &array.size)?;
                record.serialize_field("ndim", &array.ndim)?;
                record.serialize_field("preview", &array.preview)?;
                record.end()
            }
            EvalResult::Failure(err) => {
                let mut record = serializer.serialize_struct("EvalResult", 2)?;
                record.serialize_field("success", &false)?;
                record.serialize_field("error", &err.to_string())?;
                record.end()
            }
        }
    }
}
