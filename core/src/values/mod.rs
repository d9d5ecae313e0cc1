//! Array values produced by operations, and the shape metadata inferred from them.
//!
//! Only ranks 0, 1 and 2 exist. Shape and ndim inference look at the outermost
//! sequence and its first element only; size counts every element.

use core::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Dimensions of a value, outermost first. Empty for a scalar.
pub type Shape = SmallVec<[usize; 2]>;

/// The payload computed by an operation.
///
/// Serializes untagged: a scalar is a JSON number, a vector an array of numbers
/// and a matrix an array of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
    /// Rows of a matrix. Every operation produces rows of equal length, except
    /// `np.reshape` asked for more elements than its source holds, where the
    /// trailing rows come out short.
    Matrix(Vec<Vec<f64>>),
}

impl Value {
    /// Matrix filled with `fill`, `rows` by `cols`.
    pub fn filled(rows: usize, cols: usize, fill: f64) -> Self {
        Value::Matrix(vec![vec![fill; cols]; rows])
    }

    /// `[]` for a scalar, `[len]` for a vector, `[rows, cols]` for a matrix
    /// where `cols` is the length of the first row.
    ///
    /// A matrix without rows has no first row to look at and is reported like
    /// an empty flat sequence, `[0]`.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Scalar(_) => Shape::new(),
            Value::Vector(items) => smallvec::smallvec![items.len()],
            Value::Matrix(rows) => match rows.first() {
                Some(first) => smallvec::smallvec![rows.len(), first.len()],
                None => smallvec::smallvec![0],
            },
        }
    }

    /// Total number of elements, counted over every row.
    pub fn size(&self) -> usize {
        match self {
            Value::Scalar(_) => 1,
            Value::Vector(items) => items.len(),
            Value::Matrix(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    /// `0` for a scalar, `1` for a flat sequence, `2` once the first element is
    /// itself a sequence.
    pub fn ndim(&self) -> usize {
        match self {
            Value::Scalar(_) => 0,
            Value::Vector(_) => 1,
            Value::Matrix(rows) if rows.is_empty() => 1,
            Value::Matrix(_) => 2,
        }
    }

    /// Every element in row-major order.
    pub fn flatten(&self) -> Vec<f64> {
        match self {
            Value::Scalar(x) => vec![*x],
            Value::Vector(items) => items.clone(),
            Value::Matrix(rows) => rows.iter().flatten().copied().collect(),
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Value::Vector(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&[Vec<f64>]> {
        match self {
            Value::Matrix(rows) => Some(rows),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(x)
    }
}

impl From<Vec<f64>> for Value {
    fn from(items: Vec<f64>) -> Self {
        Value::Vector(items)
    }
}

impl From<Vec<Vec<f64>>> for Value {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        Value::Matrix(rows)
    }
}

/// Prints the value as a literal the parameter parser accepts back.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_items(f: &mut fmt::Formatter<'_>, items: &[f64]) -> fmt::Result {
            write!(f, "[")?;
            for (i, x) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x)?;
            }
            write!(f, "]")
        }

        match self {
            Value::Scalar(x) => write!(f, "{}", x),
            Value::Vector(items) => write_items(f, items),
            Value::Matrix(rows) => {
                write!(f, "[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_items(f, row)?;
                }
                write!(f, "]")
            }
        }
    }
}
