//! The fixed registry of array operations.
//!
//! Every operation is a plain function from raw [`Params`] to a [`Value`].
//! Operations that would take array inputs compute on fixed canonical operands
//! instead: a node previews what its kind of operation looks like, it does not
//! pull data from upstream nodes.
//!
//! | Category           | Operations                                          |
//! |--------------------|-----------------------------------------------------|
//! | Array creation     | `np.array`, `np.zeros`, `np.ones`, `np.linspace`    |
//! | Elementwise        | `np.add`, `np.multiply`, `np.sin`, `np.cos`         |
//! | Reduction          | `np.mean`, `np.std`, `np.sum`                       |
//! | Linear algebra     | `np.dot`, `np.transpose`                            |
//! | Manipulation       | `np.reshape`, `np.concatenate`                      |

mod creation;
mod elementwise;
mod linalg;
mod manipulation;
mod reduction;


use hashbrown::HashMap;
use thiserror::Error;

use crate::params::Params;
use crate::values::Value;

pub use elementwise::DEFAULT_OPERAND;
pub use linalg::{LEFT_OPERAND, RIGHT_OPERAND, SQUARE_OPERAND};
pub use manipulation::RESHAPE_SOURCE;

/// Failure raised inside an operation body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComputeError {
    /// The result would hold more elements (or rows) than allowed.
    #[error("result of {requested} elements exceeds the limit of {limit}")]
    TooLarge { requested: usize, limit: usize },

    /// The operation panicked; the payload message is kept.
    #[error("operation panicked: {0}")]
    Panicked(String),
}

/// Limits an operation must respect while computing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpContext {
    pub max_elements: usize,
}

impl OpContext {
    /// Fail if `count` elements may not be materialized.
    pub fn check_elements(&self, count: usize) -> Result<(), ComputeError> {
        if count > self.max_elements {
            return Err(ComputeError::TooLarge {
                requested: count,
                limit: self.max_elements,
            });
        }
        Ok(())
    }

    /// Fail if a `rows` by `cols` matrix may not be materialized.
    pub fn check_matrix(&self, rows: usize, cols: usize) -> Result<(), ComputeError> {
        self.check_elements(rows)?;
        self.check_elements(rows.saturating_mul(cols))
    }
}

/// Signature shared by every operation.
pub type OpFn = fn(&Params, &OpContext) -> Result<Value, ComputeError>;

/// A named entry in the registry.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    /// Whether the result records the caller's `dtype` parameter.
    pub records_dtype: bool,
    pub run: OpFn,
}

impl Operation {
    const fn new(name: &'static str, run: OpFn) -> Self {
        Self {
            name,
            records_dtype: false,
            run,
        }
    }

    const fn with_dtype(name: &'static str, run: OpFn) -> Self {
        Self {
            name,
            records_dtype: true,
            run,
        }
    }
}

/// The 15 operations of the standard registry.
pub const STANDARD_OPERATIONS: [Operation; 15] = [
    Operation::with_dtype("np.array", creation::array),
    Operation::with_dtype("np.zeros", creation::zeros),
    Operation::with_dtype("np.ones", creation::ones),
    Operation::new("np.linspace", creation::linspace),
    Operation::new("np.add", elementwise::add),
    Operation::new("np.multiply", elementwise::multiply),
    Operation::new("np.sin", elementwise::sin),
    Operation::new("np.cos", elementwise::cos),
    Operation::new("np.mean", reduction::mean),
    Operation::new("np.std", reduction::std),
    Operation::new("np.sum", reduction::sum),
    Operation::new("np.dot", linalg::dot),
    Operation::new("np.transpose", linalg::transpose),
    Operation::new("np.reshape", manipulation::reshape),
    Operation::new("np.concatenate", manipulation::concatenate),
];

/// Immutable name → operation table.
#[derive(Debug, Clone)]
pub struct Registry {
    operations: HashMap<&'static str, Operation>,
}

impl Registry {
    /// The registry of [`STANDARD_OPERATIONS`].
    pub fn standard() -> Self {
        Self::from_operations(STANDARD_OPERATIONS)
    }

    /// Build a registry from `operations`. A later entry replaces an earlier
    /// one with the same name.
    pub fn from_operations(operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            operations: operations.into_iter().map(|op| (op.name, op)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.operations.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
