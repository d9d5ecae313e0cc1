//! Reshaping and joining.

use super::linalg::{LEFT_OPERAND, RIGHT_OPERAND};
use super::{ComputeError, OpContext};
use crate::params::{Params, parse_shape_literal};
use crate::values::Value;

/// Source array of `np.reshape`.
pub const RESHAPE_SOURCE: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

const DEFAULT_NEWSHAPE: &str = "(2, 3)";

/// Row-major slicing of [`RESHAPE_SOURCE`] into `newshape`.
///
/// The element count is not validated: a smaller shape truncates the source
/// and a larger one leaves the trailing rows short. Targets of rank other than
/// 1 or 2 return the source unchanged.
pub(super) fn reshape(params: &Params, ctx: &OpContext) -> Result<Value, ComputeError> {
    let shape = parse_shape_literal(params.get("newshape").unwrap_or(DEFAULT_NEWSHAPE));
    match *shape.as_slice() {
        [len] => Ok(Value::Vector(window(&RESHAPE_SOURCE, 0, len))),
        [rows, cols] => {
            ctx.check_elements(rows)?;
            let data = (0..rows)
                .map(|i| {
                    let start = i.saturating_mul(cols);
                    window(&RESHAPE_SOURCE, start, start.saturating_add(cols))
                })
                .collect();
            Ok(Value::Matrix(data))
        }
        _ => Ok(Value::Vector(RESHAPE_SOURCE.to_vec())),
    }
}

pub(super) fn concatenate(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    Ok(Value::Vector([LEFT_OPERAND, RIGHT_OPERAND].concat()))
}

/// `items[start..end]` with both bounds clamped to the slice.
fn window(items: &[f64], start: usize, end: usize) -> Vec<f64> {
    let end = end.min(items.len());
    let start = start.min(end);
    items[start..end].to_vec()
}
