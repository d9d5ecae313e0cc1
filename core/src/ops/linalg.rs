//! Linear algebra over fixed operands.

use super::{ComputeError, OpContext};
use crate::params::Params;
use crate::values::Value;

pub const LEFT_OPERAND: [f64; 3] = [1.0, 2.0, 3.0];
pub const RIGHT_OPERAND: [f64; 3] = [4.0, 5.0, 6.0];
pub const SQUARE_OPERAND: [[f64; 2]; 2] = [[1.0, 2.0], [3.0, 4.0]];

pub(super) fn dot(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    let product = LEFT_OPERAND
        .iter()
        .zip(RIGHT_OPERAND.iter())
        .map(|(a, b)| a * b)
        .sum();
    Ok(Value::Scalar(product))
}

pub(super) fn transpose(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    let rows: Vec<Vec<f64>> = SQUARE_OPERAND.iter().map(|row| row.to_vec()).collect();
    Ok(Value::Matrix(transposed(&rows)))
}

/// Transpose of a rectangular matrix, sized by its first row.
fn transposed(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let cols = rows.first().map_or(0, Vec::len);
    (0..cols)
        .map(|c| rows.iter().map(|row| row[c]).collect())
        .collect()
}
