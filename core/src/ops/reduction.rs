//! Reductions of the default operand to a scalar.

use super::elementwise::DEFAULT_OPERAND;
use super::{ComputeError, OpContext};
use crate::params::Params;
use crate::values::Value;

pub(super) fn mean(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    Ok(Value::Scalar(mean_of(&DEFAULT_OPERAND)))
}

/// Population standard deviation (divides by N).
pub(super) fn std(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    let mean = mean_of(&DEFAULT_OPERAND);
    let variance = DEFAULT_OPERAND
        .iter()
        .map(|x| (x - mean).powi(2))
        .sum::<f64>()
        / DEFAULT_OPERAND.len() as f64;
    Ok(Value::Scalar(variance.sqrt()))
}

pub(super) fn sum(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    Ok(Value::Scalar(DEFAULT_OPERAND.iter().sum()))
}

fn mean_of(items: &[f64]) -> f64 {
    items.iter().sum::<f64>() / items.len() as f64
}
