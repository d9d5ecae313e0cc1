//! Elementwise operations over the default operand.

use super::{ComputeError, OpContext};
use crate::params::Params;
use crate::values::Value;

/// Operand of every elementwise operation and reduction.
pub const DEFAULT_OPERAND: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

pub(super) fn add(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    Ok(zip_with(&DEFAULT_OPERAND, &DEFAULT_OPERAND, |a, b| a + b))
}

pub(super) fn multiply(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    Ok(zip_with(&DEFAULT_OPERAND, &DEFAULT_OPERAND, |a, b| a * b))
}

pub(super) fn sin(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    Ok(Value::Vector(DEFAULT_OPERAND.iter().map(|x| x.sin()).collect()))
}

pub(super) fn cos(_params: &Params, _ctx: &OpContext) -> Result<Value, ComputeError> {
    Ok(Value::Vector(DEFAULT_OPERAND.iter().map(|x| x.cos()).collect()))
}

fn zip_with(lhs: &[f64], rhs: &[f64], f: impl Fn(f64, f64) -> f64) -> Value {
    Value::Vector(lhs.iter().zip(rhs).map(|(a, b)| f(*a, *b)).collect())
}
