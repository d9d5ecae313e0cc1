//! Array creation: `np.array`, `np.zeros`, `np.ones`, `np.linspace`.

use super::{ComputeError, OpContext};
use crate::params::{
    Params, parse_array_value, parse_count_or, parse_float_or, parse_shape_literal,
};
use crate::values::Value;

const DEFAULT_DATA: &str = "[1, 2, 3]";
const DEFAULT_ZEROS_SHAPE: &str = "(3, 3)";
const DEFAULT_ONES_SHAPE: &str = "(2, 2)";
const DEFAULT_START: f64 = 0.0;
const DEFAULT_STOP: f64 = 10.0;
const DEFAULT_NUM: i64 = 50;

pub(super) fn array(params: &Params, ctx: &OpContext) -> Result<Value, ComputeError> {
    let value = parse_array_value(params.get("data").unwrap_or(DEFAULT_DATA));
    ctx.check_elements(value.size())?;
    Ok(value)
}

pub(super) fn zeros(params: &Params, ctx: &OpContext) -> Result<Value, ComputeError> {
    let shape = parse_shape_literal(params.get("shape").unwrap_or(DEFAULT_ZEROS_SHAPE));
    filled(&shape, 0.0, ctx)
}

pub(super) fn ones(params: &Params, ctx: &OpContext) -> Result<Value, ComputeError> {
    let shape = parse_shape_literal(params.get("shape").unwrap_or(DEFAULT_ONES_SHAPE));
    filled(&shape, 1.0, ctx)
}

/// Shapes of rank 1 and 2 are built as asked; any other rank collapses to `[fill]`.
fn filled(shape: &[usize], fill: f64, ctx: &OpContext) -> Result<Value, ComputeError> {
    match *shape {
        [len] => {
            ctx.check_elements(len)?;
            Ok(Value::Vector(vec![fill; len]))
        }
        [rows, cols] => {
            ctx.check_matrix(rows, cols)?;
            Ok(Value::filled(rows, cols, fill))
        }
        _ => Ok(Value::Vector(vec![fill])),
    }
}

/// `num` evenly spaced samples over `[start, stop]`, both ends included.
///
/// A single sample is `[start]`; zero or negative counts give an empty vector.
pub(super) fn linspace(params: &Params, ctx: &OpContext) -> Result<Value, ComputeError> {
    let start = parse_float_or(params.get("start"), DEFAULT_START);
    let stop = parse_float_or(params.get("stop"), DEFAULT_STOP);
    let num = usize::try_from(parse_count_or(params.get("num"), DEFAULT_NUM)).unwrap_or(0);
    ctx.check_elements(num)?;

    let data = match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            // Interpolate rather than step so wide finite ranges never overflow.
            let last = num - 1;
            (0..num)
                .map(|i| match i {
                    0 => start,
                    i if i == last => stop,
                    i => {
                        let t = i as f64 / last as f64;
                        start * (1.0 - t) + stop * t
                    }
                })
                .collect()
        }
    };
    Ok(Value::Vector(data))
}
