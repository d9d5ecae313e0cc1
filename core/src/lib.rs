//! Core of the numflow array-operation simulator.
//!
//! Given the name of an array operation (`np.zeros`, `np.mean`, ...) and the raw
//! text parameters a node editor collected for it, the [`Evaluator`] produces a
//! value, its shape metadata and a short preview. Results are memoized per
//! `(operation, parameters)` pair and failures never escape `evaluate`.

pub mod catalog;
pub mod evaluator;
pub mod flow;
pub mod ops;
pub mod params;
pub mod preview;
pub mod values;

pub use catalog::{Category, FunctionSpec, ParamKind, ParamSpec};
pub use evaluator::{
    ArrayResult, CacheStats, DEFAULT_DTYPE, EvalError, EvalResult, Evaluate, Evaluator,
    EvaluatorOptions,
};
pub use ops::{ComputeError, OpContext, Operation, Registry};
pub use params::{Literal, LiteralError, LiteralErrorKind, Params, Span};
pub use values::{Shape, Value};
