//! numflow - an array-operation simulator for node-based editors
//!
//! # Overview
//!
//! A node editor lets users drop array operations (`np.zeros`, `np.mean`,
//! `np.reshape`, ...) onto a canvas and type their parameters as text. numflow
//! evaluates such a node: it parses the parameter text leniently, computes the
//! result on real `f64` data and reports the value together with its shape,
//! size, rank and a short preview.
//!
//! Whole flows exported by the editor can be processed too: nodes are ordered
//! by their dependencies, evaluated through one shared cache and summarized.
//!
//! # Quick Start
//!
//! ```
//! use numflow::{Evaluator, EvaluatorOptions, Params};
//!
//! let evaluator = Evaluator::new(EvaluatorOptions::default());
//!
//! let params = Params::new().with("start", "0").with("stop", "1").with("num", "3");
//! let result = evaluator.evaluate("np.linspace", &params);
//!
//! let array = result.array().unwrap();
//! assert_eq!(array.shape.as_slice(), &[3]);
//! assert_eq!(array.preview, "[0.00, 0.50, 1.00]");
//! ```
//!
//! # Errors
//!
//! Evaluation never fails with a Rust error: a failed node is an
//! [`EvalResult::Failure`]. The [`Error`] type covers the surfaces around it,
//! such as a strict literal check or an unreadable flow document, and
//! [`render_error`] prints it with the offending text underlined.

mod error;
pub mod error_renderer;

pub use error::Error;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export the public API of numflow-core
pub use numflow_core::flow::{FlowDocument, FlowError, FlowProcessor, FlowReport};
pub use numflow_core::{
    ArrayResult, CacheStats, Category, ComputeError, DEFAULT_DTYPE, EvalError, EvalResult,
    Evaluate, Evaluator, EvaluatorOptions, FunctionSpec, Literal, LiteralError, LiteralErrorKind,
    OpContext, Operation, ParamKind, ParamSpec, Params, Registry, Shape, Span, Value,
};
pub use numflow_core::{catalog, flow, params, preview};

/// Parse `text` strictly as an array literal of rank 0, 1 or 2.
///
/// Operations never call this: they fall back to a default instead. It is
/// meant for tools that want to tell the user why their text was replaced.
pub fn check_array_literal(text: &str) -> Result<Value, Error> {
    Ok(params::parse_value(text)?)
}

/// Parse `text` strictly as a shape literal.
pub fn check_shape_literal(text: &str) -> Result<Shape, Error> {
    Ok(params::parse_shape(text)?)
}
