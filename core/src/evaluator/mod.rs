//! Single-node evaluation with memoization.
//!
//! The evaluator parses nothing itself: it looks the name up in its registry,
//! runs the operation against the raw parameters and wraps the value into an
//! [`EvalResult`] with inferred shape metadata and a preview.
//!
//! ## Design Principles
//!
//! - **Never panic**: `evaluate` is total; unknown names, operation errors and
//!   even panics inside an operation come back as a failed result
//! - **Memoized**: every result, failed or not, is cached by name and canonical
//!   parameters, and a repeated call returns the same shared result
//! - **Bounded**: operations refuse to materialize more than
//!   [`EvaluatorOptions::max_elements`] elements
//!
//! ## Example
//!
//! ```
//! use numflow_core::{Evaluator, EvaluatorOptions, Params};
//!
//! let evaluator = Evaluator::new(EvaluatorOptions::default());
//! let params = Params::new().with("shape", "(2, 3)");
//!
//! let result = evaluator.evaluate("np.zeros", &params);
//! let array = result.array().unwrap();
//! assert_eq!(array.shape.as_slice(), &[2, 3]);
//! assert_eq!(array.size, 6);
//! ```

mod cache;
mod error;
mod options;
mod result;


pub use cache::{CacheKey, CacheStats, ResultCache};
pub use error::EvalError;
pub use options::{DEFAULT_MAX_ELEMENTS, EvaluatorOptions};
pub use result::{ArrayResult, DEFAULT_DTYPE, EvalResult};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::ops::{ComputeError, OpContext, Operation, Registry};
use crate::params::Params;

/// Anything that turns an operation name and its parameters into a result.
///
/// [`Evaluator`] is the local implementation; flow processing only relies on
/// this trait.
pub trait Evaluate {
    fn evaluate(&self, name: &str, params: &Params) -> Arc<EvalResult>;
}

/// Evaluates registered operations and memoizes their results.
#[derive(Debug)]
pub struct Evaluator {
    registry: Registry,
    options: EvaluatorOptions,
    cache: ResultCache,
}

impl Evaluator {
    /// An evaluator over the standard registry.
    pub fn new(options: EvaluatorOptions) -> Self {
        Self::with_registry(Registry::standard(), options)
    }

    pub fn with_registry(registry: Registry, options: EvaluatorOptions) -> Self {
        Self {
            registry,
            options,
            cache: ResultCache::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Evaluate `name` with `params`, returning the cached result when the
    /// same pair was evaluated before.
    pub fn evaluate(&self, name: &str, params: &Params) -> Arc<EvalResult> {
        let key = CacheKey::new(name, params);
        if let Some(cached) = self.cache.get(&key) {
            tracing::trace!(operation = name, "cache hit");
            return cached;
        }

        let result = Arc::new(self.compute(name, params));
        self.cache.insert(key, result)
    }

    fn compute(&self, name: &str, params: &Params) -> EvalResult {
        let Some(op) = self.registry.get(name) else {
            tracing::debug!(operation = name, "unknown operation");
            return EvalResult::Failure(EvalError::UnknownOperation {
                name: name.to_string(),
            });
        };

        let ctx = OpContext {
            max_elements: self.options.max_elements,
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (op.run)(params, &ctx)))
            .unwrap_or_else(|payload| Err(ComputeError::Panicked(panic_message(payload))));

        match outcome {
            Ok(value) => {
                tracing::debug!(operation = name, size = value.size(), "evaluated");
                EvalResult::Success(ArrayResult::new(value, dtype_for(op, params)))
            }
            Err(source) => {
                tracing::warn!(operation = name, error = %source, "operation failed");
                EvalResult::Failure(EvalError::ComputeFailure {
                    operation: name.to_string(),
                    source,
                })
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorOptions::default())
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&self, name: &str, params: &Params) -> Arc<EvalResult> {
        Evaluator::evaluate(self, name, params)
    }
}

impl<E: Evaluate + ?Sized> Evaluate for &E {
    fn evaluate(&self, name: &str, params: &Params) -> Arc<EvalResult> {
        (**self).evaluate(name, params)
    }
}

impl<E: Evaluate + ?Sized> Evaluate for Arc<E> {
    fn evaluate(&self, name: &str, params: &Params) -> Arc<EvalResult> {
        (**self).evaluate(name, params)
    }
}

fn dtype_for(op: &Operation, params: &Params) -> String {
    let supplied = op.records_dtype.then(|| params.get("dtype")).flatten();
    supplied.unwrap_or(DEFAULT_DTYPE).to_string()
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
