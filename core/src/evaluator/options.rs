//! Configuration options for the evaluator.

/// Default cap on the elements a single evaluation may materialize.
pub const DEFAULT_MAX_ELEMENTS: usize = 1_000_000;

/// Configuration options for evaluation.
///
/// # Example
///
/// ```
/// use numflow_core::EvaluatorOptions;
///
/// let options = EvaluatorOptions {
///     max_elements: 10_000,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Largest number of elements (or matrix rows) an operation may build.
    ///
    /// Default: 1,000,000
    pub max_elements: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}
