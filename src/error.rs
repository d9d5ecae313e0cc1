use miette::Diagnostic;
use thiserror::Error;

use numflow_core::flow::FlowError;
use numflow_core::{EvalError, LiteralError};

/// Any error the numflow surfaces can report.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum Error {
    /// A literal rejected by the strict parser. Carries its input and span.
    #[error("{0}")]
    #[diagnostic(code(numflow::literal))]
    Literal(#[from] LiteralError),

    /// A failed evaluation, raised by callers that want a node to succeed.
    #[error(transparent)]
    #[diagnostic(code(numflow::eval))]
    Eval(#[from] EvalError),

    #[error(transparent)]
    #[diagnostic(code(numflow::flow))]
    Flow(#[from] FlowError),
}
