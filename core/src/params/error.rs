//! Errors from the strict literal parser.
//!
//! These never reach an evaluation result: the lenient entry points replace a
//! failed literal with its documented default. They exist so that tooling can
//! explain why a literal was not accepted.

use core::fmt;
use core::ops::Range;

use thiserror::Error;

use super::parser::Rule;

/// Byte range into the literal source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span(pub Range<usize>);

impl Span {
    pub fn start(&self) -> usize {
        self.0.start
    }

    pub fn end(&self) -> usize {
        self.0.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.0.start, self.0.end)
    }
}

/// Literal parse error with the input it was raised against.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct LiteralError {
    pub kind: LiteralErrorKind,
    pub input: String,
    pub span: Span,
}

/// Specific kinds of literal errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiteralErrorKind {
    /// The grammar did not match
    #[error("Expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    /// Text matched the number rule but is not a valid float
    #[error("Invalid number literal '{text}'")]
    InvalidNumber { text: String },

    /// Brackets nested deeper than the parser allows
    #[error("Literal nesting depth exceeds maximum of {max_depth} levels")]
    MaxDepthExceeded { max_depth: usize },

    /// Well-formed literal of the wrong structure for its use
    #[error("Expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },
}

impl LiteralError {
    pub fn new(kind: LiteralErrorKind, input: &str, span: Span) -> Self {
        Self {
            kind,
            input: input.to_string(),
            span,
        }
    }

    /// Stable code for documentation lookup.
    pub fn code(&self) -> &'static str {
        match self.kind {
            LiteralErrorKind::UnexpectedToken { .. } => "L001",
            LiteralErrorKind::InvalidNumber { .. } => "L002",
            LiteralErrorKind::MaxDepthExceeded { .. } => "L003",
            LiteralErrorKind::TypeMismatch { .. } => "L004",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self.kind {
            LiteralErrorKind::UnexpectedToken { .. } => {
                Some("Only numbers, [lists] and (tuples) are accepted")
            }
            LiteralErrorKind::InvalidNumber { .. } => Some("Check the number format"),
            LiteralErrorKind::MaxDepthExceeded { .. } => Some("Reduce the bracket nesting"),
            LiteralErrorKind::TypeMismatch { .. } => None,
        }
    }
}

/// Convert a pest error into a LiteralError
pub(crate) fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> LiteralError {
    use pest::error::{ErrorVariant, InputLocation};

    let span = match err.location {
        InputLocation::Pos(pos) => Span(pos..pos),
        InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError { positives, .. } => LiteralErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: describe_found(source, span.start()),
        },
        ErrorVariant::CustomError { message } => LiteralErrorKind::UnexpectedToken {
            expected: "literal".to_string(),
            found: message,
        },
    };

    LiteralError::new(kind, source, span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    let mut concepts: Vec<&str> = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::number => "number",
            Rule::list | Rule::tuple => "'[' or '('",
            Rule::EOI => "end of input",
            _ => "literal",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        None => "literal".to_string(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Describe the input at the failure position
fn describe_found(source: &str, pos: usize) -> String {
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        None => "end of input".to_string(),
        Some(c) => format!("'{}'", c),
    }
}
