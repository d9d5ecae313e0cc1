//! Strict literal parser.
//!
//! Parameter text is untrusted. It is matched against a literal-only grammar
//! and converted into the structure an operation asked for; nothing is ever
//! evaluated.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::error::{LiteralError, LiteralErrorKind, Span, convert_pest_error};
use crate::values::{Shape, Value};

/// Deepest bracket nesting accepted before the grammar runs.
pub const MAX_LITERAL_DEPTH: usize = 32;

#[derive(Parser)]
#[grammar = "params/literal.pest"]
pub struct LiteralParser;

/// A parsed literal: a number or a bracketed sequence of literals.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number { value: f64, span: Span },
    Sequence { items: Vec<Literal>, span: Span },
}

impl Literal {
    pub fn span(&self) -> &Span {
        match self {
            Literal::Number { span, .. } | Literal::Sequence { span, .. } => span,
        }
    }

    fn describe(&self) -> String {
        match self {
            Literal::Number { value, .. } => format!("number {}", value),
            Literal::Sequence { items, .. } if items.is_empty() => "empty sequence".to_string(),
            Literal::Sequence { items, .. } => format!("sequence of {} items", items.len()),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number { value, .. } => Some(*value),
            Literal::Sequence { .. } => None,
        }
    }
}

/// Parse `source` as a literal.
pub fn parse_literal(source: &str) -> Result<Literal, LiteralError> {
    check_depth(source)?;

    let main = LiteralParser::parse(Rule::main, source)
        .map_err(|e| convert_pest_error(e, source))?
        .next()
        .ok_or_else(|| unexpected_end(source))?;

    let literal = main
        .into_inner()
        .next()
        .ok_or_else(|| unexpected_end(source))?;

    build_literal(literal, source)
}

/// Parse a flat list of numbers.
pub fn parse_vector(source: &str) -> Result<Vec<f64>, LiteralError> {
    let literal = parse_literal(source)?;
    numbers_of(&literal, source, "a list of numbers")
}

/// Parse a scalar, a flat list or a rectangular list of lists.
pub fn parse_value(source: &str) -> Result<Value, LiteralError> {
    let literal = parse_literal(source)?;
    let items = match &literal {
        Literal::Number { value, .. } => return Ok(Value::Scalar(*value)),
        Literal::Sequence { items, .. } => items,
    };

    match items.first() {
        None | Some(Literal::Number { .. }) => {
            numbers_of(&literal, source, "a list of numbers").map(Value::Vector)
        }
        Some(Literal::Sequence { items: first, .. }) => {
            let cols = first.len();
            let mut rows = Vec::with_capacity(items.len());
            for item in items {
                let row = numbers_of(item, source, "a row of numbers")?;
                if row.len() != cols {
                    return Err(mismatch(item, source, "rows of equal length"));
                }
                rows.push(row);
            }
            Ok(Value::Matrix(rows))
        }
    }
}

/// Parse a shape: a non-negative integer or a sequence of them.
pub fn parse_shape(source: &str) -> Result<Shape, LiteralError> {
    let literal = parse_literal(source)?;
    match &literal {
        Literal::Number { .. } => Ok(smallvec::smallvec![dimension_of(&literal, source)?]),
        Literal::Sequence { items, .. } => items
            .iter()
            .map(|item| dimension_of(item, source))
            .collect(),
    }
}

fn build_literal(pair: Pair<Rule>, source: &str) -> Result<Literal, LiteralError> {
    let span = Span(pair.as_span().start()..pair.as_span().end());
    match pair.as_rule() {
        Rule::number => {
            let text = pair.as_str();
            let value = text.parse::<f64>().map_err(|_| {
                LiteralError::new(
                    LiteralErrorKind::InvalidNumber {
                        text: text.to_string(),
                    },
                    source,
                    span.clone(),
                )
            })?;
            Ok(Literal::Number { value, span })
        }
        Rule::list | Rule::tuple => {
            let items = pair
                .into_inner()
                .map(|inner| build_literal(inner, source))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Literal::Sequence { items, span })
        }
        other => Err(LiteralError::new(
            LiteralErrorKind::UnexpectedToken {
                expected: "literal".to_string(),
                found: format!("{:?}", other),
            },
            source,
            span,
        )),
    }
}

/// Reject deep nesting up front so the recursive grammar never sees it.
fn check_depth(source: &str) -> Result<(), LiteralError> {
    let mut depth = 0usize;
    for (pos, c) in source.char_indices() {
        match c {
            '[' | '(' => {
                depth += 1;
                if depth > MAX_LITERAL_DEPTH {
                    return Err(LiteralError::new(
                        LiteralErrorKind::MaxDepthExceeded {
                            max_depth: MAX_LITERAL_DEPTH,
                        },
                        source,
                        Span(pos..pos + 1),
                    ));
                }
            }
            ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn numbers_of(
    literal: &Literal,
    source: &str,
    expected: &'static str,
) -> Result<Vec<f64>, LiteralError> {
    match literal {
        Literal::Sequence { items, .. } => items
            .iter()
            .map(|item| item.as_number().ok_or_else(|| mismatch(item, source, expected)))
            .collect(),
        Literal::Number { .. } => Err(mismatch(literal, source, expected)),
    }
}

fn dimension_of(literal: &Literal, source: &str) -> Result<usize, LiteralError> {
    // Largest float that still converts to an integer exactly.
    const MAX_DIMENSION: f64 = 9_007_199_254_740_992.0;

    match literal.as_number() {
        Some(value) if value.fract() == 0.0 && (0.0..MAX_DIMENSION).contains(&value) => {
            Ok(value as usize)
        }
        _ => Err(mismatch(literal, source, "a non-negative integer dimension")),
    }
}

fn mismatch(literal: &Literal, source: &str, expected: &'static str) -> LiteralError {
    LiteralError::new(
        LiteralErrorKind::TypeMismatch {
            expected,
            found: literal.describe(),
        },
        source,
        literal.span().clone(),
    )
}

fn unexpected_end(source: &str) -> LiteralError {
    LiteralError::new(
        LiteralErrorKind::UnexpectedToken {
            expected: "literal".to_string(),
            found: "end of input".to_string(),
        },
        source,
        Span(source.len()..source.len()),
    )
}
