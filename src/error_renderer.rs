//! Error rendering using ariadne
//!
//! Literal errors are rendered against the text they were raised on, with the
//! offending span labelled. Errors without source text are written as a
//! single line.

use crate::{Error, LiteralError};
use ariadne::{ColorGenerator, IndexType, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<literal>";

/// Render an error to stderr
///
/// # Example
/// ```no_run
/// use numflow::{check_shape_literal, render_error};
///
/// if let Err(e) = check_shape_literal("(2, x)") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for web UIs and logs)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
///
/// # Example
/// ```
/// use numflow::{check_array_literal, render_error_to_string_no_color};
///
/// let err = check_array_literal("[1, 2").unwrap_err();
/// let output = render_error_to_string_no_color(&err);
/// assert!(output.contains("[1, 2"));
/// assert!(output.contains("L001"));
/// ```
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Literal(err) => render_literal(err, writer, use_color),
        Error::Eval(err) => writeln!(writer, "Evaluation failed [{}]: {}", err.kind(), err),
        Error::Flow(err) => writeln!(writer, "Flow error: {}", err),
    }
}

fn render_literal(
    error: &LiteralError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    // A trailing space gives an error at the end of input a column to point at.
    let source = format!("{} ", error.input);
    let start = error.span.start().min(error.input.len());
    let end = error.span.end().min(error.input.len());
    let span = if end > start {
        start..end
    } else {
        let width = source[start..].chars().next().map_or(1, char::len_utf8);
        start..start + width
    };

    let message = error.kind.to_string();
    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_message(&message)
        .with_code(error.code())
        .with_config(
            ariadne::Config::default()
                .with_color(use_color)
                .with_index_type(IndexType::Byte),
        )
        .with_label(
            Label::new((SOURCE_ID, span))
                .with_message(&message)
                .with_color(colors.next()),
        );

    if let Some(help) = error.help() {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((SOURCE_ID, Source::from(source.as_str())), &mut *writer)
}
