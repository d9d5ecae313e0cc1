use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{Diagnostic, IntoDiagnostic, Result};
use numflow::flow::DependencyGraph;
use numflow::params::{FALLBACK_ARRAY, FALLBACK_SHAPE};
use numflow::{
    Category, EvalResult, Evaluator, EvaluatorOptions, FlowDocument, FlowProcessor, Params,
    catalog, check_array_literal, check_shape_literal, flow, render_error,
};
use numflow_core::evaluator::DEFAULT_MAX_ELEMENTS;
use thiserror::Error;

/// numflow - evaluate array operations the way a node editor previews them
#[derive(Parser, Debug)]
#[command(name = "numflow")]
#[command(about = "Evaluate array operations and node flows", long_about = None)]
struct Args {
    /// Largest number of elements (or rows) an operation may produce
    #[arg(
        long,
        global = true,
        env = "NUMFLOW_MAX_ELEMENTS",
        default_value_t = DEFAULT_MAX_ELEMENTS
    )]
    max_elements: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one operation, e.g. `numflow eval np.zeros shape="(2, 3)"`
    Eval {
        /// Operation name, e.g. np.linspace
        name: String,

        /// Parameters as KEY=VALUE
        #[arg(value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Print the full JSON record
        #[arg(long)]
        json: bool,
    },

    /// Process a flow document exported by the editor
    Flow {
        /// Path to the flow JSON
        file: PathBuf,

        /// Print the generated NumPy script instead of the report
        #[arg(long)]
        code: bool,

        /// With --code, print the JavaScript outline instead
        #[arg(long, requires = "code")]
        javascript: bool,
    },

    /// List the available operations
    Catalog {
        /// Only list one category, e.g. "Linear Algebra"
        #[arg(long)]
        category: Option<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a parameter literal with the strict parser
    Literal {
        text: String,

        /// Check it as a shape instead of an array
        #[arg(long)]
        shape: bool,
    },
}

#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("expected KEY=VALUE, found `{0}`")]
    #[diagnostic(code(numflow::cli::param))]
    InvalidParam(String),

    #[error("unknown category `{name}`")]
    #[diagnostic(code(numflow::cli::category), help("available categories: {available}"))]
    UnknownCategory { name: String, available: String },

    #[error("could not read {}", path.display())]
    #[diagnostic(code(numflow::cli::io))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn parse_key_value(arg: &str) -> Result<(String, String), CliError> {
    arg.split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| CliError::InvalidParam(arg.to_string()))
}

fn run_eval(
    evaluator: &Evaluator,
    name: &str,
    params: Vec<(String, String)>,
    json: bool,
) -> Result<()> {
    let params: Params = params.into_iter().collect();
    let result = evaluator.evaluate(name, &params);

    if json {
        println!("{}", serde_json::to_string_pretty(&*result).into_diagnostic()?);
        return Ok(());
    }

    match &*result {
        EvalResult::Success(array) => {
            println!(
                "{} shape={:?} size={} ndim={} dtype={}",
                name,
                array.shape.as_slice(),
                array.size,
                array.ndim,
                array.dtype
            );
            println!("{}", array.preview);
            Ok(())
        }
        EvalResult::Failure(err) => Err(numflow::Error::from(err.clone()).into()),
    }
}

fn run_flow(evaluator: Evaluator, file: PathBuf, code: bool, javascript: bool) -> Result<()> {
    let text = std::fs::read_to_string(&file).map_err(|source| CliError::Read {
        path: file.clone(),
        source,
    })?;
    let doc = FlowDocument::from_json(&text).map_err(numflow::Error::from)?;

    if code {
        let order = DependencyGraph::new(&doc)
            .topological_order()
            .map_err(numflow::Error::from)?;
        if javascript {
            print!("{}", flow::javascript_script(&doc, &order));
        } else {
            print!("{}", flow::python_script(&doc, &order));
        }
        return Ok(());
    }

    let report = FlowProcessor::new(evaluator).process(&doc);
    println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
    Ok(())
}

fn run_catalog(category: Option<String>, json: bool) -> Result<()> {
    let selected = match category {
        Some(name) => {
            let Some(category) = Category::from_label(&name) else {
                let available = catalog::categories()
                    .iter()
                    .map(|category| category.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(CliError::UnknownCategory { name, available }.into());
            };
            vec![category]
        }
        None => catalog::categories(),
    };

    let entries: Vec<_> = catalog::catalog()
        .iter()
        .filter(|spec| selected.contains(&spec.category))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries).into_diagnostic()?);
        return Ok(());
    }

    for category in selected {
        println!("{}", category);
        for spec in entries.iter().filter(|spec| spec.category == category) {
            let params = spec
                .params
                .iter()
                .map(|param| match param.default {
                    Some(default) => format!("{}={}", param.name, default),
                    None => param.name.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {:<16} {} ({})", spec.name, spec.description, params);
        }
    }
    Ok(())
}

fn run_literal(text: &str, shape: bool) {
    let checked = if shape {
        check_shape_literal(text).map(|shape| format!("shape {:?}", shape.as_slice()))
    } else {
        check_array_literal(text)
            .map(|value| format!("{} (shape {:?})", value, value.shape().as_slice()))
    };

    match checked {
        Ok(accepted) => println!("{}", accepted),
        Err(e) => {
            render_error(&e);
            if shape {
                eprintln!("Operations would use the shape [{}] instead.", FALLBACK_SHAPE);
            } else {
                eprintln!("Operations would use {:?} instead.", FALLBACK_ARRAY);
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use NUMFLOW_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("NUMFLOW_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!(max_elements = args.max_elements, "starting");
    let evaluator = Evaluator::new(EvaluatorOptions {
        max_elements: args.max_elements,
    });

    match args.command {
        Command::Eval { name, params, json } => run_eval(&evaluator, &name, params, json),
        Command::Flow {
            file,
            code,
            javascript,
        } => run_flow(evaluator, file, code, javascript),
        Command::Catalog { category, json } => run_catalog(category, json),
        Command::Literal { text, shape } => {
            run_literal(&text, shape);
            Ok(())
        }
    }
}
