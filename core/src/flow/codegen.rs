//! Script generation: a runnable NumPy script and a JavaScript outline.

use std::fmt::Write;

use serde::Serialize;

use super::FlowDocument;

const HEADER: &str = "# Generated NumPy code\n\nimport numpy as np\n\n";

const JS_HEADER: &str =
    "// Generated JavaScript code\n// Note: This is a conceptual representation\n\n";

/// Both renderings of a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedCode {
    pub python: String,
    pub javascript: String,
}

impl GeneratedCode {
    pub fn new(doc: &FlowDocument, order: &[String]) -> Self {
        Self {
            python: python_script(doc, order),
            javascript: javascript_script(doc, order),
        }
    }
}

/// Render `doc` as a NumPy script, one assignment per node of `order`.
///
/// Each assignment is preceded by the node description as a comment and
/// followed by a line printing the result shape. Ids in `order` that name no
/// node are skipped.
pub fn python_script(doc: &FlowDocument, order: &[String]) -> String {
    let nodes = doc.node_index();
    let mut script = String::from(HEADER);
    for node in order.iter().filter_map(|id| nodes.get(id.as_str()).copied()) {
        let args: Vec<String> = node
            .data
            .params
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| format!("{key}={}", python_argument(key, value)))
            .collect();

        // Writing to a String cannot fail.
        let _ = writeln!(script, "# {}", comment_text(&node.data.description));
        let _ = writeln!(script, "{} = {}({})", node.id, node.data.name, args.join(", "));
        let _ = writeln!(
            script,
            "print(f\"{name} result shape: \
             {{{id}.shape if hasattr({id}, 'shape') else type({id})}}\")",
            name = node.data.name,
            id = node.id,
        );
        script.push('\n');
    }
    script
}

/// Render `doc` as a JavaScript object literal per node of `order`, recording
/// the operation, its parameters and its category. Nothing is computed.
pub fn javascript_script(doc: &FlowDocument, order: &[String]) -> String {
    let nodes = doc.node_index();
    let mut script = String::from(JS_HEADER);
    script.push_str("const results = {};\n\n");
    for node in order.iter().filter_map(|id| nodes.get(id.as_str()).copied()) {
        let params = serde_json::to_string_pretty(&node.data.params)
            .unwrap_or_else(|_| String::from("{}"));

        let _ = writeln!(script, "// {}", comment_text(&node.data.description));
        let _ = writeln!(script, "{} = {{", javascript_target(&node.id));
        let _ = writeln!(script, "  function: {},", quoted(&node.data.name));
        let _ = writeln!(script, "  params: {},", params);
        let _ = writeln!(script, "  category: {}", quoted(&node.data.category));
        script.push_str("};\n\n");
    }
    script.push_str("console.log(\"Flow execution results:\", results);\n");
    script
}

/// `results.id` when `id` is an identifier, `results['id']` otherwise.
fn javascript_target(id: &str) -> String {
    let mut chars = id.chars();
    let identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if identifier {
        format!("results.{id}")
    } else {
        format!("results[{}]", quoted(id))
    }
}

/// Line breaks would end the comment early.
fn comment_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Single-quoted literal, valid in both Python and JavaScript.
fn quoted(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Node references, shapes, sequence literals and numbers are emitted as
/// written; anything else becomes a quoted string.
fn python_argument(key: &str, value: &str) -> String {
    let value = value.trim();
    let bare = value.starts_with("node_")
        || key == "shape"
        || key == "newshape"
        || value.starts_with('[')
        || value.starts_with('(')
        || value.parse::<f64>().is_ok_and(f64::is_finite);
    if bare {
        value.to_string()
    } else {
        quoted(value)
    }
}
