use indoc::indoc;
use numflow::flow::{DependencyGraph, python_script};
use numflow::{Evaluator, FlowDocument, FlowProcessor, Value};
use pretty_assertions::assert_eq;

const EXPORTED_FLOW: &str = indoc! {r#"
    {
      "id": "numpy-flow-1700000000000",
      "nodes": [
        {
          "id": "node_3",
          "type": "numpyNode",
          "position": {"x": 400, "y": 100},
          "data": {
            "name": "np.reshape",
            "category": "Array Manipulation",
            "description": "Reshape array",
            "params": {"a": "node_1", "newshape": "(3, 2)"}
          }
        },
        {
          "id": "node_1",
          "type": "numpyNode",
          "position": {"x": 0, "y": 100},
          "data": {
            "name": "np.linspace",
            "category": "Array Creation",
            "description": "Create evenly spaced numbers",
            "params": {"start": 0, "stop": 1, "num": 11}
          }
        },
        {
          "id": "node_2",
          "type": "numpyNode",
          "position": {"x": 200, "y": 300},
          "data": {
            "name": "np.mean",
            "category": "Statistics",
            "description": "Compute arithmetic mean",
            "params": {"a": "node_1", "axis": ""}
          }
        },
        {
          "id": "node_4",
          "type": "numpyNode",
          "position": {"x": 600, "y": 300},
          "data": {
            "name": "np.fft",
            "category": "Signal",
            "description": "Not a registered operation",
            "params": {}
          }
        }
      ],
      "edges": [
        {"id": "e1-3", "source": "node_1", "target": "node_3"},
        {"id": "e1-2", "source": "node_1", "target": "node_2"}
      ]
    }
"#};

#[test]
fn test_process_exported_flow() {
    let doc = FlowDocument::from_json(EXPORTED_FLOW).unwrap();
    let report = FlowProcessor::new(Evaluator::default()).process(&doc);

    assert!(report.success);
    assert_eq!(report.flow_id, "numpy-flow-1700000000000");
    assert_eq!(
        report.analysis.execution_order,
        vec!["node_1", "node_3", "node_2", "node_4"]
    );
    assert_eq!(report.analysis.isolated_nodes, vec!["node_4"]);
    assert!(report.analysis.cycles.is_empty());

    let linspace = report.results[0].result.array().unwrap();
    assert_eq!(linspace.shape.as_slice(), &[11]);
    assert_eq!(linspace.preview, "[0.00, 0.10, 0.20, ..., 1.00]");

    // Upstream values do not flow into nodes.
    assert_eq!(
        report.results[1].result.data(),
        Some(&Value::Matrix(vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![5.0, 6.0]
        ]))
    );
    assert_eq!(report.results[2].result.data(), Some(&Value::Scalar(3.0)));
    assert!(!report.results[3].result.is_success());

    assert_eq!(report.summary.successful, 3);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.categories.len(), 4);
    assert_eq!(report.summary.complexity.score, 6.2);
}

#[test]
fn test_cyclic_flow_json() {
    let doc = FlowDocument::from_json(indoc! {r#"
        {
          "nodes": [
            {"id": "a", "data": {"name": "np.sin", "category": "Mathematical"}},
            {"id": "b", "data": {"name": "np.cos", "category": "Mathematical"}}
          ],
          "edges": [
            {"source": "a", "target": "b"},
            {"source": "b", "target": "a"}
          ]
        }
    "#})
    .unwrap();

    let report = FlowProcessor::new(Evaluator::default()).process(&doc);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(
        json["error"],
        "Dependency resolution failed: Cycle detected involving node a"
    );
    assert_eq!(json["results"], serde_json::json!([]));
    assert_eq!(json["analysis"]["cycles"], serde_json::json!([["a", "b", "a"]]));
    assert_eq!(json["analysis"]["dependencies"], serde_json::json!({"a": ["b"], "b": ["a"]}));
}

#[test]
fn test_generated_script() {
    let doc = FlowDocument::from_json(EXPORTED_FLOW).unwrap();
    let order = DependencyGraph::new(&doc).topological_order().unwrap();
    let script = python_script(&doc, &order);

    assert!(script.starts_with("# Generated NumPy code\n\nimport numpy as np\n\n"));
    assert!(script.contains("node_1 = np.linspace(num=11, start=0, stop=1)\n"));
    assert!(script.contains("node_3 = np.reshape(a=node_1, newshape=(3, 2))\n"));
    assert!(script.contains("node_2 = np.mean(a=node_1)\n"));
    assert!(script.contains("# Reshape array\nnode_3 = "));

    let first_use = script.find("a=node_1").unwrap();
    let definition = script.find("node_1 = ").unwrap();
    assert!(definition < first_use);
}

#[test]
fn test_report_json_carries_code_and_tables() {
    let doc = FlowDocument::from_json(EXPORTED_FLOW).unwrap();
    let report = FlowProcessor::new(Evaluator::default()).process(&doc);
    let json = serde_json::to_value(&report).unwrap();

    let javascript = json["generatedCode"]["javascript"].as_str().unwrap();
    assert!(javascript.starts_with("// Generated JavaScript code\n"));
    assert!(javascript.contains(
        "results.node_3 = {\n  function: 'np.reshape',\n  params: {\n  \"a\": \"node_1\",\n"
    ));
    assert!(javascript.ends_with("console.log(\"Flow execution results:\", results);\n"));
    assert_eq!(
        json["generatedCode"]["python"],
        python_script(&doc, &report.analysis.execution_order)
    );

    let tables: Vec<_> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|outcome| outcome["tableData"]["type"].clone())
        .collect();
    assert_eq!(
        tables,
        vec![
            serde_json::json!("vector"),
            serde_json::json!("matrix"),
            serde_json::json!("scalar"),
            serde_json::Value::Null,
        ]
    );
    assert_eq!(
        json["results"][1]["tableData"]["shape"],
        serde_json::json!([3, 2])
    );
}
