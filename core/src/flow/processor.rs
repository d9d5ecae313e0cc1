//! Whole-flow evaluation and its report.

use std::sync::Arc;

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::{DependencyGraph, FlowDocument, FlowEdge, GeneratedCode};
use crate::evaluator::{EvalResult, Evaluate};
use crate::preview::TableData;
use crate::values::Value;

/// Flow id reported when the document carries none.
pub const UNKNOWN_FLOW_ID: &str = "unknown";

/// Evaluates every node of a flow through a shared evaluator.
#[derive(Debug, Clone)]
pub struct FlowProcessor<E> {
    evaluator: E,
}

impl<E: Evaluate> FlowProcessor<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Analyze `doc` and evaluate its nodes in dependency order.
    ///
    /// A cyclic document is not evaluated at all: the report is marked failed,
    /// carries the cycles found and has no node outcomes. Its generated code
    /// holds only the script preambles.
    pub fn process(&self, doc: &FlowDocument) -> FlowReport {
        let graph = DependencyGraph::new(doc);
        let cycles = graph.cycles();
        let isolated_nodes = graph.isolated_nodes();
        let dangling_edges = graph.dangling_edges().to_vec();

        let (execution_order, error) = match graph.topological_order() {
            Ok(order) => (order, None),
            Err(err) => {
                tracing::warn!(error = %err, "flow has a dependency cycle");
                (Vec::new(), Some(format!("Dependency resolution failed: {err}")))
            }
        };

        let nodes = doc.node_index();
        let results: Vec<NodeOutcome> = execution_order
            .iter()
            .filter_map(|id| nodes.get(id.as_str()).copied())
            .map(|node| {
                let result = self.evaluator.evaluate(&node.data.name, &node.data.params);
                NodeOutcome {
                    node_id: node.id.clone(),
                    function_name: node.data.name.clone(),
                    category: node.data.category.clone(),
                    stats: result.data().and_then(ValueStats::of),
                    table_data: result.data().map(TableData::of),
                    result,
                }
            })
            .collect();

        let successful = results.iter().filter(|r| r.result.is_success()).count();
        let summary = FlowSummary {
            total_nodes: doc.nodes.len(),
            total_edges: doc.edges.len(),
            categories: CategoryCounts::of(doc),
            successful,
            failed: results.len() - successful,
            complexity: Complexity::of(doc),
        };
        tracing::debug!(
            nodes = summary.total_nodes,
            successful,
            failed = summary.failed,
            "flow processed"
        );

        let generated_code = GeneratedCode::new(doc, &execution_order);
        FlowReport {
            flow_id: doc.id.clone().unwrap_or_else(|| UNKNOWN_FLOW_ID.to_string()),
            success: error.is_none(),
            error,
            analysis: FlowAnalysis {
                execution_order,
                dependencies: graph,
                cycles,
                isolated_nodes,
                dangling_edges,
            },
            generated_code,
            results,
            summary,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReport {
    pub flow_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub analysis: FlowAnalysis,
    pub generated_code: GeneratedCode,
    pub results: Vec<NodeOutcome>,
    pub summary: FlowSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowAnalysis {
    /// Empty when the flow has a cycle.
    pub execution_order: Vec<String>,
    pub dependencies: DependencyGraph,
    pub cycles: Vec<Vec<String>>,
    pub isolated_nodes: Vec<String>,
    pub dangling_edges: Vec<FlowEdge>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutcome {
    pub node_id: String,
    pub function_name: String,
    pub category: String,
    #[serde(serialize_with = "serialize_shared")]
    pub result: Arc<EvalResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_data: Option<TableData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ValueStats>,
}

fn serialize_shared<S: Serializer>(
    result: &Arc<EvalResult>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    result.as_ref().serialize(serializer)
}

/// Summary statistics over every element of a result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub sum: f64,
}

impl ValueStats {
    /// `None` for a value without elements.
    pub fn of(value: &Value) -> Option<Self> {
        let items = value.flatten();
        if items.is_empty() {
            return None;
        }
        let count = items.len() as f64;
        let sum: f64 = items.iter().sum();
        let mean = sum / count;
        let variance = items.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;
        Some(Self {
            min: items.iter().copied().fold(f64::INFINITY, f64::min),
            max: items.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean,
            std: variance.sqrt(),
            sum,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSummary {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub categories: CategoryCounts,
    pub successful: usize,
    pub failed: usize,
    pub complexity: Complexity,
}

/// Node count per category label, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts(Vec<(String, usize)>);

impl CategoryCounts {
    fn of(doc: &FlowDocument) -> Self {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for node in &doc.nodes {
            match counts.iter_mut().find(|(label, _)| *label == node.data.category) {
                Some((_, count)) => *count += 1,
                None => counts.push((node.data.category.clone(), 1)),
            }
        }
        Self(counts)
    }

    pub fn get(&self, category: &str) -> usize {
        self.0
            .iter()
            .find(|(label, _)| label == category)
            .map_or(0, |(_, count)| *count)
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplexityFactors {
    pub nodes: usize,
    pub edges: usize,
    pub categories: usize,
}

/// `nodes + 0.5 * edges + 0.3 * categories`, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Complexity {
    pub score: f64,
    pub level: ComplexityLevel,
    pub factors: ComplexityFactors,
}

impl Complexity {
    pub fn of(doc: &FlowDocument) -> Self {
        let factors = ComplexityFactors {
            nodes: doc.nodes.len(),
            edges: doc.edges.len(),
            categories: CategoryCounts::of(doc).len(),
        };
        Self::from_factors(factors)
    }

    pub fn from_factors(factors: ComplexityFactors) -> Self {
        let raw =
            factors.nodes as f64 + factors.edges as f64 * 0.5 + factors.categories as f64 * 0.3;
        let level = if raw > 20.0 {
            ComplexityLevel::Complex
        } else if raw > 10.0 {
            ComplexityLevel::Moderate
        } else {
            ComplexityLevel::Simple
        };
        Self {
            score: (raw * 10.0).round() / 10.0,
            level,
            factors,
        }
    }
}
