//! Flow documents: the graphs a node editor exports.
//!
//! A flow is a list of nodes, each naming an operation with its raw
//! parameters, and a list of edges from a source node to the target node that
//! depends on it. This module reads such documents, analyzes their dependency
//! structure, evaluates every node in dependency order and renders the flow as
//! a NumPy script and a JavaScript outline.
//!
//! Edges only order evaluation. Operations never read upstream values, so an
//! edge into a node does not change what that node computes.

mod codegen;
mod graph;
mod processor;


pub use codegen::{GeneratedCode, javascript_script, python_script};
pub use graph::DependencyGraph;
pub use processor::{
    CategoryCounts, Complexity, ComplexityFactors, ComplexityLevel, FlowAnalysis, FlowProcessor,
    FlowReport, FlowSummary, NodeOutcome, UNKNOWN_FLOW_ID, ValueStats,
};

use hashbrown::HashMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::params::Params;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<FlowNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub edges: Vec<FlowEdge>,
}

impl FlowDocument {
    pub fn from_json(text: &str) -> Result<Self, FlowError> {
        serde_json::from_str(text).map_err(|err| FlowError::Malformed(err.to_string()))
    }

    /// The first node with `id`.
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Nodes by id. A repeated id keeps its first node.
    pub fn node_index(&self) -> HashMap<&str, &FlowNode> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            index.entry(node.id.as_str()).or_insert(node);
        }
        index
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub data: NodeData,
}

/// What the editor stored on a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Operation name, e.g. `np.zeros`.
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub params: Params,
}

/// Editors write `null` for fields they never filled in.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `target` depends on `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("Cycle detected involving node {node}")]
    Cycle { node: String },

    #[error("malformed flow document: {0}")]
    Malformed(String),
}
