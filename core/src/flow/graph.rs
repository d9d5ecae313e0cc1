//! Dependency structure of a flow.

use hashbrown::HashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{FlowDocument, FlowEdge, FlowError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Node → the nodes it depends on.
///
/// Nodes keep document order and each dependency list keeps edge order, so
/// every traversal below is deterministic. A node id seen twice keeps its first
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    ids: Vec<String>,
    deps: Vec<Vec<usize>>,
    linked: Vec<bool>,
    dangling: Vec<FlowEdge>,
}

impl DependencyGraph {
    pub fn new(doc: &FlowDocument) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(doc.nodes.len());
        let mut ids = Vec::with_capacity(doc.nodes.len());
        for node in &doc.nodes {
            if index.contains_key(node.id.as_str()) {
                tracing::debug!(node = %node.id, "duplicate node id ignored");
                continue;
            }
            index.insert(node.id.as_str(), ids.len());
            ids.push(node.id.clone());
        }

        let mut deps = vec![Vec::new(); ids.len()];
        let mut linked = vec![false; ids.len()];
        let mut dangling = Vec::new();
        for edge in &doc.edges {
            match (index.get(edge.source.as_str()), index.get(edge.target.as_str())) {
                (Some(&source), Some(&target)) => {
                    deps[target].push(source);
                    linked[source] = true;
                    linked[target] = true;
                }
                _ => {
                    tracing::debug!(source = %edge.source, target = %edge.target, "dangling edge");
                    dangling.push(edge.clone());
                }
            }
        }

        Self {
            ids,
            deps,
            linked,
            dangling,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn node_ids(&self) -> &[String] {
        &self.ids
    }

    /// Direct dependencies of `id`, in edge order.
    pub fn dependencies(&self, id: &str) -> Option<Vec<&str>> {
        let node = self.ids.iter().position(|known| known == id)?;
        Some(self.names(&self.deps[node]))
    }

    /// Edges whose source or target is not a node of the document.
    pub fn dangling_edges(&self) -> &[FlowEdge] {
        &self.dangling
    }

    /// Nodes that no resolved edge touches.
    pub fn isolated_nodes(&self) -> Vec<String> {
        self.ids
            .iter()
            .zip(&self.linked)
            .filter(|(_, linked)| !**linked)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Every node after all of its dependencies.
    ///
    /// Roots are taken in document order and dependencies in edge order, so
    /// unrelated nodes keep their document order.
    pub fn topological_order(&self) -> Result<Vec<String>, FlowError> {
        let mut marks = vec![Mark::Unvisited; self.ids.len()];
        let mut order = Vec::with_capacity(self.ids.len());

        for root in 0..self.ids.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::InProgress;
            let mut stack = vec![(root, 0usize)];

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                match self.deps[node].get(next) {
                    Some(&dep) => {
                        frame.1 += 1;
                        match marks[dep] {
                            Mark::Unvisited => {
                                marks[dep] = Mark::InProgress;
                                stack.push((dep, 0));
                            }
                            Mark::InProgress => {
                                return Err(FlowError::Cycle {
                                    node: self.ids[dep].clone(),
                                });
                            }
                            Mark::Done => {}
                        }
                    }
                    None => {
                        marks[node] = Mark::Done;
                        order.push(self.ids[node].clone());
                        stack.pop();
                    }
                }
            }
        }

        Ok(order)
    }

    /// Cycles closed by a back edge during a depth-first walk, each as a path
    /// that starts and ends on the same node, e.g. `["a", "b", "a"]`.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut marks = vec![Mark::Unvisited; self.ids.len()];
        let mut cycles = Vec::new();

        for root in 0..self.ids.len() {
            if marks[root] != Mark::Unvisited {
                continue;
            }
            marks[root] = Mark::InProgress;
            let mut stack = vec![(root, 0usize)];

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                let Some(&dep) = self.deps[node].get(next) else {
                    marks[node] = Mark::Done;
                    stack.pop();
                    continue;
                };
                frame.1 += 1;
                match marks[dep] {
                    Mark::Unvisited => {
                        marks[dep] = Mark::InProgress;
                        stack.push((dep, 0));
                    }
                    Mark::InProgress => {
                        let start = stack
                            .iter()
                            .position(|&(on_path, _)| on_path == dep)
                            .unwrap_or(0);
                        let mut path: Vec<String> = stack[start..]
                            .iter()
                            .map(|&(on_path, _)| self.ids[on_path].clone())
                            .collect();
                        path.push(self.ids[dep].clone());
                        cycles.push(path);
                    }
                    Mark::Done => {}
                }
            }
        }

        cycles
    }

    fn names(&self, nodes: &[usize]) -> Vec<&str> {
        nodes.iter().map(|&node| self.ids[node].as_str()).collect()
    }
}

/// A map from node id to its dependency ids, in document order.
impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ids.len()))?;
        for (id, deps) in self.ids.iter().zip(&self.deps) {
            map.serialize_entry(id, &self.names(deps))?;
        }
        map.end()
    }
}
